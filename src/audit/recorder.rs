//! The audit recorder.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::EngineResult;
use crate::models::AuditProof;

use super::attestation::Attestor;
use super::canonical::canonical_json;

/// Algorithm name recorded on every proof.
pub const DIGEST_ALGORITHM: &str = "sha256";

/// Hex-encoded SHA-256 of `bytes`.
pub fn digest_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Seals payloads into [`AuditProof`]s, optionally anchoring the digest
/// with an external [`Attestor`].
///
/// # Examples
///
/// ```
/// use impact_engine::audit::AuditRecorder;
///
/// let recorder = AuditRecorder::new();
/// let first = recorder.seal(&serde_json::json!({"a": 1, "b": 2})).unwrap();
/// let second = recorder.seal(&serde_json::json!({"b": 2, "a": 1})).unwrap();
///
/// assert_eq!(first.algorithm, "sha256");
/// assert_eq!(first.digest, second.digest);
/// assert!(first.external_tx_ref.is_none());
/// ```
#[derive(Clone, Default)]
pub struct AuditRecorder {
    attestor: Option<Arc<dyn Attestor>>,
    source: String,
}

impl fmt::Debug for AuditRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditRecorder")
            .field("attested", &self.attestor.is_some())
            .field("source", &self.source)
            .finish()
    }
}

impl AuditRecorder {
    /// Creates a recorder that only computes local proofs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder that also anchors digests through `attestor`,
    /// identifying itself as `source`.
    pub fn with_attestor(attestor: Arc<dyn Attestor>, source: impl Into<String>) -> Self {
        Self {
            attestor: Some(attestor),
            source: source.into(),
        }
    }

    /// Returns true if an attestor is configured.
    pub fn has_attestor(&self) -> bool {
        self.attestor.is_some()
    }

    /// Seals `payload`, stamped with the current time.
    pub fn seal<T: Serialize + ?Sized>(&self, payload: &T) -> EngineResult<AuditProof> {
        self.seal_at(payload, Utc::now())
    }

    /// Seals `payload` with an explicit capture timestamp.
    ///
    /// The digest covers the canonical payload only; the timestamp is
    /// recorded alongside it.
    pub fn seal_at<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        timestamp: DateTime<Utc>,
    ) -> EngineResult<AuditProof> {
        let canonical = canonical_json(payload)?;
        let digest = digest_hex(canonical.as_bytes());
        debug!(digest = %digest, bytes = canonical.len(), "Sealed payload");

        Ok(AuditProof {
            algorithm: DIGEST_ALGORITHM.to_string(),
            digest,
            timestamp,
            external_tx_ref: None,
        })
    }

    /// Seals `payload` and, if an attestor is configured, anchors the
    /// digest. Attestation failures are logged and leave `external_tx_ref`
    /// empty.
    pub async fn seal_and_anchor<T: Serialize + ?Sized>(
        &self,
        payload: &T,
    ) -> EngineResult<AuditProof> {
        let mut proof = self.seal(payload)?;
        self.anchor(&mut proof).await;
        Ok(proof)
    }

    /// Anchors an existing proof in place. Does nothing without an
    /// attestor or when the proof is already anchored.
    pub async fn anchor(&self, proof: &mut AuditProof) {
        let Some(attestor) = &self.attestor else {
            return;
        };
        if proof.is_anchored() {
            return;
        }

        match attestor.anchor(&proof.digest, &self.source).await {
            Ok(tx_ref) => {
                debug!(digest = %proof.digest, tx_ref = %tx_ref, "Anchored audit digest");
                proof.external_tx_ref = Some(tx_ref);
            }
            Err(e) => {
                warn!(digest = %proof.digest, error = %e, "Failed to anchor audit digest");
            }
        }
    }
}
