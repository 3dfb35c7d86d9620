//! Audit proof model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A deterministic hash-based attestation of a result payload.
///
/// The digest depends only on the canonicalised payload; the timestamp
/// records when the proof was captured and is not part of the digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditProof {
    /// Digest algorithm, e.g. "sha256".
    pub algorithm: String,
    /// Lowercase hex digest of the canonical payload.
    pub digest: String,
    /// When the proof was captured.
    pub timestamp: DateTime<Utc>,
    /// Reference returned by the external attestation service, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_tx_ref: Option<String>,
}

impl AuditProof {
    /// Returns true if the digest was registered with an attestation service.
    pub fn is_anchored(&self) -> bool {
        self.external_tx_ref.is_some()
    }
}
