//! Tamper-evident sealing of analysis results.
//!
//! A payload is serialised to canonical JSON (object keys sorted at every
//! depth, compact separators) and hashed with SHA-256. The digest depends
//! only on the canonical bytes, so structurally identical payloads always
//! seal to the same digest regardless of construction order. Sealing can
//! optionally register the digest with an external [`Attestor`]; that step
//! is best-effort and never invalidates the proof.

mod attestation;
mod canonical;
mod recorder;

pub use attestation::{Attestor, HttpAttestor};
pub use canonical::{canonical_json, canonicalize};
pub use recorder::{AuditRecorder, DIGEST_ALGORITHM, digest_hex};
