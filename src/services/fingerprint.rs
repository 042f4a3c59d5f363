//! Schedule fingerprinting.
//!
//! A generated schedule is fingerprinted by hashing its JSON rendering.
//! Sequencing is deterministic, so two runs over the same inputs produce
//! the same fingerprint and a stored schedule can be compared against a
//! regenerated one without a field-by-field diff.

use crate::api::Event;

/// Hex-encoded SHA-256 of the schedule's JSON rendering.
///
/// Serialization of an event list is infallible; an empty list hashes to
/// the fingerprint of `[]`.
pub fn schedule_fingerprint(events: &[Event]) -> String {
    let encoded = serde_json::to_vec(events).unwrap_or_default();
    fingerprint_bytes(&encoded)
}

/// Fingerprint a schedule already rendered as a JSON string.
pub fn fingerprint_json_str(schedule_json: &str) -> String {
    fingerprint_bytes(schedule_json.as_bytes())
}

fn fingerprint_bytes(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    hex::encode(result)
}
