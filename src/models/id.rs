/// ID generation for registry-keyed entities
///
/// Transport lines are keyed by random `u64` ids so a line keeps its identity
/// across the remove-edit-re-add flow. Project snapshots use UUID strings
/// instead (see `models::project`).
use rand::Rng;

/// Generate a new random u64 ID
#[must_use]
pub fn generate_id() -> u64 {
    rand::thread_rng().gen()
}

/// Serde default function: ids absent from older snapshots get a fresh one
#[must_use]
pub fn generate_id_default() -> u64 {
    generate_id()
}
