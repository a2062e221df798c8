//! Snapshot persistence: one opaque, versioned binary blob per project.
//!
//! The byte layout is `[4 bytes u32 LE version][MessagePack body]`. Handles
//! stored inside the body (station and connection indices) are plain graph
//! indices, and the graph serializes including vacant slots, so an object
//! graph round-trips with reference identity intact: two connections sharing
//! a station before a save still share it after the load.

use std::fs;
use std::path::Path;

use crate::models::Project;

/// Snapshot format version written into the header
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

/// File extension used for exported snapshots
pub const SNAPSHOT_EXTENSION: &str = "tgproject";

/// Serialize a project to bytes with the version header
///
/// # Errors
/// Returns an error if `MessagePack` serialization fails
pub fn serialize_project_to_bytes(project: &Project) -> Result<Vec<u8>, String> {
    let body =
        rmp_serde::to_vec(project).map_err(|e| format!("Failed to serialize project: {e}"))?;

    let mut bytes = Vec::with_capacity(4 + body.len());
    bytes.extend_from_slice(&CURRENT_SNAPSHOT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&body);

    Ok(bytes)
}

/// Deserialize a project from bytes with version header validation.
///
/// All-or-nothing: either a whole project is rebuilt or an error is
/// returned; no partial state ever escapes.
///
/// # Errors
/// Returns an error if the buffer is too small, the version is unsupported,
/// or deserialization fails
pub fn deserialize_project_from_bytes(bytes: &[u8]) -> Result<Project, String> {
    if bytes.len() < 4 {
        return Err("Invalid snapshot: too small".to_string());
    }

    let version_bytes: [u8; 4] = bytes[0..4]
        .try_into()
        .map_err(|_| "Invalid version header")?;
    let version = u32::from_le_bytes(version_bytes);

    if version != CURRENT_SNAPSHOT_VERSION {
        return Err(format!("Unsupported snapshot version: {version}"));
    }

    let project: Project = rmp_serde::from_slice(&bytes[4..])
        .map_err(|e| format!("Failed to parse snapshot: {e}"))?;

    Ok(project)
}

/// Write a project snapshot to disk
///
/// # Errors
/// Returns an error if serialization or the filesystem write fails
pub fn save_project_to_file(project: &Project, path: &Path) -> Result<(), String> {
    let bytes = serialize_project_to_bytes(project)?;
    fs::write(path, bytes).map_err(|e| format!("Failed to write snapshot: {e}"))
}

/// Read a project snapshot from disk.
///
/// The caller swaps the returned project in wholesale; a failed load leaves
/// its current state untouched.
///
/// # Errors
/// Returns an error if the filesystem read or deserialization fails
pub fn load_project_from_file(path: &Path) -> Result<Project, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read snapshot: {e}"))?;
    deserialize_project_from_bytes(&bytes)
}

/// Create a timestamped export filename for a project
#[must_use]
pub fn create_export_filename(project_name: &str) -> String {
    let now = chrono::Utc::now();
    format!(
        "{}.{}.{SNAPSHOT_EXTENSION}",
        project_name.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_"),
        now.format("%Y-%m-%d-%H%M%S")
    )
}

/// Generate a copy of a project with fresh identity and timestamps, for
/// importing a snapshot as a new project
#[must_use]
pub fn regenerate_project_ids(mut project: Project, new_name: Option<String>) -> Project {
    let now = chrono::Utc::now().to_rfc3339();
    project.metadata.id = uuid::Uuid::new_v4().to_string();
    project.metadata.created_at.clone_from(&now);
    project.metadata.updated_at = now;
    if let Some(name) = new_name {
        project.metadata.name = name;
    }
    project
}
