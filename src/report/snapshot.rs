//! JSON persistence of the identities gathered by a sync run.

use std::path::Path;

use serde::Serialize;

use crate::error::{ReorgError, ReorgResult};
use crate::model::Identity;

/// Writes the identities as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`ReorgError::Snapshot`] if the file cannot be written.
pub fn save(identities: &[Identity], path: &Path) -> ReorgResult<()> {
    let snapshot_error = |e: &dyn std::fmt::Display| {
        ReorgError::Snapshot(format!("Failed to write snapshot {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| snapshot_error(&e))?;
    }

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    identities.serialize(&mut serializer).map_err(|e| snapshot_error(&e))?;
    std::fs::write(path, buffer).map_err(|e| snapshot_error(&e))
}

/// Reads identities written by [`save`].
///
/// # Errors
///
/// Returns [`ReorgError::Snapshot`] if the file cannot be read or parsed.
pub fn load(path: &Path) -> ReorgResult<Vec<Identity>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ReorgError::Snapshot(format!("Failed to read snapshot {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        ReorgError::Snapshot(format!("Failed to parse snapshot {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_keeps_service_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_identities.json");
        let identity: Identity = serde_json::from_value(json!({
            "id": "id-1",
            "name": "Jane Doe",
            "alias": "P100",
            "lifecycleState": "active",
            "attributes": {"departmentId": "10", "teamId": "T1", "cloudStatus": "UNREGISTERED"},
            "roles": [{
                "id": "r1", "name": "Finance", "owner": "N/A",
                "details": {"name": "Finance", "owner": "N/A", "entitlements": [{"id": "e1", "name": "Read"}]}
            }],
            "accounts": [{"sourceName": "Active Directory", "entitlements": [
                {"value": "CN=Read,OU=Groups", "description": "no description"}
            ]}]
        }))
        .unwrap();

        save(std::slice::from_ref(&identity), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n    {"));
        assert!(text.contains("\"lifecycleState\": \"active\""));
        assert!(text.contains("\"sourceName\": \"Active Directory\""));

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, vec![identity]);
    }

    #[test]
    fn unreadable_snapshot_is_an_error() {
        let err = load(Path::new("/nonexistent/all_identities.json")).unwrap_err();
        assert!(matches!(err, ReorgError::Snapshot(_)));
    }
}
