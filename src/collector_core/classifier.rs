//! Server classification into local / remote / both

use serde::{Deserialize, Serialize};

/// One server as listed by the registry. Only the fields the classifier
/// reads are typed; package and remote entries are kept opaque.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub packages: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub remotes: Option<Vec<serde_json::Value>>,
}

impl ServerEntry {
    pub fn has_remotes(&self) -> bool {
        self.remotes.as_ref().is_some_and(|r| !r.is_empty())
    }

    pub fn has_packages(&self) -> bool {
        self.packages.as_ref().is_some_and(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_local: bool,
    pub is_remote: bool,
    pub is_both: bool,
}

/// Classify a server
///
/// - remote: lists at least one remote endpoint
/// - local: lists no remotes, or ships at least one package
/// - both: lists remotes and ships packages
///
/// A server with neither packages nor remotes counts as local.
pub fn classify(server: &ServerEntry) -> Classification {
    let has_remotes = server.has_remotes();
    let has_packages = server.has_packages();

    Classification {
        is_local: !has_remotes || has_packages,
        is_remote: has_remotes,
        is_both: has_remotes && has_packages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server(packages: Option<usize>, remotes: Option<usize>) -> ServerEntry {
        ServerEntry {
            id: Some("srv".to_string()),
            name: "io.example/server".to_string(),
            packages: packages.map(|n| vec![json!({"name": "pkg", "version": "1.0.0"}); n]),
            remotes: remotes.map(|n| vec![json!({"name": "sse", "uri": "https://example.com"}); n]),
        }
    }

    #[test]
    fn test_every_shape_is_local_or_remote() {
        for packages in [None, Some(0), Some(1), Some(3)] {
            for remotes in [None, Some(0), Some(1), Some(2)] {
                let c = classify(&server(packages, remotes));
                assert!(c.is_local || c.is_remote, "{:?} {:?}", packages, remotes);
            }
        }
    }

    #[test]
    fn test_no_remotes_is_local_only() {
        for packages in [None, Some(0), Some(2)] {
            for remotes in [None, Some(0)] {
                let c = classify(&server(packages, remotes));
                assert!(c.is_local);
                assert!(!c.is_remote);
                assert!(!c.is_both);
            }
        }
    }

    #[test]
    fn test_remote_only() {
        let c = classify(&server(Some(0), Some(1)));
        assert_eq!(
            c,
            Classification { is_local: false, is_remote: true, is_both: false }
        );
    }

    #[test]
    fn test_packages_and_remotes_is_both() {
        let c = classify(&server(Some(1), Some(1)));
        assert_eq!(
            c,
            Classification { is_local: true, is_remote: true, is_both: true }
        );
    }

    #[test]
    fn test_deserialize_ignores_unknown_and_null_fields() {
        let entry: ServerEntry = serde_json::from_value(json!({
            "id": "abc",
            "name": "io.example/thing",
            "description": "demo",
            "packages": null,
            "remotes": [{"name": "http", "uri": "https://example.com/mcp"}],
            "created_at": "2025-09-01T00:00:00Z"
        }))
        .unwrap();

        assert!(entry.has_remotes());
        assert!(!entry.has_packages());
        assert!(!classify(&entry).is_local);
    }
}
