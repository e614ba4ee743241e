//! Version-info document loading
//!
//! The document is opaque to the server: it is parsed only to validate
//! that the file holds well-formed JSON, then re-serialized for the
//! response. serde_json leaves non-ASCII characters unescaped, so the
//! body round-trips UTF-8 content verbatim.

use std::fmt;
use std::io;
use std::path::Path;
use tokio::fs;

/// Failure to produce the version document from disk
#[derive(Debug)]
pub enum VersionLoadError {
    /// File exists but could not be read
    Io(io::Error),
    /// File was read but does not hold valid JSON
    Malformed(serde_json::Error),
}

impl fmt::Display for VersionLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read version file: {e}"),
            Self::Malformed(e) => write!(f, "version file is not valid JSON: {e}"),
        }
    }
}

impl std::error::Error for VersionLoadError {}

/// Load and re-serialize the version-info document
///
/// Returns `Ok(None)` when the file is absent (the route answers 404),
/// and an error when the file is unreadable or malformed (the route
/// answers 500 rather than taking the process down).
pub async fn load(info_file: &Path) -> Result<Option<String>, VersionLoadError> {
    let raw = match fs::read_to_string(info_file).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(VersionLoadError::Io(e)),
    };

    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(VersionLoadError::Malformed)?;

    // Serialization of a just-parsed Value cannot fail
    let body = serde_json::to_string(&value).map_err(VersionLoadError::Malformed)?;
    Ok(Some(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_present_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("info.json");
        std::fs::write(&path, r#"{"version":"1.0.0"}"#).expect("write fixture");

        let body = load(&path).await.expect("load").expect("present");
        let value: serde_json::Value = serde_json::from_str(&body).expect("valid JSON");
        assert_eq!(value["version"], "1.0.0");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load(&dir.path().join("info.json")).await.expect("load");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("info.json");
        let mut file = File::create(&path).expect("create fixture");
        file.write_all(b"{not json").expect("write fixture");

        match load(&path).await {
            Err(VersionLoadError::Malformed(_)) => {}
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_ascii_unescaped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("info.json");
        std::fs::write(&path, r#"{"note":"公告：新版本"}"#).expect("write fixture");

        let body = load(&path).await.expect("load").expect("present");
        assert!(body.contains("公告：新版本"), "got: {body}");
        assert!(!body.contains("\\u"), "got: {body}");
    }
}
