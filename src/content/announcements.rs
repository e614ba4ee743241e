//! Announcement listing
//!
//! Builds one record per `.md` file in the announcements directory.

use serde::Serialize;
use std::io;
use std::path::Path;
use tokio::fs;

use crate::logger;

/// A named Markdown document served as part of the announcement list
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Announcement {
    /// File name without the `.md` extension
    pub name: String,
    /// Raw file text
    pub content: String,
}

/// Enumerate all announcements under `dir`
///
/// An absent directory yields an empty list. Files that fail to read are
/// skipped with a warning so one bad file never fails the whole listing.
/// Order follows directory enumeration and is not stable across calls.
pub async fn load_all(dir: &Path) -> io::Result<Vec<Announcement>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut announcements = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        match fs::read_to_string(&path).await {
            Ok(content) => announcements.push(Announcement {
                name: name.to_string(),
                content,
            }),
            Err(e) => {
                logger::log_warning(&format!(
                    "Skipping unreadable announcement {}: {e}",
                    path.display()
                ));
            }
        }
    }

    Ok(announcements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_markdown_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("a.md"), "Hello").expect("write fixture");
        std::fs::write(dir.path().join("b.md"), "World").expect("write fixture");

        let mut all = load_all(dir.path()).await.expect("load");
        all.sort_by(|x, y| x.name.cmp(&y.name));

        assert_eq!(
            all,
            vec![
                Announcement {
                    name: "a".to_string(),
                    content: "Hello".to_string()
                },
                Announcement {
                    name: "b".to_string(),
                    content: "World".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let all = load_all(&dir.path().join("absent")).await.expect("load");
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_ignores_other_extensions() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("notes.txt"), "ignore").expect("write fixture");
        std::fs::write(dir.path().join("release.md"), "keep").expect("write fixture");

        let all = load_all(dir.path()).await.expect("load");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "release");
    }

    #[tokio::test]
    async fn test_non_ascii_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("更新.md"), "春节快乐 🎉").expect("write fixture");

        let all = load_all(dir.path()).await.expect("load");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "更新");
        assert_eq!(all[0].content, "春节快乐 🎉");

        let json = serde_json::to_string(&all).expect("serialize");
        assert!(json.contains("春节快乐"), "got: {json}");
    }
}
