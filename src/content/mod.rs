//! Content loading module
//!
//! Reads the on-disk announcement content served by the HTTP routes.
//! Every load is a fresh snapshot of disk state at request time; nothing
//! is cached across requests and the server never writes these files.

pub mod announcements;
pub mod version;

use std::path::PathBuf;

/// Fixed location of the version-info document, relative to the working directory
const INFO_FILE: &str = "info.json";
/// Fixed location of the announcements directory, relative to the working directory
const ANNOUNCEMENTS_DIR: &str = "announces";

/// Locations of the content files on disk
///
/// The paths are fixed for the running server; the struct exists so tests
/// can point the loaders at temporary fixtures.
#[derive(Debug, Clone)]
pub struct ContentPaths {
    pub info_file: PathBuf,
    pub announcements_dir: PathBuf,
}

impl Default for ContentPaths {
    fn default() -> Self {
        Self {
            info_file: PathBuf::from(INFO_FILE),
            announcements_dir: PathBuf::from(ANNOUNCEMENTS_DIR),
        }
    }
}
