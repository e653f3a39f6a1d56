// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Non-recursive directory listing shared by every generator.

use crate::error::{CodegenError, Result};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The order in which [`scan_directory`] returns entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanOrder {
    /// Whatever order the file system yields.
    FileSystem,
    /// Sorted by file name.
    #[default]
    ByName,
}

/// A direct child of a scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedEntry {
    /// The file name, including its extension.
    pub name: String,
    /// The extension without the leading dot, if any.
    pub extension: Option<String>,
    /// The full path of the entry.
    pub path: PathBuf,
    /// `true` for regular files (symbolic links are followed).
    pub is_file: bool,
}

impl ScannedEntry {
    /// Returns `true` if this is a regular file carrying exactly `extension`.
    pub fn has_extension(&self, extension: &str) -> bool {
        self.is_file && self.extension.as_deref() == Some(extension)
    }
}

/// Lists the direct children of `dir`.
///
/// # Errors
///
/// Returns [`CodegenError::MissingDirectory`] if `dir` does not exist, is not a
/// directory, or cannot be listed, and [`CodegenError::ReadFailure`] naming the
/// entry if one of its children cannot be resolved (a dangling link, say).
pub fn scan_directory(dir: &Path, order: ScanOrder) -> Result<Vec<ScannedEntry>> {
    let metadata = fs::metadata(dir).map_err(|e| CodegenError::missing_directory(dir, e))?;
    if !metadata.is_dir() {
        return Err(CodegenError::missing_directory(
            dir,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);
    if order == ScanOrder::ByName {
        walker = walker.sort_by_file_name();
    }

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            if e.depth() == 0 {
                return CodegenError::missing_directory(dir, e.into());
            }
            let path = e.path().unwrap_or(dir).to_path_buf();
            CodegenError::read(&path, e.into())
        })?;
        let path = entry.path();
        entries.push(ScannedEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            extension: path
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned()),
            is_file: entry.file_type().is_file(),
            path: entry.into_path(),
        });
    }

    log::debug!("Scanned {} entries in '{}'", entries.len(), dir.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_lists_direct_children_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.frag"), "b").unwrap();
        fs::write(dir.path().join("a.vert"), "a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.glsl"), "deep").unwrap();

        let entries = scan_directory(dir.path(), ScanOrder::ByName).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.vert", "b.frag", "nested"]);

        assert_eq!(entries[0].extension.as_deref(), Some("vert"));
        assert!(entries[0].is_file);
        assert!(!entries[2].is_file);
        assert_eq!(entries[2].extension, None);
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = scan_directory(&missing, ScanOrder::FileSystem).unwrap_err();
        assert!(matches!(err, CodegenError::MissingDirectory { .. }));
        assert_eq!(err.path(), missing.as_path());
    }

    #[test]
    fn test_scan_file_instead_of_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let err = scan_directory(&file, ScanOrder::ByName).unwrap_err();
        assert!(matches!(err, CodegenError::MissingDirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_dangling_link_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.vert"), "a").unwrap();
        std::os::unix::fs::symlink("nowhere.vert", dir.path().join("basic.vert")).unwrap();

        let err = scan_directory(dir.path(), ScanOrder::ByName).unwrap_err();
        assert!(matches!(err, CodegenError::ReadFailure { .. }));
        assert_eq!(err.path(), dir.path().join("basic.vert").as_path());
    }

    #[test]
    fn test_has_extension_requires_regular_file() {
        let entry = ScannedEntry {
            name: "dir.hpp".to_string(),
            extension: Some("hpp".to_string()),
            path: PathBuf::from("dir.hpp"),
            is_file: false,
        };
        assert!(!entry.has_extension("hpp"));
    }
}
