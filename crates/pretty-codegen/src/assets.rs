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

//! Removes authoring files the engine cannot load from the public asset tree.

use crate::error::{CodegenError, Result};
use crate::scanner::{self, ScanOrder};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions removed when no explicit list is configured.
pub const DEFAULT_DENY_EXTENSIONS: [&str; 5] = ["blend", "blend1", "fbx", "mp3", "mp4"];

/// Deletes the direct children of `dir` whose extension is in `deny`.
///
/// Subdirectories are left alone. Returns the removed paths in name order.
pub fn clear_disallowed_assets<S: AsRef<str>>(dir: &Path, deny: &[S]) -> Result<Vec<PathBuf>> {
    log::info!("Removing files the engine does not support from '{}'", dir.display());

    let mut removed = Vec::new();
    for entry in scanner::scan_directory(dir, ScanOrder::ByName)? {
        if !entry.is_file {
            continue;
        }

        let denied = entry
            .extension
            .as_deref()
            .is_some_and(|ext| deny.iter().any(|d| d.as_ref() == ext));
        if denied {
            fs::remove_file(&entry.path).map_err(|e| CodegenError::write(&entry.path, e))?;
            log::info!("Removed: {}", entry.path.display());
            removed.push(entry.path);
            continue;
        }

        // Assets are shipped with a `<name>.meta` sidecar.
        if entry.extension.as_deref() != Some("meta") && !meta_path(&entry.path).exists() {
            log::info!("No meta file for '{}', maybe an unused file", entry.path.display());
        }
    }
    Ok(removed)
}

fn meta_path(asset: &Path) -> PathBuf {
    let mut name = asset.as_os_str().to_owned();
    name.push(".meta");
    PathBuf::from(name)
}
