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

//! Generated artifacts and their atomic replacement on disk.

use crate::error::{CodegenError, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// How a rendered artifact compares to the file currently on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    /// The file on disk is byte-identical to the rendered content.
    UpToDate,
    /// The file exists but its content differs.
    Stale,
    /// No file exists at the destination.
    Missing,
}

/// The full content of a generated file together with its destination.
///
/// Artifacts are rendered entirely in memory; [`GeneratedArtifact::write`] then
/// replaces the destination in a single rename so it is never observed empty,
/// partial or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Where the artifact is written.
    pub path: PathBuf,
    /// The complete file content.
    pub contents: Vec<u8>,
}

impl GeneratedArtifact {
    /// Creates an artifact for `path`.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Returns the content as text, replacing invalid UTF-8 sequences.
    pub fn contents_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.contents)
    }

    /// Replaces the destination with this artifact.
    ///
    /// The content goes to a temporary file in the destination directory which
    /// is then renamed over the destination. Missing parent directories are
    /// created. On failure the previous file, if any, is left untouched.
    pub fn write(&self) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| CodegenError::write(parent, e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| self.write_error(e))?;
        temp.write_all(&self.contents)
            .and_then(|()| temp.flush())
            .map_err(|e| self.write_error(e))?;
        copy_permissions(&self.path, temp.as_file()).map_err(|e| self.write_error(e))?;

        temp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        log::debug!(
            "Wrote {} bytes to '{}'",
            self.contents.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Compares the artifact with the file currently at its destination.
    pub fn status(&self) -> Result<ArtifactStatus> {
        match fs::read(&self.path) {
            Ok(existing) if existing == self.contents => Ok(ArtifactStatus::UpToDate),
            Ok(_) => Ok(ArtifactStatus::Stale),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ArtifactStatus::Missing),
            Err(e) => Err(CodegenError::read(&self.path, e)),
        }
    }

    fn write_error(&self, source: io::Error) -> CodegenError {
        CodegenError::write(&self.path, source)
    }
}

/// Gives the temporary file the permissions a plainly created file would have.
fn copy_permissions(destination: &Path, temp: &fs::File) -> io::Result<()> {
    match fs::metadata(destination) {
        Ok(existing) => temp.set_permissions(existing.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => default_permissions(temp),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn default_permissions(temp: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    temp.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions(_temp: &fs::File) -> io::Result<()> {
    Ok(())
}
