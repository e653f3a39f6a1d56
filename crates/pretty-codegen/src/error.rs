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

//! Errors raised by the generation pipeline.
//!
//! None of them is recoverable: callers are expected to propagate them up to a
//! single top-level handler and abort the build.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A failure of the generation pipeline.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A directory to scan does not exist, is not a directory, or cannot be listed.
    #[error("directory '{}' is missing or unreadable", path.display())]
    MissingDirectory {
        /// The directory that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A source file could not be read.
    #[error("failed to read '{}'", path.display())]
    ReadFailure {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// An artifact could not be written, or a file could not be removed.
    #[error("failed to write '{}'", path.display())]
    WriteFailure {
        /// The destination that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl CodegenError {
    pub(crate) fn missing_directory(path: &Path, source: io::Error) -> Self {
        Self::MissingDirectory {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::ReadFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Self::WriteFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the path the failure is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::MissingDirectory { path, .. }
            | Self::ReadFailure { path, .. }
            | Self::WriteFailure { path, .. } => path,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodegenError>;
