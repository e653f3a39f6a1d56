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

//! Runs every configured generator in a fixed order.
//!
//! The shader header is generated first, then each registry in the order it is
//! declared. The first error aborts the run; artifacts already replaced by
//! earlier generators stay replaced, later ones are left untouched.

use crate::config::CodegenConfig;
use crate::error::Result;
use crate::registry;
use crate::shaders;
use crate::writer::{ArtifactStatus, GeneratedArtifact};
use std::path::{Path, PathBuf};

/// Which generator produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The embedded shader header.
    ShaderHeader,
    /// A plugin registry source.
    Registry,
}

/// The outcome for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    /// Generator that produced the artifact.
    pub kind: ArtifactKind,
    /// Destination of the artifact.
    pub path: PathBuf,
    /// Embedded shaders or registered plugin types.
    pub entries: usize,
    /// Size of the rendered content.
    pub bytes: usize,
    /// Comparison with the file on disk; always `UpToDate` after a write.
    pub status: ArtifactStatus,
}

/// The outcome of a whole pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// One report per artifact, in generation order.
    pub artifacts: Vec<ArtifactReport>,
}

impl GenerationReport {
    /// Returns `true` if every artifact matches its file on disk.
    pub fn is_up_to_date(&self) -> bool {
        self.artifacts
            .iter()
            .all(|artifact| artifact.status == ArtifactStatus::UpToDate)
    }

    /// Iterates the artifacts that do not match their file on disk.
    pub fn outdated(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts
            .iter()
            .filter(|artifact| artifact.status != ArtifactStatus::UpToDate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Write,
    Check,
}

/// The generation pipeline for one project.
#[derive(Debug, Clone)]
pub struct Pipeline {
    root: PathBuf,
    config: CodegenConfig,
}

impl Pipeline {
    /// Creates a pipeline resolving the configured paths against `root`.
    pub fn new(root: impl Into<PathBuf>, config: CodegenConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configuration in use.
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generates and replaces every artifact.
    pub fn run(&self) -> Result<GenerationReport> {
        self.execute(Mode::Write)
    }

    /// Renders every artifact and compares it with the file on disk without
    /// writing anything.
    pub fn check(&self) -> Result<GenerationReport> {
        self.execute(Mode::Check)
    }

    fn execute(&self, mode: Mode) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();

        let (header, shaders) = shaders::generate_shader_header(&self.root, &self.config.shaders)?;
        report
            .artifacts
            .push(finish(header, shaders, ArtifactKind::ShaderHeader, mode)?);

        for registry_config in &self.config.registries {
            let (source, plugins) = registry::generate_registry(&self.root, registry_config)?;
            report
                .artifacts
                .push(finish(source, plugins, ArtifactKind::Registry, mode)?);
        }

        Ok(report)
    }
}

fn finish(
    artifact: GeneratedArtifact,
    entries: usize,
    kind: ArtifactKind,
    mode: Mode,
) -> Result<ArtifactReport> {
    let status = match mode {
        Mode::Write => {
            artifact.write()?;
            log::info!(
                "Succeed to generate '{}' ({} entries)",
                artifact.path.display(),
                entries
            );
            ArtifactStatus::UpToDate
        }
        Mode::Check => {
            let status = artifact.status()?;
            log::info!("'{}' is {:?}", artifact.path.display(), status);
            status
        }
    };

    Ok(ArtifactReport {
        kind,
        bytes: artifact.contents.len(),
        path: artifact.path,
        entries,
        status,
    })
}
