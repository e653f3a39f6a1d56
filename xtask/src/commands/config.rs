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

use crate::helpers::*;
use anyhow::{Context as _, Result};
use pretty_codegen::config::BuildProfile;
use pretty_codegen::CodegenConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the manifest looked up in the project root.
pub const MANIFEST_NAME: &str = "Codegen.toml";

/// Everything a command needs: where the project lives and how it is set up.
#[derive(Debug, Clone)]
pub struct Context {
    pub root: PathBuf,
    pub config: CodegenConfig,
}

impl Context {
    /// Loads the manifest for `root`.
    ///
    /// An explicit `manifest` must exist. Without one, `<root>/Codegen.toml` is
    /// used when present and the default configuration otherwise.
    pub fn load(root: PathBuf, manifest: Option<&Path>) -> Result<Self> {
        let config = match manifest {
            Some(path) => read_manifest(path)?,
            None => {
                let default_path = root.join(MANIFEST_NAME);
                if default_path.exists() {
                    read_manifest(&default_path)?
                } else {
                    print_info(&format!(
                        "No '{}' found. Using default configuration.",
                        default_path.display()
                    ));
                    CodegenConfig::default()
                }
            }
        };

        Ok(Self {
            root,
            config: config.with_list_defaults(),
        })
    }

    /// Switches the native build to release when `release` is set.
    pub fn force_release(&mut self, release: bool) {
        if release {
            self.config.build.profile = BuildProfile::Release;
        }
    }
}

fn read_manifest(path: &Path) -> Result<CodegenConfig> {
    print_info(&format!("Found '{}'. Loading configuration.", path.display()));
    let manifest_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest file at '{}'", path.display()))?;
    toml::from_str(&manifest_str)
        .with_context(|| format!("Failed to parse TOML from '{}'", path.display()))
}
