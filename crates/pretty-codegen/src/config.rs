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

//! Represents the structure of the `Codegen.toml` manifest file.
//!
//! Every section is optional; omitted fields fall back to the layout of the
//! engine repository. Paths are relative to the project root.

use crate::cpp::GuardStyle;
use crate::naming::{ShaderFilter, DEFAULT_SHADER_EXTENSIONS};
use crate::registry::FactoryStyle;
use crate::scanner::ScanOrder;
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration of the generation pipeline and its satellite tools.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// The shader embedding generator.
    pub shaders: ShaderConfig,
    /// Plugin registries, generated in declaration order.
    pub registries: Vec<RegistryConfig>,
    /// The public asset cleanup.
    pub assets: AssetConfig,
    /// The native build driven after generation.
    pub build: BuildConfig,
    /// External tools checked before building.
    pub dependencies: Vec<DependencyConfig>,
}

/// Settings of the shader embedding generator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShaderConfig {
    /// Directory holding the shader sources.
    pub source_dir: PathBuf,
    /// Header written by the generator.
    pub output: PathBuf,
    /// Namespace wrapping the generated constants.
    pub namespace: String,
    /// Extensions (without the dot) eligible for embedding.
    pub extensions: Vec<String>,
    /// Inclusion guard of the generated header.
    pub guard: GuardStyle,
    /// Scan order; the output is sorted by symbol either way.
    pub order: ScanOrder,
}

impl ShaderConfig {
    /// The extension allow-set built from [`ShaderConfig::extensions`].
    pub fn filter(&self) -> ShaderFilter {
        ShaderFilter::new(self.extensions.iter().cloned())
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("shaders"),
            output: PathBuf::from("include/PrettyEngine/shaders.hpp"),
            namespace: "Shaders".to_string(),
            extensions: DEFAULT_SHADER_EXTENSIONS.map(String::from).to_vec(),
            guard: GuardStyle::Pragma,
            order: ScanOrder::ByName,
        }
    }
}

/// Settings of one plugin registry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Directory holding one header per plugin type.
    pub source_dir: PathBuf,
    /// Source file written by the generator.
    pub output: PathBuf,
    /// Extension (without the dot) identifying plugin headers.
    pub header_extension: String,
    /// Fully qualified capability interface every plugin implements.
    pub interface: String,
    /// Header declaring the capability interface.
    pub interface_include: String,
    /// Namespace the plugin types live in.
    pub plugin_namespace: String,
    /// Name of the generated factory function.
    pub factory: String,
    /// Shape of the generated factory.
    pub style: FactoryStyle,
    /// Order of includes and instances.
    pub order: ScanOrder,
    /// Inclusion guard of the generated file.
    pub guard: GuardStyle,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("PropertyEditor"),
            output: PathBuf::from("PropertyEditor/PropertyEditor.h"),
            header_extension: "hpp".to_string(),
            interface: "PrettyEngine::PropertyEditor".to_string(),
            interface_include: "PrettyEngine/editor/PropertyEditor.hpp".to_string(),
            plugin_namespace: "Custom".to_string(),
            factory: "GeneratePropertyEditorList".to_string(),
            style: FactoryStyle::List,
            order: ScanOrder::ByName,
            guard: GuardStyle::Pragma,
        }
    }
}

/// Settings of the public asset cleanup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetConfig {
    /// Directory whose direct children are filtered.
    pub public_dir: PathBuf,
    /// Extensions (without the dot) that are deleted.
    pub deny_extensions: Vec<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("Assets/ENGINE_PUBLIC"),
            deny_extensions: crate::assets::DEFAULT_DENY_EXTENSIONS
                .map(String::from)
                .to_vec(),
        }
    }
}

/// CMake build type used for the native build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildProfile {
    /// `-DCMAKE_BUILD_TYPE=Debug`
    #[default]
    Debug,
    /// `-DCMAKE_BUILD_TYPE=Release`
    Release,
}

impl BuildProfile {
    /// The value passed as `CMAKE_BUILD_TYPE`.
    pub fn cmake_build_type(self) -> &'static str {
        match self {
            BuildProfile::Debug => "Debug",
            BuildProfile::Release => "Release",
        }
    }
}

/// Settings of the native build.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// CMake binary directory.
    pub build_dir: PathBuf,
    /// CMake build type.
    pub profile: BuildProfile,
    /// Extensions (without the dot) reported as produced executables.
    pub executable_extensions: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("Build"),
            profile: BuildProfile::Debug,
            executable_extensions: ["exe", "bin", "run", "out"].map(String::from).to_vec(),
        }
    }
}

/// An external tool the native build needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyConfig {
    /// Executable name, probed with `--version`.
    pub tool: String,
    /// Where to get it.
    pub url: String,
}

impl CodegenConfig {
    /// Fills the list sections that were left empty with their defaults.
    ///
    /// An absent `[[registries]]` array means the editor property registry; an
    /// absent `[[dependencies]]` array means CMake and Ninja.
    pub fn with_list_defaults(mut self) -> Self {
        if self.registries.is_empty() {
            self.registries.push(RegistryConfig::default());
        }
        if self.dependencies.is_empty() {
            self.dependencies = default_dependencies();
        }
        self
    }
}

fn default_dependencies() -> Vec<DependencyConfig> {
    vec![
        DependencyConfig {
            tool: "cmake".to_string(),
            url: "https://cmake.org/".to_string(),
        },
        DependencyConfig {
            tool: "ninja".to_string(),
            url: "https://ninja-build.org/".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_manifest_uses_engine_layout() {
        let config: CodegenConfig = toml::from_str("").unwrap();
        let config = config.with_list_defaults();

        assert_eq!(config.shaders.source_dir, PathBuf::from("shaders"));
        assert_eq!(
            config.shaders.output,
            PathBuf::from("include/PrettyEngine/shaders.hpp")
        );
        assert_eq!(config.registries.len(), 1);
        assert_eq!(config.registries[0].factory, "GeneratePropertyEditorList");
        assert_eq!(config.dependencies.len(), 2);
        assert_eq!(config.build.profile, BuildProfile::Debug);
    }

    #[test]
    fn test_full_manifest() {
        let manifest = r#"
            [shaders]
            source_dir = "gpu"
            extensions = ["vert", "frag", "comp"]
            guard = "macro"

            [[registries]]
            source_dir = "PropertyEditor"
            output = "PropertyEditor/PropertyEditor.h"

            [[registries]]
            source_dir = "RenderFeatures"
            output = "RenderFeatures/RenderFeatures.hpp"
            interface = "PrettyEngine::RenderFeature"
            interface_include = "PrettyEngine/RenderFeature.hpp"
            factory = "GetRenderFeature"
            style = "lookup"
            order = "file-system"

            [build]
            profile = "release"

            [[dependencies]]
            tool = "clang"
            url = "https://llvm.org/"
        "#;
        let config: CodegenConfig = toml::from_str(manifest).unwrap();
        let config = config.with_list_defaults();

        assert_eq!(config.shaders.guard, GuardStyle::Macro);
        assert!(config.shaders.filter().accepts_extension("comp"));
        assert!(!config.shaders.filter().accepts_extension("glsl"));
        // Unspecified fields keep their defaults.
        assert_eq!(config.shaders.namespace, "Shaders");

        assert_eq!(config.registries.len(), 2);
        assert_eq!(config.registries[1].style, FactoryStyle::Lookup);
        assert_eq!(config.registries[1].order, ScanOrder::FileSystem);
        assert_eq!(config.registries[1].plugin_namespace, "Custom");

        assert_eq!(config.build.profile.cmake_build_type(), "Release");
        assert_eq!(config.dependencies.len(), 1);
        assert_eq!(config.dependencies[0].tool, "clang");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<CodegenConfig, _> = toml::from_str("[shaders]\nsource = \"x\"\n");
        assert!(result.is_err());
    }
}
