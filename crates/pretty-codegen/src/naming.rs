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

//! Deterministic filename → generated-symbol rules.

use crate::scanner::ScannedEntry;
use std::collections::BTreeSet;

/// Prefix of every embedded shader constant.
pub const SHADER_SYMBOL_PREFIX: &str = "SHADER_";

/// Stage suffix substitutions, applied in this order.
const SHADER_SUBSTITUTIONS: [(&str, &str); 3] = [
    (".glsl", "_GLSL"),
    (".vert", "_VERTEX"),
    (".frag", "_FRAGMENT"),
];

/// Extensions embedded when no explicit list is configured.
pub const DEFAULT_SHADER_EXTENSIONS: [&str; 3] = ["vert", "frag", "glsl"];

/// Derives the constant name for a shader file.
///
/// `basic.vert` becomes `SHADER_BASIC_VERTEX`. Characters that cannot appear in
/// a C++ identifier are replaced with `_`.
pub fn shader_symbol(file_name: &str) -> String {
    let mut symbol = format!("{SHADER_SYMBOL_PREFIX}{file_name}");
    for (from, to) in SHADER_SUBSTITUTIONS {
        symbol = symbol.replace(from, to);
    }

    symbol
        .to_uppercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Derives the plugin type name from a header file name.
///
/// Returns `None` when the file does not end in `.<header_extension>` or the
/// remaining stem is empty. A leading dot on `header_extension` is ignored.
/// The stem is used verbatim.
pub fn plugin_type_name(file_name: &str, header_extension: &str) -> Option<String> {
    let stem = file_name
        .strip_suffix(header_extension.trim_start_matches('.'))?
        .strip_suffix('.')?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// The explicit set of extensions eligible for shader embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderFilter {
    extensions: BTreeSet<String>,
}

impl ShaderFilter {
    /// Creates a filter from extensions given without the leading dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.into().trim_start_matches('.').to_string())
                .collect(),
        }
    }

    /// Returns `true` if `extension` (without the dot) is in the allow-set.
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    /// Returns `true` if `entry` is a regular file with an allowed extension.
    pub fn accepts(&self, entry: &ScannedEntry) -> bool {
        entry.is_file
            && entry
                .extension
                .as_deref()
                .is_some_and(|ext| self.accepts_extension(ext))
    }

    /// Iterates the allowed extensions in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Default for ShaderFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SHADER_EXTENSIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(name: &str, extension: Option<&str>) -> ScannedEntry {
        ScannedEntry {
            name: name.to_string(),
            extension: extension.map(str::to_string),
            path: PathBuf::from(name),
            is_file: true,
        }
    }

    #[test]
    fn test_shader_symbol_stage_suffixes() {
        assert_eq!(shader_symbol("basic.vert"), "SHADER_BASIC_VERTEX");
        assert_eq!(shader_symbol("basic.frag"), "SHADER_BASIC_FRAGMENT");
        assert_eq!(shader_symbol("lighting.glsl"), "SHADER_LIGHTING_GLSL");
    }

    #[test]
    fn test_shader_symbol_replaces_every_occurrence_in_order() {
        assert_eq!(shader_symbol("post.vert.glsl"), "SHADER_POST_VERTEX_GLSL");
        assert_eq!(shader_symbol("a.frag.frag"), "SHADER_A_FRAGMENT_FRAGMENT");
    }

    #[test]
    fn test_shader_symbol_sanitizes_identifier() {
        assert_eq!(shader_symbol("sky.box.vert"), "SHADER_SKY_BOX_VERTEX");
        assert_eq!(shader_symbol("bloom-pass.frag"), "SHADER_BLOOM_PASS_FRAGMENT");
        assert_eq!(shader_symbol("noise.comp"), "SHADER_NOISE_COMP");
    }

    #[test]
    fn test_shader_symbol_is_deterministic() {
        let first = shader_symbol("Sprite.Vert");
        for _ in 0..10 {
            assert_eq!(shader_symbol("Sprite.Vert"), first);
        }
        // Suffix matching is case-sensitive; only the final pass upper-cases.
        assert_eq!(first, "SHADER_SPRITE_VERT");
    }

    #[test]
    fn test_plugin_type_name() {
        assert_eq!(
            plugin_type_name("EditorPropertyBool.hpp", "hpp").as_deref(),
            Some("EditorPropertyBool")
        );
        assert_eq!(plugin_type_name("RF_Light.hpp", "hpp").as_deref(), Some("RF_Light"));
        assert_eq!(plugin_type_name("PropertyEditor.h", "hpp"), None);
        assert_eq!(plugin_type_name("notes_hpp", "hpp"), None);
        assert_eq!(plugin_type_name(".hpp", "hpp"), None);
    }

    #[test]
    fn test_plugin_type_name_with_dotted_extension() {
        assert_eq!(plugin_type_name("A.hpp", ".hpp").as_deref(), Some("A"));
        assert_eq!(plugin_type_name("A.h", ".hpp"), None);
    }

    #[test]
    fn test_default_filter_is_an_allow_list() {
        let filter = ShaderFilter::default();
        assert!(filter.accepts(&file("a.vert", Some("vert"))));
        assert!(filter.accepts(&file("a.frag", Some("frag"))));
        assert!(filter.accepts(&file("a.glsl", Some("glsl"))));

        assert!(!filter.accepts(&file("readme.md", Some("md"))));
        assert!(!filter.accepts(&file("a.VERT", Some("VERT"))));
        assert!(!filter.accepts(&file("Makefile", None)));

        let mut dir = file("shaders.glsl", Some("glsl"));
        dir.is_file = false;
        assert!(!filter.accepts(&dir));
    }

    #[test]
    fn test_filter_accepts_dotted_configuration() {
        let filter = ShaderFilter::new([".comp", "vert"]);
        assert!(filter.accepts_extension("comp"));
        assert!(filter.accepts_extension("vert"));
        assert!(!filter.accepts_extension("frag"));
        assert_eq!(filter.extensions().collect::<Vec<_>>(), vec!["comp", "vert"]);
    }
}
