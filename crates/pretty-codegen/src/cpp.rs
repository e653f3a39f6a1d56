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

//! Small C++ emission helpers shared by the generators.

use serde::Deserialize;
use std::path::Path;

/// How a generated header protects itself against double inclusion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuardStyle {
    /// `#pragma once`
    #[default]
    Pragma,
    /// `#ifndef H_NAME` / `#define H_NAME` / `#endif`
    Macro,
}

/// Opening and closing lines of an inclusion guard for a given file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeGuard {
    style: GuardStyle,
    macro_name: String,
}

impl IncludeGuard {
    /// Builds the guard for the header written at `path`.
    pub fn for_path(style: GuardStyle, path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            style,
            macro_name: format!("H_{}", to_macro_case(&stem)),
        }
    }

    /// Text placed at the very top of the file, followed by a blank line.
    pub fn open(&self) -> String {
        match self.style {
            GuardStyle::Pragma => "#pragma once\n\n".to_string(),
            GuardStyle::Macro => format!(
                "#ifndef {0}\n#define {0}\n\n",
                self.macro_name
            ),
        }
    }

    /// Text placed at the very end of the file.
    pub fn close(&self) -> String {
        match self.style {
            GuardStyle::Pragma => String::new(),
            GuardStyle::Macro => format!("\n#endif // {}\n", self.macro_name),
        }
    }
}

/// `PostProcess-Pass` → `POSTPROCESS_PASS`.
fn to_macro_case(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// `#include <target>` followed by a newline.
pub fn include_line(target: &str) -> String {
    format!("#include <{target}>\n")
}

/// Longest delimiter C++ accepts in a raw string literal.
const MAX_RAW_DELIMITER_LEN: usize = 16;

/// Picks the shortest raw-string delimiter whose closing sequence `)delim"`
/// does not appear in `content`.
pub fn raw_string_delimiter(content: &[u8]) -> String {
    if !contains(content, b")\"") {
        return String::new();
    }
    (0u32..)
        .map(|n| format!("PE{n}"))
        .take_while(|d| d.len() <= MAX_RAW_DELIMITER_LEN)
        .find(|d| !contains(content, format!("){d}\"").as_bytes()))
        // Fourteen digits of candidates; unreachable for real shader sources.
        .unwrap_or_else(|| "PE".to_string())
}

/// Wraps `content` verbatim into a C++ raw string literal.
pub fn raw_string_literal(content: &[u8]) -> Vec<u8> {
    let delimiter = raw_string_delimiter(content);
    let mut literal = Vec::with_capacity(content.len() + 2 * delimiter.len() + 5);
    literal.extend_from_slice(b"R\"");
    literal.extend_from_slice(delimiter.as_bytes());
    literal.push(b'(');
    literal.extend_from_slice(content);
    literal.push(b')');
    literal.extend_from_slice(delimiter.as_bytes());
    literal.push(b'"');
    literal
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
