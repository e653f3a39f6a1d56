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

//! Embeds shader sources into a generated C++ header.
//!
//! Each eligible file of the shader directory becomes one
//! `static const char*` constant holding the file's bytes verbatim inside a
//! raw string literal. Constants are emitted in ascending symbol order, so the
//! header is byte-identical for an unchanged directory regardless of the order
//! in which the file system lists it.

use crate::config::ShaderConfig;
use crate::cpp::{self, IncludeGuard};
use crate::error::{CodegenError, Result};
use crate::naming::{self, ShaderFilter};
use crate::scanner::{self, ScanOrder};
use crate::writer::GeneratedArtifact;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Ordered mapping from shader symbol to raw source bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddingTable {
    entries: BTreeMap<String, Vec<u8>>,
}

impl EmbeddingTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every eligible file of `dir` into a new table.
    pub fn from_directory(dir: &Path, filter: &ShaderFilter, order: ScanOrder) -> Result<Self> {
        let mut table = Self::new();
        for entry in scanner::scan_directory(dir, order)? {
            if !filter.accepts(&entry) {
                log::debug!("Skipping '{}': not an embeddable shader", entry.name);
                continue;
            }

            let content =
                fs::read(&entry.path).map_err(|e| CodegenError::read(&entry.path, e))?;
            let symbol = naming::shader_symbol(&entry.name);
            log::debug!("Embedding '{}' as {}", entry.name, symbol);

            if table.insert(symbol.clone(), content).is_some() {
                log::warn!(
                    "'{}' maps to {} which was already taken; the earlier shader is replaced",
                    entry.name,
                    symbol
                );
            }
        }
        Ok(table)
    }

    /// Inserts an entry, returning the content it replaced, if any.
    pub fn insert(&mut self, symbol: String, content: Vec<u8>) -> Option<Vec<u8>> {
        self.entries.insert(symbol, content)
    }

    /// Returns the content stored under `symbol`.
    pub fn get(&self, symbol: &str) -> Option<&[u8]> {
        self.entries.get(symbol).map(Vec::as_slice)
    }

    /// Iterates entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(symbol, content)| (symbol.as_str(), content.as_slice()))
    }

    /// Number of embedded shaders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no shader is embedded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders the header text for `table`.
pub fn render_shader_header(table: &EmbeddingTable, namespace: &str, guard: &IncludeGuard) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(guard.open().as_bytes());
    out.extend_from_slice(format!("namespace {namespace} {{\n\n").as_bytes());

    for (symbol, content) in table.iter() {
        out.extend_from_slice(b"/// Generated shader variable from file\n");
        out.extend_from_slice(format!("static const char* {symbol} = ").as_bytes());
        out.extend_from_slice(&cpp::raw_string_literal(content));
        out.extend_from_slice(b";\n\n");
    }

    out.extend_from_slice(format!("}} // {namespace}\n").as_bytes());
    out.extend_from_slice(guard.close().as_bytes());
    out
}

/// Builds the shader header artifact described by `config`, relative to `root`.
pub fn generate_shader_header(root: &Path, config: &ShaderConfig) -> Result<(GeneratedArtifact, usize)> {
    let source_dir = root.join(&config.source_dir);
    let output = root.join(&config.output);

    let table = EmbeddingTable::from_directory(&source_dir, &config.filter(), config.order)?;
    for (symbol, _) in table.iter() {
        log::info!("Generate: {symbol}");
    }

    let guard = IncludeGuard::for_path(config.guard, &output);
    let contents = render_shader_header(&table, &config.namespace, &guard);
    Ok((GeneratedArtifact::new(output, contents), table.len()))
}
