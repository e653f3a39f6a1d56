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

//! Generates static registration code for a directory of plugin headers.
//!
//! Each header `Foo.hpp` of the plugin directory is trusted to declare a
//! default-constructible type `<namespace>::Foo` implementing the capability
//! interface. The generated source includes every header and exposes a factory
//! that instantiates each type and upcasts it statically, so adding a plugin
//! never requires hand-written registration.

use crate::config::RegistryConfig;
use crate::cpp::{self, IncludeGuard};
use crate::error::Result;
use crate::naming;
use crate::scanner::{self, ScanOrder};
use crate::writer::GeneratedArtifact;
use serde::Deserialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Shape of the generated factory function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FactoryStyle {
    /// Returns a `std::vector` holding one instance of every plugin.
    #[default]
    List,
    /// Takes a type name and returns a new instance of it, or `nullptr`.
    Lookup,
}

/// A plugin type found in the plugin directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredType {
    /// Type name, the header's file name without its extension.
    pub type_name: String,
    /// Header file name, used as the include target.
    pub header: String,
}

/// Lists the plugin types declared in `dir`.
///
/// Only regular files ending in `.<header_extension>` count; the extension may
/// be written with or without its leading dot. `exclude` is skipped, also when
/// spelled through `..` or a link, so a registry written into its own plugin
/// directory never registers itself.
pub fn discover_plugins(
    dir: &Path,
    header_extension: &str,
    order: ScanOrder,
    exclude: Option<&Path>,
) -> Result<Vec<DiscoveredType>> {
    let header_extension = header_extension.trim_start_matches('.');
    let excluded = exclude.and_then(|path| fs::canonicalize(path).ok());

    let mut discovered = Vec::new();
    for entry in scanner::scan_directory(dir, order)? {
        if exclude.is_some_and(|path| entry.path == path)
            || is_same_file(&entry.path, excluded.as_deref())
        {
            continue;
        }
        if !entry.has_extension(header_extension) {
            continue;
        }
        if let Some(type_name) = naming::plugin_type_name(&entry.name, header_extension) {
            log::debug!("Discovered plugin type '{type_name}'");
            discovered.push(DiscoveredType {
                type_name,
                header: entry.name,
            });
        }
    }
    Ok(discovered)
}

fn is_same_file(path: &Path, canonical: Option<&Path>) -> bool {
    canonical.is_some_and(|canonical| {
        fs::canonicalize(path).is_ok_and(|resolved| resolved == canonical)
    })
}

/// Everything the renderer needs to know about the type family.
#[derive(Debug, Clone, Copy)]
pub struct RegistryLayout<'a> {
    /// Fully qualified capability interface.
    pub interface: &'a str,
    /// Include target declaring the interface.
    pub interface_include: &'a str,
    /// Namespace qualifying every plugin type; may be empty.
    pub plugin_namespace: &'a str,
    /// Factory function name.
    pub factory: &'a str,
    /// Factory shape.
    pub style: FactoryStyle,
}

impl<'a> From<&'a RegistryConfig> for RegistryLayout<'a> {
    fn from(config: &'a RegistryConfig) -> Self {
        Self {
            interface: &config.interface,
            interface_include: &config.interface_include,
            plugin_namespace: &config.plugin_namespace,
            factory: &config.factory,
            style: config.style,
        }
    }
}

impl RegistryLayout<'_> {
    fn qualified(&self, type_name: &str) -> String {
        if self.plugin_namespace.is_empty() {
            type_name.to_string()
        } else {
            format!("{}::{}", self.plugin_namespace, type_name)
        }
    }

    /// `PrettyEngine::PropertyEditor` → `PropertyEditor`.
    fn interface_short_name(&self) -> &str {
        self.interface.rsplit("::").next().unwrap_or(self.interface)
    }

    fn upcast_instance(&self, type_name: &str) -> String {
        format!(
            "std::static_pointer_cast<{}>(std::make_shared<{}>())",
            self.interface,
            self.qualified(type_name)
        )
    }
}

/// Renders the registry source for `types`, preserving their order.
pub fn render_registry(types: &[DiscoveredType], layout: &RegistryLayout<'_>, guard: &IncludeGuard) -> String {
    let mut out = guard.open();

    out.push_str(&cpp::include_line(layout.interface_include));
    out.push_str(&cpp::include_line("memory"));
    match layout.style {
        FactoryStyle::List => out.push_str(&cpp::include_line("vector")),
        FactoryStyle::Lookup => out.push_str(&cpp::include_line("string")),
    }
    out.push('\n');

    out.push_str("// Generated files\n");
    for plugin in types {
        out.push_str(&cpp::include_line(&plugin.header));
    }
    out.push('\n');

    match layout.style {
        FactoryStyle::List => render_list_factory(&mut out, types, layout),
        FactoryStyle::Lookup => render_lookup_factory(&mut out, types, layout),
    }

    out.push_str(&guard.close());
    out
}

fn render_list_factory(out: &mut String, types: &[DiscoveredType], layout: &RegistryLayout<'_>) {
    let collection = format!("std::vector<std::shared_ptr<{}>>", layout.interface);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "/// Create an instance of all {}", layout.interface_short_name());
    let _ = writeln!(out, "static {collection} {}() {{", layout.factory);
    let _ = writeln!(out, "\t{collection} result;");
    out.push('\n');

    for plugin in types {
        let _ = writeln!(out, "\tresult.push_back({});", layout.upcast_instance(&plugin.type_name));
    }
    if !types.is_empty() {
        out.push('\n');
    }

    out.push_str("\treturn result;\n}\n");
}

fn render_lookup_factory(out: &mut String, types: &[DiscoveredType], layout: &RegistryLayout<'_>) {
    let _ = writeln!(
        out,
        "/// Create the {} registered under `name`, or nullptr if there is none",
        layout.interface_short_name()
    );
    let _ = writeln!(
        out,
        "static std::shared_ptr<{}> {}(const std::string& name) {{",
        layout.interface, layout.factory
    );

    for plugin in types {
        let _ = writeln!(out, "\tif (name == \"{}\") {{", plugin.type_name);
        let _ = writeln!(out, "\t\treturn {};", layout.upcast_instance(&plugin.type_name));
        out.push_str("\t}\n");
    }

    out.push_str("\treturn nullptr;\n}\n");
}

/// Builds the registry artifact described by `config`, relative to `root`.
pub fn generate_registry(root: &Path, config: &RegistryConfig) -> Result<(GeneratedArtifact, usize)> {
    let source_dir = root.join(&config.source_dir);
    let output = root.join(&config.output);

    let types = discover_plugins(
        &source_dir,
        &config.header_extension,
        config.order,
        Some(&output),
    )?;

    let guard = IncludeGuard::for_path(config.guard, &output);
    let contents = render_registry(&types, &RegistryLayout::from(config), &guard);
    Ok((GeneratedArtifact::new(output, contents), types.len()))
}
