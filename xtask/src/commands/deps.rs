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

use crate::commands::Context;
use crate::helpers::*;
use pretty_codegen::config::DependencyConfig;

/// Returns the tools that do not answer `--version`.
pub fn missing_tools(dependencies: &[DependencyConfig]) -> Vec<&DependencyConfig> {
    dependencies
        .iter()
        .filter(|dep| {
            let found = probe_command(&dep.tool, &["--version"]);
            log::debug!("Probing '{}': {}", dep.tool, if found { "found" } else { "missing" });
            !found
        })
        .collect()
}

/// Reports missing external tools. Advisory only: never fails.
pub fn check(ctx: &Context) -> Vec<&DependencyConfig> {
    print_task_start("Checking Dependencies", MAGNIFIER, YELLOW);

    let missing = missing_tools(&ctx.config.dependencies);
    if missing.is_empty() {
        print_success("All required tools are installed.");
    } else {
        log::warn!("{} required tool(s) are missing", missing.len());
        println!("{}{}List of dependencies that are missing:{}", BOLD, YELLOW, RESET);
        for dep in &missing {
            println!("  - {} ({})", dep.tool, dep.url);
        }
    }
    missing
}
