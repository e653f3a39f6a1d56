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
use anyhow::{Context as _, Result};
use pretty_codegen::{ArtifactKind, ArtifactStatus, GenerationReport, Pipeline};

/// Regenerates every artifact, or with `check` only verifies they are current.
pub fn generate(ctx: &Context, check: bool) -> Result<()> {
    print_task_start("Generating Sources", GEAR, MAGENTA);
    let pipeline = Pipeline::new(&ctx.root, ctx.config.clone());

    if check {
        let report = pipeline
            .check()
            .context("Failed to render generated sources")?;
        print_report(&report);
        if !report.is_up_to_date() {
            let outdated: Vec<String> = report
                .outdated()
                .map(|artifact| artifact.path.display().to_string())
                .collect();
            anyhow::bail!(
                "Generated sources are out of date: {} (run `cargo xtask generate`)",
                outdated.join(", ")
            );
        }
        print_success("Generated sources are up to date.");
        return Ok(());
    }

    let report = pipeline.run().context("Source generation failed")?;
    print_report(&report);
    print_success(&format!("Generated {} file(s).", report.artifacts.len()));
    Ok(())
}

fn print_report(report: &GenerationReport) {
    for artifact in &report.artifacts {
        let what = match artifact.kind {
            ArtifactKind::ShaderHeader => "shaders",
            ArtifactKind::Registry => "plugins",
        };
        let (color, mark) = match artifact.status {
            ArtifactStatus::UpToDate => (GREEN, CHECK),
            ArtifactStatus::Stale | ArtifactStatus::Missing => (YELLOW, CROSS),
        };
        println!(
            "{}{} {} {}{} '{}' ({} {}, {:.2} KB) [{:?}]",
            BOLD,
            color,
            mark,
            RESET,
            what,
            artifact.path.display(),
            artifact.entries,
            what,
            artifact.bytes as f64 / 1024.0,
            artifact.status
        );
    }
}
