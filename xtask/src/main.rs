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

// Build automation and source generation for Pretty Engine
// Run with: cargo xtask <command>

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Context;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "xtask", version, about = "Pretty Engine build automation")]
struct Cli {
    /// Project root every configured path is relative to
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Configuration file [default: <root>/Codegen.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Task>,
}

#[derive(Subcommand)]
enum Task {
    /// Generate the shader header and the plugin registries
    Generate {
        /// Only verify the generated files are up to date
        #[arg(long)]
        check: bool,
    },
    /// Remove unsupported files from the public asset directory
    CleanAssets,
    /// Report missing external build tools
    CheckDeps,
    /// Generate sources, then configure and compile with CMake and Ninja
    Build {
        /// Build with CMAKE_BUILD_TYPE=Release
        #[arg(long)]
        release: bool,
    },
    /// Run clean-assets, generate and build
    All {
        /// Build with CMAKE_BUILD_TYPE=Release
        #[arg(long)]
        release: bool,
    },
}

fn main() -> ExitCode {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Some(task) = cli.command else {
        helpers::print_custom_help();
        return Ok(());
    };

    let mut ctx = Context::load(cli.root, cli.config.as_deref())?;
    match task {
        Task::Generate { check } => commands::generate::generate(&ctx, check),
        Task::CleanAssets => commands::assets::clean(&ctx),
        Task::CheckDeps => {
            commands::deps::check(&ctx);
            Ok(())
        }
        Task::Build { release } => {
            ctx.force_release(release);
            commands::build::build(&ctx)
        }
        Task::All { release } => {
            ctx.force_release(release);
            commands::build::all(&ctx)
        }
    }
}
