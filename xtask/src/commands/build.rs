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

use crate::commands::{deps, generate, Context};
use crate::helpers::*;
use anyhow::{Context as _, Result};
use pretty_codegen::scanner::{scan_directory, ScanOrder};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// An executable produced by the native build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltExecutable {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
}

/// Generates the sources, then configures and compiles the engine.
///
/// Generation runs first and must succeed: the native build consumes the
/// generated files and must never compile against missing or stale ones.
pub fn build(ctx: &Context) -> Result<()> {
    deps::check(ctx);
    generate::generate(ctx, false)?;
    compile(ctx)
}

fn compile(ctx: &Context) -> Result<()> {
    print_task_start("Building Engine", HAMMER, BLUE);
    let settings = &ctx.config.build;
    let build_dir = ctx.root.join(&settings.build_dir);

    print_info("Clearing temporary files");
    clear_public_output(&build_dir)?;

    let cmake_args: Vec<OsString> = vec![
        "-S".into(),
        ctx.root.clone().into(),
        "-G".into(),
        "Ninja".into(),
        "-B".into(),
        build_dir.clone().into(),
        format!("-DCMAKE_BUILD_TYPE={}", settings.profile.cmake_build_type()).into(),
    ];
    execute_command("cmake", &cmake_args, "CMake")?;

    let ninja_args: Vec<OsString> = vec!["-C".into(), build_dir.clone().into()];
    execute_command("ninja", &ninja_args, "Ninja")?;

    let executables = list_executables(&build_dir, &settings.executable_extensions)?;
    println!("{}Executable files:{}", BOLD, RESET);
    for exe in &executables {
        let age = exe
            .modified
            .and_then(|modified| modified.elapsed().ok())
            .map(format_age)
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "{}  - {} (modified {}){}",
            CYAN,
            exe.path.display(),
            age,
            RESET
        );
    }
    Ok(())
}

/// Removes `<build_dir>/public`, which the build repopulates.
fn clear_public_output(build_dir: &Path) -> Result<()> {
    let public = build_dir.join("public");
    match fs::remove_dir_all(&public) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to clear '{}'", public.display())),
    }
}

/// Lists the files of `build_dir` whose extension marks them as executables.
pub fn list_executables(build_dir: &Path, extensions: &[String]) -> Result<Vec<BuiltExecutable>> {
    let entries = scan_directory(build_dir, ScanOrder::ByName)
        .context("Failed to list build outputs")?;

    let mut executables = Vec::new();
    for entry in entries {
        let is_executable = entry
            .extension
            .as_deref()
            .is_some_and(|ext| extensions.iter().any(|e| e == ext));
        if !entry.is_file || !is_executable {
            continue;
        }
        let modified = fs::metadata(&entry.path)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to stat '{}'", entry.path.display()))?;
        executables.push(BuiltExecutable {
            path: entry.path,
            modified: Some(modified),
        });
    }
    Ok(executables)
}

fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    match secs {
        0..=59 => format!("{secs}s ago"),
        60..=3599 => format!("{}m ago", secs / 60),
        3600..=86_399 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}

fn generate_phase(ctx: &Context) -> Result<()> {
    generate::generate(ctx, false)
}

fn build_phase(ctx: &Context) -> Result<()> {
    deps::check(ctx);
    compile(ctx)
}

/// Runs the whole pipeline: asset cleanup, source generation, native build.
///
/// Stops at the first failing phase.
pub fn all(ctx: &Context) -> Result<()> {
    println!("{}", BANNER);
    println!("{}{}Starting full build pipeline...{}", BOLD, CYAN, RESET);
    println!(
        "{}💡 Pipeline:{} This will run clean-assets → generate → build",
        BOLD, RESET
    );

    let start_time = Instant::now();
    let tasks = [
        (
            "Asset Cleanup Phase",
            crate::commands::assets::clean as fn(&Context) -> Result<()>,
        ),
        ("Generation Phase", generate_phase),
        ("Build Phase", build_phase),
    ];
    let total_tasks = tasks.len();
    let mut success_count = 0;
    let mut failure = None;

    for (i, (name, task_fn)) in tasks.iter().enumerate() {
        println!(
            "\n{}{}[{}/{}] {}{}",
            BOLD,
            BLUE,
            i + 1,
            total_tasks,
            name,
            RESET
        );
        match task_fn(ctx) {
            Ok(()) => success_count += 1,
            Err(e) => {
                failure = Some(e.context(format!("{name} failed")));
                break;
            }
        }
    }

    let total_duration = start_time.elapsed();
    println!(
        "\n{}{}╔═══════════════════════════════════════╗{}",
        BOLD, CYAN, RESET
    );
    println!(
        "{}{}║            PIPELINE SUMMARY           ║{}",
        BOLD, CYAN, RESET
    );
    println!(
        "{}{}╚═══════════════════════════════════════╝{}",
        BOLD, CYAN, RESET
    );

    if success_count == total_tasks {
        println!(
            "{}{} {} All {} tasks completed successfully! {}{}",
            BOLD, GREEN, CHECK, total_tasks, ROCKET, RESET
        );
    } else {
        println!(
            "{}{} ⚠ {}/{} tasks completed{}",
            BOLD, YELLOW, success_count, total_tasks, RESET
        );
    }

    println!(
        "{}{}Total time: {:.2}s{}",
        BOLD,
        BLUE,
        total_duration.as_secs_f64(),
        RESET
    );

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_executables_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("game.exe"), "x").unwrap();
        fs::write(dir.path().join("editor.run"), "x").unwrap();
        fs::write(dir.path().join("build.ninja"), "x").unwrap();
        fs::create_dir(dir.path().join("tests.bin")).unwrap();

        let extensions = ["exe", "bin", "run", "out"].map(String::from);
        let found = list_executables(dir.path(), &extensions).unwrap();

        let names: Vec<_> = found
            .iter()
            .map(|exe| exe.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["editor.run", "game.exe"]);
        assert!(found.iter().all(|exe| exe.modified.is_some()));
    }

    #[test]
    fn test_list_executables_missing_build_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_executables(&dir.path().join("Build"), &[]).is_err());
    }

    #[test]
    fn test_clear_public_output() {
        let dir = tempfile::tempdir().unwrap();
        // Nothing to clear is fine.
        clear_public_output(dir.path()).unwrap();

        let public = dir.path().join("public");
        fs::create_dir_all(public.join("shaders")).unwrap();
        fs::write(public.join("shaders/old.vert"), "x").unwrap();
        clear_public_output(dir.path()).unwrap();
        assert!(!public.exists());
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::from_secs(5)), "5s ago");
        assert_eq!(format_age(Duration::from_secs(125)), "2m ago");
        assert_eq!(format_age(Duration::from_secs(7200)), "2h ago");
        assert_eq!(format_age(Duration::from_secs(3 * 86_400)), "3d ago");
    }

    #[test]
    fn test_all_stops_when_asset_cleanup_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("shaders")).unwrap();
        fs::create_dir_all(dir.path().join("PropertyEditor")).unwrap();
        let ctx = Context::load(dir.path().to_path_buf(), None).unwrap();

        let err = all(&ctx).unwrap_err();
        assert!(format!("{err:#}").contains("Asset Cleanup Phase failed"));
        // Generation never ran.
        assert!(!dir.path().join("include/PrettyEngine/shaders.hpp").exists());
    }
}
