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

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::process::{Command, Stdio};
use std::time::Instant;

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const BLUE: &str = "\x1b[34m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

// Visual symbols
pub const CHECK: &str = "✓";
pub const CROSS: &str = "✗";
pub const GEAR: &str = "⚙";
pub const ROCKET: &str = "🚀";
pub const HAMMER: &str = "🔨";
pub const MAGNIFIER: &str = "🔍";
pub const BRUSH: &str = "🎨";

pub const BANNER: &str = concat!(
    "\x1b[1m",
    "\x1b[36m", // BOLD, CYAN
    "╔═══════════════════════════════════════════════════════════╗\n",
    "║                   ",
    "🚀",
    " PRETTY ENGINE ",
    "⚙",
    "                      ║\n", // ROCKET, GEAR
    "║                   Build Automation Tool                   ║\n",
    "╚═══════════════════════════════════════════════════════════╝",
    "\x1b[0m" // RESET
);

pub fn print_custom_help() {
    println!("{}", BANNER);
    println!(
        "\n{}{}Usage:{} cargo xtask [--root <dir>] [--config <file>] <command>\n",
        BOLD, YELLOW, RESET
    );
    println!("{}Available commands:{}", BOLD, RESET);
    println!(
        "  {} {} {}generate{}      - Generate the shader header and plugin registries.",
        GEAR, MAGENTA, BOLD, RESET
    );
    println!(
        "  {} {} {}clean-assets{}  - Remove unsupported files from the public asset directory.",
        BRUSH, CYAN, BOLD, RESET
    );
    println!(
        "  {} {} {}check-deps{}    - Report missing external build tools.",
        MAGNIFIER, YELLOW, BOLD, RESET
    );
    println!(
        "  {} {} {}build{}         - Generate sources, then configure and compile with CMake + Ninja.",
        HAMMER, BLUE, BOLD, RESET
    );
    println!(
        "  {} {} {}all{}           - Run clean-assets, generate and build.",
        ROCKET, RED, BOLD, RESET
    );
}

pub fn print_task_start(task_name: &str, emoji: &str, color: &str) {
    println!(
        "\n{}{}━━━ {} {} {}━━━{}",
        BOLD, color, emoji, task_name, emoji, RESET
    );
}

pub fn print_success(message: &str) {
    println!("{}{} {} {}{}", BOLD, GREEN, CHECK, message, RESET);
}

pub fn print_error(message: &str) {
    println!("{}{} {} {}{}", BOLD, RED, CROSS, message, RESET);
}

pub fn print_info(message: &str) {
    println!("{}💡 Info:{} {}", BOLD, RESET, message);
}

pub fn print_command_info<S: AsRef<OsStr>>(cmd: &str, args: &[S]) {
    let args: Vec<String> = args
        .iter()
        .map(|arg| arg.as_ref().to_string_lossy().into_owned())
        .collect();
    println!("{}{}📋 Command:{} {} {}", BOLD, CYAN, RESET, cmd, args.join(" "));
}

pub fn execute_command<S: AsRef<OsStr>>(cmd: &str, args: &[S], task_name: &str) -> Result<()> {
    let start_time = Instant::now();
    print_command_info(cmd, args);

    let status = Command::new(cmd)
        .args(args)
        .status()
        .with_context(|| format!("Failed to execute '{}'", cmd))?;
    let duration = start_time.elapsed();

    if status.success() {
        print_success(&format!(
            "{} completed in {:.2}s",
            task_name,
            duration.as_secs_f64()
        ));
        Ok(())
    } else {
        print_error(&format!(
            "{} failed after {:.2}s",
            task_name,
            duration.as_secs_f64()
        ));
        anyhow::bail!("{} failed with status: {}", task_name, status);
    }
}

/// Runs `cmd args` silently and reports whether it exited successfully.
pub fn probe_command(cmd: &str, args: &[&str]) -> bool {
    Command::new(cmd)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
