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
use pretty_codegen::assets::clear_disallowed_assets;

/// Removes the deny-listed files from the public asset directory.
pub fn clean(ctx: &Context) -> Result<()> {
    print_task_start("Cleaning Public Assets", BRUSH, CYAN);

    let assets = &ctx.config.assets;
    let public_dir = ctx.root.join(&assets.public_dir);
    print_info(&format!(
        "Removing {} files from '{}'",
        assets.deny_extensions.join(", "),
        public_dir.display()
    ));

    let removed = clear_disallowed_assets(&public_dir, &assets.deny_extensions)
        .context("Asset cleanup failed")?;

    print_success(&format!("Removed {} unsupported file(s).", removed.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_clean_uses_configured_public_dir() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("Assets/ENGINE_PUBLIC");
        fs::create_dir_all(&public).unwrap();
        fs::write(public.join("level.blend"), "x").unwrap();
        fs::write(public.join("level.obj"), "x").unwrap();

        let ctx = Context::load(dir.path().to_path_buf(), None).unwrap();
        clean(&ctx).unwrap();

        assert!(!public.join("level.blend").exists());
        assert!(public.join("level.obj").exists());
    }

    #[test]
    fn test_clean_without_public_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::load(dir.path().to_path_buf(), None).unwrap();

        assert!(clean(&ctx).is_err());
    }
}
