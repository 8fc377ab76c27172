// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-user cache directory resolution.

use std::path::PathBuf;

const APP_DIR_NAME: &str = "stempel";

/// Return the per-user cache directory for Stempel, without creating it.
///
/// Uses the platform cache location (`$XDG_CACHE_HOME`, `~/Library/Caches`,
/// `%LOCALAPPDATA%`) and falls back to a dot-directory in the home folder.
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir()
        .map(|base| base.join(APP_DIR_NAME))
        .or_else(|| dirs::home_dir().map(|home| home.join(format!(".{APP_DIR_NAME}"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dir_is_namespaced() {
        if let Some(dir) = default_cache_dir() {
            let name = dir.file_name().unwrap().to_string_lossy();
            assert!(name.ends_with(APP_DIR_NAME));
        }
    }
}
