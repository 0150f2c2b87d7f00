//! Subcommand implementations.

pub mod compare;
pub mod extract;
pub mod init;
pub mod output;
pub mod rewrite;

use anyhow::{Context, Result};
use codemig::{RunConfig, RunOptions};
use std::path::{Path, PathBuf};

/// Loads run options for a project directory.
///
/// An explicit `--config` path is used as given; a missing file there is an
/// error, not a fallthrough. Otherwise the project directory is searched for
/// `codemig.toml` then `.codemig.toml`, then the global directory for
/// `config.toml`. With no file anywhere, defaults apply.
pub(crate) fn load_options(project_dir: &Path, explicit: Option<&Path>) -> Result<RunOptions> {
    let found = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(project_dir, global_dir().as_deref()),
    };
    let Some(path) = found else {
        return Ok(RunOptions::default());
    };
    tracing::debug!("loading config from {}", path.display());
    let config = RunConfig::from_file(&path)
        .with_context(|| format!("failed to load config: {}", path.display()))?;
    Ok(config.into_options())
}

/// Searches the project directory, then the global directory, for a config
/// file. The global directory is a parameter so tests can point it at a
/// fixture instead of the real home.
fn find_config(project_dir: &Path, global_dir: Option<&Path>) -> Option<PathBuf> {
    for name in ["codemig.toml", ".codemig.toml"] {
        let candidate = project_dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    global_dir
        .map(|dir| dir.join("config.toml"))
        .filter(|p| p.is_file())
}

/// The global config directory: `$CODEMIG_CONFIG_DIR` when set, otherwise
/// `~/.codemig`.
fn global_dir() -> Option<PathBuf> {
    match std::env::var_os("CODEMIG_CONFIG_DIR") {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".codemig")),
    }
}
