use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ixmon_settings::{CONFIG_FILE_NAME, Settings};
use tracing::debug;

use crate::cli::GlobalArgs;

/// Settings file to load: `--config`, then the working directory, then the
/// per-user config dir. `None` means built-in defaults.
pub(crate) fn settings_path(global: &GlobalArgs) -> Option<PathBuf> {
    if let Some(path) = &global.config {
        return Some(path.clone());
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("ixmon").join(CONFIG_FILE_NAME);
    user.is_file().then_some(user)
}

pub(crate) fn resolve_settings(global: &GlobalArgs) -> Result<Settings> {
    match settings_path(global) {
        Some(path) => {
            debug!(path = %path.display(), "loading settings");
            Settings::from_file(&path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))
        }
        None => Ok(Settings::default()),
    }
}

/// Feed directory: CLI flag, then settings, then the working directory.
pub(crate) fn feed_dir(settings: &Settings, flag: Option<&Path>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| settings.feeds.dir())
}

/// Knowledge-base store directory: CLI flag, then settings, then the
/// per-user state directory.
pub(crate) fn kb_store_dir(settings: &Settings, flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Some(dir) = &settings.kb.store_dir {
        return dir.clone();
    }
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("ixmon")
        .join("kb")
}
