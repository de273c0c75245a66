use std::path::PathBuf;

use crate::{
    notify_err,
    utils::errors::{NotifyError, NotifyErrorKind},
};

const APP_PREFIX: &str = "backup-notify";
const CONFIG_FILE: &str = "config.json";

pub fn home_dir() -> Result<PathBuf, NotifyError> {
    std::env::var("HOME")
        .map_err(|e| notify_err!(NotifyErrorKind::EnvVar, e.to_string()))
        .map(PathBuf::from)
}

fn get_xdg_dirs() -> xdg::BaseDirectories {
    xdg::BaseDirectories::with_prefix(APP_PREFIX)
}

/// Returns the configuration directory, `$XDG_CONFIG_HOME/backup-notify`.
///
/// Falls back to `~/.config/backup-notify` when XDG cannot resolve a home.
/// The directory is not created; a missing config is not an error.
pub fn get_config_dir() -> Result<PathBuf, NotifyError> {
    let xdg_dirs = get_xdg_dirs();
    match xdg_dirs.get_config_home() {
        Some(dir) => Ok(dir),
        None => home_dir().map(|home| home.join(".config").join(APP_PREFIX)),
    }
}

pub fn get_config_file() -> Result<PathBuf, NotifyError> {
    get_config_dir()
        .map(|dir| dir.join(CONFIG_FILE))
        .map_err(|e| {
            notify_err!(
                NotifyErrorKind::DirRead,
                "Could not find config directory: {}",
                e
            )
        })
}
