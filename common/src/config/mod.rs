use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use serde::Deserialize;

use crate::{
    notify_err,
    utils::{
        errors::{NotifyError, NotifyErrorKind},
        paths::get_config_file,
    },
};

pub mod flags;

/// Optional settings read from `config.json`. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotifierConfig {
    /// Full bus address used when running as root, e.g. `unix:path=/run/user/1001/bus`.
    #[serde(default)]
    pub elevated_bus_address: Option<String>,

    /// User whose session bus is targeted when running as root.
    #[serde(default)]
    pub elevated_uid: Option<u32>,

    #[serde(default)]
    pub exit_on_failure: bool,
}

/// Loads the config from the XDG config dir.
///
/// A missing file yields the defaults. Any other failure is logged and
/// also yields the defaults, so a broken config never blocks a notification.
pub fn load_config() -> NotifierConfig {
    let path = match get_config_file() {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!("no config location: {}", e);
            return NotifierConfig::default();
        }
    };

    match load_config_from(&path) {
        Ok(Some(config)) => {
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        Ok(None) => NotifierConfig::default(),
        Err(e) => {
            tracing::warn!("ignoring config at {}: {}", path.display(), e);
            NotifierConfig::default()
        }
    }
}

/// Returns `Ok(None)` when the file does not exist.
pub fn load_config_from(path: &Path) -> Result<Option<NotifierConfig>, NotifyError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(notify_err!(NotifyErrorKind::FileOpen, e.to_string())),
    };

    let reader = BufReader::new(file);

    serde_json::from_reader::<_, NotifierConfig>(reader)
        .map(Some)
        .map_err(|e| notify_err!(NotifyErrorKind::Deserialize, e.to_string()))
}
