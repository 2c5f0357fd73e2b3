use std::env;
use std::path::PathBuf;

use zolapost::config::{read_config, Config};

use crate::CFG_FILE_NAME;

const TOKEN_ENV: &str = "ZOLAPOST_GITHUB_TOKEN";

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir().map(|dir| dir.join("zolapost"));

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// `None` when no configuration file was given or found.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Option<Config>, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Ok(None),
        Some(x) => x,
    };

    let mut config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    if let Ok(token) = env::var(TOKEN_ENV) {
        if !token.is_empty() {
            config.github.token = token;
        }
    }

    if let Some(mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir()
                .map(|dir| dir.join("zolapost").join("log").join("zolapost.log"));
        }
        config.log = Some(log);
    }

    Ok(Some(config))
}
