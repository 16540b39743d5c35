use std::path::Path;

use anyhow::{anyhow, Result};

use crate::config::loader::file_to_config;
use crate::config::settings::AppConfig;

/// Loads the config file when one is given, otherwise returns defaults.
pub fn run(config_path: Option<&str>) -> Result<AppConfig> {
    match config_path {
        Some(config_path) => {
            let path = Path::new(config_path);
            file_to_config(path).map_err(|e| anyhow!("Invalid config format: {:#}", e))
        }
        None => Ok(AppConfig {
            logging: Some(Default::default()),
            ..Default::default()
        }),
    }
}
