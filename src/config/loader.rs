use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::{AppConfig, LoggingConfig};
use crate::config::validator;
use crate::utils::env::{Env, ProcessEnv};

/// Load and validate config from a YAML file, expanding `${VAR}` from the process environment.
pub fn file_to_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&content, &ProcessEnv)
}

pub fn parse_config(content: &str, env: &dyn Env) -> Result<AppConfig> {
    let expanded = expand_env_vars(content, env)?;
    let mut config: AppConfig = serde_yaml::from_str(&expanded)
        .inspect_err(|e| error!("parse config error: {}", e))?;

    // Apply defaults
    if config.logging.is_none() {
        config.logging = Some(LoggingConfig::default());
    }
    // `${AZURE_TENANT_ID:}` expands to an empty string when unset
    if config.credential.tenant_id.as_deref().is_some_and(str::is_empty) {
        config.credential.tenant_id = None;
    }

    debug!("validating config ...");
    validator::validate_config(&config).map_err(|errors| {
        anyhow!(
            "config is not valid, total errors: {}\n{}",
            errors.len(),
            errors.join("\n")
        )
    })?;

    Ok(config)
}

/// Replaces `${VAR}` and `${VAR:default}`. A `${VAR}` with neither a value nor a default is an error.
pub fn expand_env_vars(input: &str, env: &dyn Env) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}")?;
    let mut unresolved: Vec<String> = Vec::new();
    let expanded = re
        .replace_all(input, |caps: &regex::Captures| {
            let var = &caps[1];
            match (env.var(var), caps.get(2)) {
                (Some(value), _) => value,
                (None, Some(default)) => default.as_str().to_owned(),
                (None, None) => {
                    unresolved.push(var.to_owned());
                    String::new()
                }
            }
        })
        .to_string();

    if unresolved.is_empty() {
        Ok(expanded)
    } else {
        Err(anyhow!(
            "unresolved environment variable(s) in config: {}",
            unresolved.join(", ")
        ))
    }
}
