//! Configuration validation with aggregated errors.
//! Every problem is collected so a single run reports all of them.

use tracing::{error, info};

use crate::config::settings::{AppConfig, CredentialConfig, LoggingConfig};
use crate::sources::cli::validate_tenant_id;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub fn validate_config(cfg: &AppConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_credential(&cfg.credential, &mut errors);

    for (i, scope) in cfg.scopes.iter().enumerate() {
        if scope.trim().is_empty() {
            errors.push(format!("scopes[{}] must not be empty", i));
        }
    }

    if cfg.timeout_ms == Some(0) {
        errors.push("timeout_ms must be greater than 0".to_string());
    }

    if let Some(logging) = &cfg.logging {
        validate_logging(logging, &mut errors);
    }

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        Err(errors)
    }
}

fn validate_credential(credential: &CredentialConfig, errors: &mut Vec<String>) {
    if credential.disable_environment_credential
        && credential.disable_workload_identity_credential
        && credential.disable_managed_identity_credential
        && credential.disable_azure_cli_credential
    {
        errors.push("credential: every source is disabled; at least one must stay enabled".to_string());
    }

    if let Some(tenant_id) = &credential.tenant_id {
        if let Err(e) = validate_tenant_id(tenant_id) {
            errors.push(format!("credential.tenant_id: {}", e));
        }
    }
}

fn validate_logging(logging: &LoggingConfig, errors: &mut Vec<String>) {
    // EnvFilter directives such as "azidentity_ext=debug" are allowed too
    let level = logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) && !level.contains('=') {
        errors.push(format!(
            "logging.level '{}' must be one of {:?} or a filter directive",
            logging.level, LOG_LEVELS
        ));
    }
}
