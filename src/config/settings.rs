use serde::Deserialize;

use crate::chain::ChainedTokenCredentialOptions;
use crate::credential::DefaultAzureCredentialOptions;
use crate::utils::constants::{DEFAULT_SCOPE, DEFAULT_TIMEOUT_MS};

/// ================================
/// Full application configuration
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub credential: CredentialConfig,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub timeout_ms: Option<u64>,
    pub logging: Option<LoggingConfig>,
}

impl AppConfig {
    pub fn scopes_or_default(&self) -> Vec<String> {
        if self.scopes.is_empty() {
            vec![DEFAULT_SCOPE.to_owned()]
        } else {
            self.scopes.clone()
        }
    }

    pub fn timeout_ms_or_default(&self) -> u64 {
        self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)
    }
}

/// ================================
/// Credential chain
/// ================================
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CredentialConfig {
    pub disable_environment_credential: bool,
    pub disable_workload_identity_credential: bool,
    pub disable_managed_identity_credential: bool,
    pub disable_azure_cli_credential: bool,
    pub disable_instance_discovery: bool,
    pub tenant_id: Option<String>,
    pub retry_sources: bool,
}

impl CredentialConfig {
    pub fn to_options(&self) -> DefaultAzureCredentialOptions {
        DefaultAzureCredentialOptions {
            disable_environment_credential: self.disable_environment_credential,
            disable_workload_identity_credential: self.disable_workload_identity_credential,
            disable_managed_identity_credential: self.disable_managed_identity_credential,
            disable_azure_cli_credential: self.disable_azure_cli_credential,
            disable_instance_discovery: self.disable_instance_discovery,
            tenant_id: self.tenant_id.clone(),
            ..Default::default()
        }
    }

    pub fn chain_options(&self) -> ChainedTokenCredentialOptions {
        ChainedTokenCredentialOptions {
            retry_sources: self.retry_sources,
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Compact,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}
