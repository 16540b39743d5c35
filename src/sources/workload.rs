//! Kubernetes workload identity, as configured by the Azure workload identity
//! webhook. All four of `AZURE_AUTHORITY_HOST`, `AZURE_CLIENT_ID`,
//! `AZURE_FEDERATED_TOKEN_FILE` and `AZURE_TENANT_ID` must be present.

use std::path::PathBuf;
use std::sync::Arc;

use azure_core::cloud::{CloudConfiguration, CustomConfiguration};
use azure_core::credentials::TokenCredential;
use azure_identity::{
    ClientAssertionCredentialOptions, WorkloadIdentityCredential, WorkloadIdentityCredentialOptions,
};
use tracing::debug;

use crate::error::credential_error;
use crate::sources::{missing_vars, SourceOptions};
use crate::utils::constants::*;
use crate::utils::env::Env;

const REQUIRED: [&str; 4] = [
    ENV_AUTHORITY_HOST,
    ENV_CLIENT_ID,
    ENV_FEDERATED_TOKEN_FILE,
    ENV_TENANT_ID,
];

pub fn build(options: &SourceOptions, env: &dyn Env) -> azure_core::Result<Arc<dyn TokenCredential>> {
    let missing = missing_vars(env, &REQUIRED);
    if !missing.is_empty() {
        return Err(credential_error(format!(
            "missing environment variable(s): {}",
            missing.join(", ")
        )));
    }

    if !options.additionally_allowed_tenants.is_empty() {
        debug!(
            tenants = ?options.additionally_allowed_tenants,
            "additionally allowed tenants are not applied to WorkloadIdentityCredential"
        );
    }

    // azure_identity would otherwise read the authority host from the process
    // environment, not from `env`
    let mut client_options = options.client_options.clone();
    if client_options.cloud.is_none() {
        client_options.cloud = env.non_empty(ENV_AUTHORITY_HOST).map(|authority_host| {
            let mut custom = CustomConfiguration::default();
            custom.authority_host = authority_host;
            Arc::new(CloudConfiguration::Custom(custom))
        });
    }

    let credential: Arc<dyn TokenCredential> =
        WorkloadIdentityCredential::new(Some(WorkloadIdentityCredentialOptions {
            credential_options: ClientAssertionCredentialOptions { client_options },
            client_id: env.non_empty(ENV_CLIENT_ID),
            tenant_id: env.non_empty(ENV_TENANT_ID),
            token_file_path: env.non_empty(ENV_FEDERATED_TOKEN_FILE).map(PathBuf::from),
            ..Default::default()
        }))?;
    Ok(credential)
}
