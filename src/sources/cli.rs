//! Azure CLI (`az account get-access-token`) credential for local development.

use std::sync::Arc;

use azure_core::credentials::TokenCredential;
use azure_identity::{AzureCliCredential, AzureCliCredentialOptions};
use tracing::debug;

use crate::error::credential_error;
use crate::sources::SourceOptions;

pub fn build(options: &SourceOptions) -> azure_core::Result<Arc<dyn TokenCredential>> {
    if let Some(tenant_id) = &options.tenant_id {
        validate_tenant_id(tenant_id)?;
    }

    if !options.additionally_allowed_tenants.is_empty() {
        debug!(
            tenants = ?options.additionally_allowed_tenants,
            "additionally allowed tenants are not applied to AzureCliCredential"
        );
    }

    let cli_options = AzureCliCredentialOptions {
        tenant_id: options.tenant_id.clone(),
        ..Default::default()
    };

    let credential: Arc<dyn TokenCredential> = AzureCliCredential::new(Some(cli_options))?;
    Ok(credential)
}

/// Same rule `AzureCliCredential::new` enforces (alphanumerics, `-` and `.`),
/// so a bad tenant id in a config file is reported before any source is built.
pub fn validate_tenant_id(tenant_id: &str) -> azure_core::Result<()> {
    if tenant_id.is_empty() {
        return Err(credential_error("tenant id must not be empty"));
    }
    match tenant_id
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == '-' || *c == '.'))
    {
        Some(c) => Err(credential_error(format!(
            "invalid tenant id {tenant_id:?}: unexpected character {c:?}"
        ))),
        None => Ok(()),
    }
}
