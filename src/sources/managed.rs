//! Managed identity (App Service, VMs via IMDS, Arc, ...). The host type is
//! detected by `azure_identity`; this module only decides the identity binding.

use std::sync::Arc;

use azure_core::credentials::TokenCredential;
use azure_identity::{ManagedIdentityCredential, ManagedIdentityCredentialOptions, UserAssignedId};

use crate::sources::SourceOptions;

pub fn build(options: &SourceOptions) -> azure_core::Result<Arc<dyn TokenCredential>> {
    let credential: Arc<dyn TokenCredential> =
        ManagedIdentityCredential::new(Some(ManagedIdentityCredentialOptions {
            user_assigned_id: user_assigned_id(options),
            client_options: options.client_options.clone(),
        }))?;
    Ok(credential)
}

/// `None` means the system-assigned identity.
pub fn user_assigned_id(options: &SourceOptions) -> Option<UserAssignedId> {
    options
        .managed_identity_client_id
        .clone()
        .map(UserAssignedId::ClientId)
}
