//! Service principal credential configured through environment variables.
//!
//! | Variable              | Description                                  |
//! |-----------------------|----------------------------------------------|
//! | `AZURE_TENANT_ID`     | Tenant the service principal belongs to.     |
//! | `AZURE_CLIENT_ID`     | Client (application) id.                     |
//! | `AZURE_CLIENT_SECRET` | Client secret generated for the application. |
//!
//! Only the client secret flow is available; certificate and username/password
//! configurations are reported as construction errors.

use std::sync::Arc;

use azure_core::credentials::{Secret, TokenCredential};
use azure_identity::{ClientSecretCredential, ClientSecretCredentialOptions};
use tracing::debug;

use crate::error::credential_error;
use crate::sources::{missing_vars, SourceOptions};
use crate::utils::constants::*;
use crate::utils::env::Env;

const REQUIRED: [&str; 3] = [ENV_TENANT_ID, ENV_CLIENT_ID, ENV_CLIENT_SECRET];

pub fn build(options: &SourceOptions, env: &dyn Env) -> azure_core::Result<Arc<dyn TokenCredential>> {
    let missing = missing_vars(env, &REQUIRED);
    if !missing.is_empty() {
        if missing == [ENV_CLIENT_SECRET] {
            if let Some(var) = [ENV_CLIENT_CERTIFICATE_PATH, ENV_USERNAME]
                .into_iter()
                .find(|var| env.non_empty(var).is_some())
            {
                return Err(credential_error(format!(
                    "{var} is set but only client secret authentication is supported; set {ENV_CLIENT_SECRET}"
                )));
            }
        }
        return Err(credential_error(format!(
            "missing environment variable(s): {}",
            missing.join(", ")
        )));
    }

    // presence checked above
    let tenant_id = env.non_empty(ENV_TENANT_ID).unwrap_or_default();
    let client_id = env.non_empty(ENV_CLIENT_ID).unwrap_or_default();
    let client_secret = env.non_empty(ENV_CLIENT_SECRET).unwrap_or_default();

    if options.disable_instance_discovery {
        debug!("instance discovery toggle has no effect on ClientSecretCredential");
    }

    let credential: Arc<dyn TokenCredential> = ClientSecretCredential::new(
        &tenant_id,
        client_id,
        Secret::new(client_secret),
        Some(ClientSecretCredentialOptions {
            client_options: options.client_options.clone(),
        }),
    )?;
    Ok(credential)
}
