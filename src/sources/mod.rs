//! Sources module
//!
//! The four credential sources tried by the default chain, the options each one
//! is built from, and the factory seam the builder constructs them through.

use std::fmt;
use std::sync::Arc;

use azure_core::credentials::TokenCredential;
use azure_core::http::ClientOptions;

use crate::utils::constants::*;
use crate::utils::env::Env;

pub mod cli;
pub mod environment;
pub mod managed;
pub mod workload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Environment,
    WorkloadIdentity,
    ManagedIdentity,
    AzureCli,
}

impl SourceKind {
    /// Priority order. The chain falls back through sources in exactly this order.
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Environment,
        SourceKind::WorkloadIdentity,
        SourceKind::ManagedIdentity,
        SourceKind::AzureCli,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Environment => SOURCE_ENVIRONMENT,
            SourceKind::WorkloadIdentity => SOURCE_WORKLOAD_IDENTITY,
            SourceKind::ManagedIdentity => SOURCE_MANAGED_IDENTITY,
            SourceKind::AzureCli => SOURCE_AZURE_CLI,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs for one source constructor, derived once per build.
#[derive(Clone, Default)]
pub struct SourceOptions {
    pub client_options: ClientOptions,
    pub disable_instance_discovery: bool,
    pub additionally_allowed_tenants: Vec<String>,
    pub tenant_id: Option<String>,
    /// Binds the managed identity source to a user-assigned identity.
    pub managed_identity_client_id: Option<String>,
}

impl fmt::Debug for SourceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceOptions")
            .field("disable_instance_discovery", &self.disable_instance_discovery)
            .field("additionally_allowed_tenants", &self.additionally_allowed_tenants)
            .field("tenant_id", &self.tenant_id)
            .field("managed_identity_client_id", &self.managed_identity_client_id)
            .finish_non_exhaustive()
    }
}

/// Constructs credential sources. Construction must not perform I/O beyond
/// reading `env`; sources are exercised lazily by the chain.
pub trait CredentialFactory: Send + Sync {
    fn create(
        &self,
        kind: SourceKind,
        options: &SourceOptions,
        env: &dyn Env,
    ) -> azure_core::Result<Arc<dyn TokenCredential>>;
}

/// Builds every source with `azure_identity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AzureIdentityFactory;

impl CredentialFactory for AzureIdentityFactory {
    fn create(
        &self,
        kind: SourceKind,
        options: &SourceOptions,
        env: &dyn Env,
    ) -> azure_core::Result<Arc<dyn TokenCredential>> {
        match kind {
            SourceKind::Environment => environment::build(options, env),
            SourceKind::WorkloadIdentity => workload::build(options, env),
            SourceKind::ManagedIdentity => managed::build(options),
            SourceKind::AzureCli => cli::build(options),
        }
    }
}

/// Names of the variables in `required` that `env` does not provide.
pub(crate) fn missing_vars(env: &dyn Env, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|key| env.non_empty(key).is_none())
        .collect()
}
