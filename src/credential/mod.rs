//! Default credential chain for applications deployed to Azure.
//!
//! Combines credentials suited to deployment with credentials suited to local
//! development, tried in this order until one provides a token:
//!
//! 1. `EnvironmentCredential`: service principal from `AZURE_TENANT_ID`,
//!    `AZURE_CLIENT_ID` and `AZURE_CLIENT_SECRET`.
//! 2. `WorkloadIdentityCredential`: when the Azure workload identity webhook has
//!    set `AZURE_AUTHORITY_HOST`, `AZURE_CLIENT_ID`, `AZURE_FEDERATED_TOKEN_FILE`
//!    and `AZURE_TENANT_ID`.
//! 3. `ManagedIdentityCredential`: bound to `AZURE_CLIENT_ID` when it is set.
//! 4. `AzureCLICredential`: whatever account `az login` selected.
//!
//! Once a source has authenticated it is used for every later request.

use std::sync::Arc;

use azure_core::credentials::{AccessToken, TokenCredential, TokenRequestOptions};
use tracing::debug;

use crate::chain::{ChainedTokenCredential, ChainedTokenCredentialOptions};
use crate::context::FetchContext;
use crate::error::{BuildError, FetchError, SourceError};
use crate::sources::{AzureIdentityFactory, CredentialFactory, SourceKind, SourceOptions};
use crate::utils::constants::ENV_CLIENT_ID;
use crate::utils::env::{additionally_allowed_tenants, Env, ProcessEnv};

mod options;

pub use options::DefaultAzureCredentialOptions;

pub struct DefaultAzureCredential {
    chain: ChainedTokenCredential,
}

impl std::fmt::Debug for DefaultAzureCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DefaultAzureCredential")
    }
}

impl DefaultAzureCredential {
    /// Builds the chain from the process environment. Pass `None` to accept
    /// defaults. Sources that fail to construct are returned alongside the
    /// credential; the build only fails when none could be constructed.
    pub fn new(
        options: Option<DefaultAzureCredentialOptions>,
    ) -> Result<(Self, Vec<SourceError>), BuildError> {
        DefaultAzureCredentialBuilder::new()
            .options(options.unwrap_or_default())
            .build()
    }

    pub fn builder() -> DefaultAzureCredentialBuilder {
        DefaultAzureCredentialBuilder::new()
    }

    /// Like [`TokenCredential::get_token`], but gives up as soon as `ctx` is
    /// cancelled or its deadline passes.
    pub async fn get_token_with_context(
        &self,
        ctx: &FetchContext,
        scopes: &[&str],
        options: Option<TokenRequestOptions<'_>>,
    ) -> Result<AccessToken, FetchError> {
        ctx.run(async {
            self.chain
                .get_token(scopes, options)
                .await
                .map_err(FetchError::Credential)
        })
        .await
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.chain.source_names()
    }

    pub fn selected_source(&self) -> Option<&str> {
        self.chain.selected_source()
    }
}

#[async_trait::async_trait]
impl TokenCredential for DefaultAzureCredential {
    async fn get_token(
        &self,
        scopes: &[&str],
        options: Option<TokenRequestOptions<'_>>,
    ) -> azure_core::Result<AccessToken> {
        self.chain.get_token(scopes, options).await
    }
}

pub struct DefaultAzureCredentialBuilder {
    options: DefaultAzureCredentialOptions,
    chain_options: ChainedTokenCredentialOptions,
    env: Arc<dyn Env>,
    factory: Arc<dyn CredentialFactory>,
}

impl Default for DefaultAzureCredentialBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultAzureCredentialBuilder {
    pub fn new() -> Self {
        Self {
            options: DefaultAzureCredentialOptions::default(),
            chain_options: ChainedTokenCredentialOptions::default(),
            env: Arc::new(ProcessEnv),
            factory: Arc::new(AzureIdentityFactory),
        }
    }

    pub fn options(mut self, options: DefaultAzureCredentialOptions) -> Self {
        self.options = options;
        self
    }

    pub fn chain_options(mut self, chain_options: ChainedTokenCredentialOptions) -> Self {
        self.chain_options = chain_options;
        self
    }

    pub fn env(mut self, env: Arc<dyn Env>) -> Self {
        self.env = env;
        self
    }

    pub fn factory(mut self, factory: Arc<dyn CredentialFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Options each source is constructed with.
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            client_options: self.options.client_options.clone(),
            disable_instance_discovery: self.options.disable_instance_discovery,
            additionally_allowed_tenants: additionally_allowed_tenants(self.env.as_ref()),
            tenant_id: self.options.tenant_id.clone(),
            managed_identity_client_id: self.env.non_empty(ENV_CLIENT_ID),
        }
    }

    pub fn build(self) -> Result<(DefaultAzureCredential, Vec<SourceError>), BuildError> {
        let source_options = self.source_options();
        let mut sources: Vec<(String, Arc<dyn TokenCredential>)> = Vec::new();
        let mut errors: Vec<SourceError> = Vec::new();

        for kind in SourceKind::ALL {
            if self.options.is_disabled(kind) {
                debug!("{kind} disabled, skipping");
                continue;
            }
            match self.factory.create(kind, &source_options, self.env.as_ref()) {
                Ok(credential) => {
                    debug!("{kind} added to chain");
                    sources.push((kind.name().to_owned(), credential));
                }
                Err(error) => {
                    debug!("{kind} not available: {error}");
                    errors.push(SourceError::new(kind, error));
                }
            }
        }

        if sources.is_empty() {
            return Err(BuildError::NoCredential { errors });
        }

        match ChainedTokenCredential::new(sources, Some(self.chain_options)) {
            Ok(chain) => Ok((DefaultAzureCredential { chain }, errors)),
            Err(source) => Err(BuildError::Chain { source, errors }),
        }
    }
}
