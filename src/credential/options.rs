use azure_core::http::ClientOptions;

/// Optional parameters for [`DefaultAzureCredential`](super::DefaultAzureCredential).
/// Not every option applies to every source in the chain.
#[derive(Clone, Default)]
pub struct DefaultAzureCredentialOptions {
    /// Transport and retry options handed to every source that takes them.
    pub client_options: ClientOptions,

    // Skip constructing the corresponding source entirely
    pub disable_environment_credential: bool,
    pub disable_workload_identity_credential: bool,
    pub disable_managed_identity_credential: bool,
    pub disable_azure_cli_credential: bool,

    /// For disconnected or private clouds, where the authority metadata request
    /// would fail.
    pub disable_instance_discovery: bool,

    /// Tenant the Azure CLI source authenticates in. Defaults to the CLI's own
    /// default tenant.
    pub tenant_id: Option<String>,
}

impl DefaultAzureCredentialOptions {
    pub fn is_disabled(&self, kind: crate::sources::SourceKind) -> bool {
        use crate::sources::SourceKind;
        match kind {
            SourceKind::Environment => self.disable_environment_credential,
            SourceKind::WorkloadIdentity => self.disable_workload_identity_credential,
            SourceKind::ManagedIdentity => self.disable_managed_identity_credential,
            SourceKind::AzureCli => self.disable_azure_cli_credential,
        }
    }
}

impl std::fmt::Debug for DefaultAzureCredentialOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAzureCredentialOptions")
            .field("disable_environment_credential", &self.disable_environment_credential)
            .field(
                "disable_workload_identity_credential",
                &self.disable_workload_identity_credential,
            )
            .field(
                "disable_managed_identity_credential",
                &self.disable_managed_identity_credential,
            )
            .field("disable_azure_cli_credential", &self.disable_azure_cli_credential)
            .field("disable_instance_discovery", &self.disable_instance_discovery)
            .field("tenant_id", &self.tenant_id)
            .finish_non_exhaustive()
    }
}
