//! Shared constants and invariants

// Environment variables read by the builder itself
pub const ENV_ADDITIONALLY_ALLOWED_TENANTS: &str = "AZURE_ADDITIONALLY_ALLOWED_TENANTS";
pub const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";

// Environment variables required by the sources
pub const ENV_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const ENV_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
pub const ENV_CLIENT_CERTIFICATE_PATH: &str = "AZURE_CLIENT_CERTIFICATE_PATH";
pub const ENV_USERNAME: &str = "AZURE_USERNAME";
pub const ENV_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
pub const ENV_FEDERATED_TOKEN_FILE: &str = "AZURE_FEDERATED_TOKEN_FILE";

pub const TENANT_DELIMITER: char = ';';

// Source names, as they appear in error logs and chain traces
pub const SOURCE_ENVIRONMENT: &str = "EnvironmentCredential";
pub const SOURCE_WORKLOAD_IDENTITY: &str = "WorkloadIdentityCredential";
pub const SOURCE_MANAGED_IDENTITY: &str = "ManagedIdentityCredential";
pub const SOURCE_AZURE_CLI: &str = "AzureCLICredential";

pub const DEFAULT_SCOPE: &str = "https://management.azure.com/.default";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
