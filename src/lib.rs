//! # Azure Identity Extensions
//!
//! A `DefaultAzureCredential` for `azure_core` clients: it builds the
//! environment, workload identity, managed identity and Azure CLI credentials
//! from `azure_identity` in that order, keeps the ones that construct, and
//! serves token requests through an ordered fallback chain over them.
//!
//! Modules:
//! - `credential`: builder and the `DefaultAzureCredential` facade
//! - `sources`: the four source kinds and the factory that constructs them
//! - `chain`: ordered fallback over token credentials
//! - `context`: cancellation and deadlines for token requests
//! - `config`: YAML configuration for the `azcred` binary

pub mod chain;
pub mod config;
pub mod context;
pub mod credential;
pub mod error;
pub mod sources;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::chain::{ChainedTokenCredential, ChainedTokenCredentialOptions};
pub use crate::context::FetchContext;
pub use crate::credential::{
    DefaultAzureCredential, DefaultAzureCredentialBuilder, DefaultAzureCredentialOptions,
};
pub use crate::error::{BuildError, FetchError, SourceError};
pub use crate::sources::{AzureIdentityFactory, CredentialFactory, SourceKind, SourceOptions};
pub use crate::utils::env::{Env, MapEnv, ProcessEnv};
