//! Environment lookup.
//!
//! Everything that reads `AZURE_*` variables goes through [`Env`], so the
//! builder can be driven from a fixed map in tests instead of the process
//! environment.

use std::collections::HashMap;

use crate::utils::constants::{ENV_ADDITIONALLY_ALLOWED_TENANTS, TENANT_DELIMITER};

pub trait Env: Send + Sync {
    /// Returns the value of `key`, or `None` when it is unset.
    fn var(&self, key: &str) -> Option<String>;

    /// Like [`Env::var`], but treats an empty value as unset.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.is_empty())
    }
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Parses `AZURE_ADDITIONALLY_ALLOWED_TENANTS` into an ordered, de-duplicated list.
pub fn additionally_allowed_tenants(env: &dyn Env) -> Vec<String> {
    env.var(ENV_ADDITIONALLY_ALLOWED_TENANTS)
        .map(|value| parse_tenant_list(&value))
        .unwrap_or_default()
}

pub fn parse_tenant_list(value: &str) -> Vec<String> {
    let mut tenants: Vec<String> = Vec::new();
    for tenant in value.split(TENANT_DELIMITER).map(str::trim) {
        if tenant.is_empty() || tenants.iter().any(|t| t == tenant) {
            continue;
        }
        tenants.push(tenant.to_owned());
    }
    tenants
}
