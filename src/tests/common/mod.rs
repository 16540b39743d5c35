// tests/common/mod.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use azure_core::credentials::{AccessToken, Secret, TokenCredential, TokenRequestOptions};
use azure_core::time::{Duration, OffsetDateTime};

use crate::error::credential_error;
use crate::sources::{CredentialFactory, SourceKind, SourceOptions};
use crate::utils::env::{Env, MapEnv};

/// Ordered record of which stub credentials were asked for a token.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Token(String),
    Fail(String),
    /// Never completes; exercises cancellation.
    Hang,
}

#[derive(Debug)]
pub struct StubCredential {
    pub name: String,
    pub outcome: Mutex<Outcome>,
    pub log: CallLog,
}

impl StubCredential {
    pub fn new(name: &str, outcome: Outcome, log: &CallLog) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            outcome: Mutex::new(outcome),
            log: log.clone(),
        })
    }

    pub fn set_outcome(&self, outcome: Outcome) {
        *self.outcome.lock().unwrap() = outcome;
    }
}

#[async_trait::async_trait]
impl TokenCredential for StubCredential {
    async fn get_token(
        &self,
        _scopes: &[&str],
        _options: Option<TokenRequestOptions<'_>>,
    ) -> azure_core::Result<AccessToken> {
        self.log.lock().unwrap().push(self.name.clone());
        let outcome = self.outcome.lock().unwrap().clone();
        match outcome {
            Outcome::Token(value) => Ok(token(&value)),
            Outcome::Fail(message) => Err(credential_error(message)),
            Outcome::Hang => std::future::pending().await,
        }
    }
}

pub fn token(value: &str) -> AccessToken {
    AccessToken::new(
        Secret::new(value.to_owned()),
        OffsetDateTime::now_utc() + Duration::hours(1),
    )
}

/// Factory whose sources either construct into a [`StubCredential`] or fail,
/// recording the options each construction received.
pub struct StubFactory {
    succeeds: Vec<SourceKind>,
    pub fetch_outcomes: HashMap<SourceKind, Outcome>,
    pub log: CallLog,
    pub constructed: Mutex<Vec<(SourceKind, SourceOptions)>>,
}

impl StubFactory {
    pub fn new(succeeds: &[SourceKind]) -> Self {
        Self {
            succeeds: succeeds.to_vec(),
            fetch_outcomes: HashMap::new(),
            log: call_log(),
            constructed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_fetch(mut self, kind: SourceKind, outcome: Outcome) -> Self {
        self.fetch_outcomes.insert(kind, outcome);
        self
    }

    pub fn attempted(&self) -> Vec<SourceKind> {
        self.constructed.lock().unwrap().iter().map(|(k, _)| *k).collect()
    }

    pub fn options_for(&self, kind: SourceKind) -> Option<SourceOptions> {
        self.constructed
            .lock()
            .unwrap()
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, o)| o.clone())
    }
}

impl CredentialFactory for StubFactory {
    fn create(
        &self,
        kind: SourceKind,
        options: &SourceOptions,
        _env: &dyn Env,
    ) -> azure_core::Result<Arc<dyn TokenCredential>> {
        self.constructed.lock().unwrap().push((kind, options.clone()));
        if !self.succeeds.contains(&kind) {
            return Err(credential_error(format!("{} is not configured", kind.name())));
        }
        let outcome = self
            .fetch_outcomes
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Outcome::Token(format!("{}-token", kind.name())));
        let credential: Arc<dyn TokenCredential> = StubCredential::new(kind.name(), outcome, &self.log);
        Ok(credential)
    }
}

pub fn env(vars: &[(&str, &str)]) -> Arc<MapEnv> {
    Arc::new(vars.iter().map(|(k, v)| (*k, *v)).collect())
}

pub fn named(name: &str, credential: Arc<StubCredential>) -> (String, Arc<dyn TokenCredential>) {
    (name.to_owned(), credential)
}
