//! Ordered fallback over token credentials.
//!
//! Sources are tried in the order given. By default the first source that
//! returns a token is remembered and used for every later request; its errors
//! are then returned as-is without falling back.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use azure_core::credentials::{AccessToken, TokenCredential, TokenRequestOptions};
use tracing::trace;

use crate::error::credential_error;

const NO_SOURCE: usize = usize::MAX;

#[derive(Debug, Clone, Copy, Default)]
pub struct ChainedTokenCredentialOptions {
    /// Restart from the first source on every request instead of sticking to
    /// the one that last succeeded.
    pub retry_sources: bool,
}

pub struct ChainedTokenCredential {
    sources: Vec<(String, Arc<dyn TokenCredential>)>,
    retry_sources: bool,
    /// Index of the source that first provided a token, `NO_SOURCE` until then.
    selected: AtomicUsize,
}

impl std::fmt::Debug for ChainedTokenCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainedTokenCredential")
            .field("sources", &self.source_names())
            .field("retry_sources", &self.retry_sources)
            .finish()
    }
}

impl ChainedTokenCredential {
    pub fn new(
        sources: Vec<(String, Arc<dyn TokenCredential>)>,
        options: Option<ChainedTokenCredentialOptions>,
    ) -> azure_core::Result<Self> {
        if sources.is_empty() {
            return Err(credential_error(
                "ChainedTokenCredential: sources must contain at least one credential",
            ));
        }
        let options = options.unwrap_or_default();
        Ok(Self {
            sources,
            retry_sources: options.retry_sources,
            selected: AtomicUsize::new(NO_SOURCE),
        })
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Name of the source the chain has settled on, if any.
    pub fn selected_source(&self) -> Option<&str> {
        let index = self.selected.load(Ordering::Acquire);
        self.sources.get(index).map(|(name, _)| name.as_str())
    }
}

#[async_trait::async_trait]
impl TokenCredential for ChainedTokenCredential {
    async fn get_token(
        &self,
        scopes: &[&str],
        options: Option<TokenRequestOptions<'_>>,
    ) -> azure_core::Result<AccessToken> {
        if !self.retry_sources {
            let index = self.selected.load(Ordering::Acquire);
            if let Some((name, source)) = self.sources.get(index) {
                trace!("ChainedTokenCredential: using selected credential {name}");
                return source.get_token(scopes, options).await;
            }
        }

        let mut errors = Vec::with_capacity(self.sources.len());
        for (index, (name, source)) in self.sources.iter().enumerate() {
            match source.get_token(scopes, options.clone()).await {
                Ok(token) => {
                    trace!("ChainedTokenCredential: authenticated with {name}");
                    if !self.retry_sources {
                        self.selected.store(index, Ordering::Release);
                    }
                    return Ok(token);
                }
                Err(error) => {
                    trace!("ChainedTokenCredential: {name} failed: {error}");
                    errors.push((name.as_str(), error));
                }
            }
        }

        Err(credential_error(format!(
            "ChainedTokenCredential: failed to acquire a token.\nAttempted credentials:\n{}",
            format_credential_errors(&errors)
        )))
    }
}

fn format_credential_errors(errors: &[(&str, azure_core::Error)]) -> String {
    use std::error::Error;
    errors
        .iter()
        .map(|(name, e)| {
            let mut current: Option<&dyn Error> = Some(e);
            let mut stack = vec![];
            while let Some(err) = current.take() {
                stack.push(err.to_string());
                current = err.source();
            }
            format!("\t{name}: {}", stack.join(" - "))
        })
        .collect::<Vec<String>>()
        .join("\n")
}
