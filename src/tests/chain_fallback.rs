// Fallback order of the chain: which source gets asked, in what order, and
// how the chain settles on the first source that works.

#[cfg(test)]
mod test {

    use std::sync::Arc;

    use azure_core::credentials::TokenCredential;
    use azure_core::error::ErrorKind;

    use crate::chain::{ChainedTokenCredential, ChainedTokenCredentialOptions};
    use crate::credential::DefaultAzureCredential;
    use crate::sources::SourceKind;
    use crate::tests::common::{call_log, calls, env, named, Outcome, StubCredential, StubFactory};
    use crate::utils::constants::*;

    const SCOPES: &[&str] = &["https://vault.azure.net/.default"];

    #[tokio::test]
    async fn environment_is_tried_before_cli() {
        // only the environment and CLI sources construct; environment fails at fetch time
        let factory = Arc::new(
            StubFactory::new(&[SourceKind::Environment, SourceKind::AzureCli])
                .with_fetch(SourceKind::Environment, Outcome::Fail("bad secret".into())),
        );
        let (credential, errors) = DefaultAzureCredential::builder()
            .env(env(&[]))
            .factory(factory.clone())
            .build()
            .unwrap();
        assert_eq!(errors.len(), 2);

        let token = credential.get_token(SCOPES, None).await.unwrap();
        assert_eq!(token.token.secret(), "AzureCLICredential-token");
        assert_eq!(calls(&factory.log), vec![SOURCE_ENVIRONMENT, SOURCE_AZURE_CLI]);
    }

    #[tokio::test]
    async fn first_source_wins_without_touching_the_rest() {
        let factory = Arc::new(StubFactory::new(&[SourceKind::Environment, SourceKind::AzureCli]));
        let (credential, _) = DefaultAzureCredential::builder()
            .env(env(&[]))
            .factory(factory.clone())
            .build()
            .unwrap();

        credential.get_token(SCOPES, None).await.unwrap();
        assert_eq!(calls(&factory.log), vec![SOURCE_ENVIRONMENT]);
    }

    #[tokio::test]
    async fn sticks_to_the_source_that_succeeded() {
        let log = call_log();
        let first = StubCredential::new("first", Outcome::Fail("unavailable".into()), &log);
        let second = StubCredential::new("second", Outcome::Token("t2".into()), &log);
        let chain = ChainedTokenCredential::new(
            vec![named("first", first.clone()), named("second", second.clone())],
            None,
        )
        .unwrap();

        chain.get_token(SCOPES, None).await.unwrap();
        assert_eq!(chain.selected_source(), Some("second"));

        // even once "first" recovers, the chain keeps using "second"
        first.set_outcome(Outcome::Token("t1".into()));
        let token = chain.get_token(SCOPES, None).await.unwrap();
        assert_eq!(token.token.secret(), "t2");
        assert_eq!(calls(&log), vec!["first", "second", "second"]);

        // and its errors come back without falling back
        second.set_outcome(Outcome::Fail("expired".into()));
        let err = chain.get_token(SCOPES, None).await.unwrap_err();
        assert!(err.to_string().contains("expired"), "{err}");
        assert_eq!(calls(&log), vec!["first", "second", "second", "second"]);
    }

    #[tokio::test]
    async fn retry_sources_restarts_from_the_top() {
        let log = call_log();
        let first = StubCredential::new("first", Outcome::Fail("unavailable".into()), &log);
        let second = StubCredential::new("second", Outcome::Token("t2".into()), &log);
        let chain = ChainedTokenCredential::new(
            vec![named("first", first.clone()), named("second", second)],
            Some(ChainedTokenCredentialOptions { retry_sources: true }),
        )
        .unwrap();

        chain.get_token(SCOPES, None).await.unwrap();
        first.set_outcome(Outcome::Token("t1".into()));
        let token = chain.get_token(SCOPES, None).await.unwrap();

        assert_eq!(token.token.secret(), "t1");
        assert_eq!(calls(&log), vec!["first", "second", "first"]);
        assert_eq!(chain.selected_source(), None);
    }

    #[tokio::test]
    async fn all_failures_are_reported_together() {
        let log = call_log();
        let a = StubCredential::new("alpha", Outcome::Fail("no secret".into()), &log);
        let b = StubCredential::new("beta", Outcome::Fail("az not found".into()), &log);
        let chain = ChainedTokenCredential::new(vec![named("alpha", a), named("beta", b)], None).unwrap();

        let err = chain.get_token(SCOPES, None).await.unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Credential));
        let message = err.to_string();
        assert!(message.contains("alpha: no secret"), "{message}");
        assert!(message.contains("beta: az not found"), "{message}");
        assert_eq!(chain.selected_source(), None);
    }

    #[test]
    fn empty_chain_is_rejected() {
        let err = ChainedTokenCredential::new(Vec::new(), None).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Credential));
    }
}
