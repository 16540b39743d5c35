// Token requests honour the caller's context: an already-cancelled context
// never reaches the sources, and cancellation or a deadline during a pending
// request ends it promptly.

#[cfg(test)]
mod test {

    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::timeout;

    use crate::context::FetchContext;
    use crate::credential::DefaultAzureCredential;
    use crate::error::FetchError;
    use crate::sources::SourceKind;
    use crate::tests::common::{calls, env, Outcome, StubFactory};

    const SCOPES: &[&str] = &["https://storage.azure.com/.default"];

    fn credential(outcome: Outcome) -> (DefaultAzureCredential, Arc<StubFactory>) {
        let factory = Arc::new(
            StubFactory::new(&[SourceKind::ManagedIdentity])
                .with_fetch(SourceKind::ManagedIdentity, outcome),
        );
        let (credential, _) = DefaultAzureCredential::builder()
            .env(env(&[]))
            .factory(factory.clone())
            .build()
            .unwrap();
        (credential, factory)
    }

    #[tokio::test]
    async fn cancelled_context_fails_without_calling_sources() {
        let (credential, factory) = credential(Outcome::Token("t".into()));
        let ctx = FetchContext::new();
        ctx.cancel();

        let err = credential
            .get_token_with_context(&ctx, SCOPES, None)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Cancelled));
        assert!(err.is_cancellation());
        assert!(calls(&factory.log).is_empty());
    }

    #[tokio::test]
    async fn cancellation_interrupts_a_pending_request() {
        let (credential, factory) = credential(Outcome::Hang);
        let ctx = FetchContext::new();

        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result = timeout(
            Duration::from_secs(5),
            credential.get_token_with_context(&ctx, SCOPES, None),
        )
        .await
        .expect("cancellation should end the request promptly");
        assert!(matches!(result, Err(FetchError::Cancelled)));
        assert_eq!(calls(&factory.log).len(), 1);
    }

    #[tokio::test]
    async fn deadline_interrupts_a_pending_request() {
        let (credential, _) = credential(Outcome::Hang);
        let ctx = FetchContext::new().with_timeout(Duration::from_millis(20));

        let result = timeout(
            Duration::from_secs(5),
            credential.get_token_with_context(&ctx, SCOPES, None),
        )
        .await
        .expect("deadline should end the request promptly");
        assert!(matches!(result, Err(FetchError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn source_errors_pass_through_unchanged() {
        let (credential, _) = credential(Outcome::Fail("imds unreachable".into()));
        let ctx = FetchContext::new().with_timeout(Duration::from_secs(5));

        let err = credential
            .get_token_with_context(&ctx, SCOPES, None)
            .await
            .unwrap_err();
        match err {
            FetchError::Credential(inner) => {
                assert!(inner.to_string().contains("imds unreachable"), "{inner}")
            }
            other => panic!("expected credential error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn live_context_returns_the_token() {
        let (credential, _) = credential(Outcome::Token("abc".into()));
        let ctx = FetchContext::new().with_timeout(Duration::from_secs(5));
        let token = credential
            .get_token_with_context(&ctx, SCOPES, None)
            .await
            .unwrap();
        assert_eq!(token.token.secret(), "abc");
    }
}
