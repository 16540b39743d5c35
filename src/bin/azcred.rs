use std::time::Duration;

use anyhow::{Context, Result};
use azidentity_ext::config::settings::AppConfig;
use azidentity_ext::utils::config_loader;
use azidentity_ext::utils::logging::{self, LogLevel};
use azidentity_ext::{DefaultAzureCredential, FetchContext};
use azure_core::credentials::AccessToken;
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};

/// Acquire one token through the default Azure credential chain.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "AZCRED_CONFIG")]
    config: Option<String>,
    /// Overrides the scopes from the config file
    #[arg(short, long = "scope")]
    scopes: Vec<String>,
    #[arg(long, env = "AZCRED_TENANT_ID")]
    tenant_id: Option<String>,
    #[arg(long)]
    timeout_ms: Option<u64>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Include the access token itself in the output
    #[arg(long)]
    print_token: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load config, start logging
    // -------------------------------

    let args = Args::parse();
    let mut config: AppConfig = config_loader::run(args.config.as_deref())?;
    logging::run(&config, args.log_level);

    if args.tenant_id.is_some() {
        config.credential.tenant_id = args.tenant_id.clone();
    }
    let scopes = if args.scopes.is_empty() {
        config.scopes_or_default()
    } else {
        args.scopes.clone()
    };
    let timeout = Duration::from_millis(args.timeout_ms.unwrap_or(config.timeout_ms_or_default()));

    // -------------------------------
    // 2. Build the credential chain
    // -------------------------------

    let (credential, source_errors) = DefaultAzureCredential::builder()
        .options(config.credential.to_options())
        .chain_options(config.credential.chain_options())
        .build()
        .inspect_err(|e| {
            for source_error in e.source_errors() {
                warn!("{source_error}");
            }
        })
        .context("no usable Azure credential")?;
    for source_error in &source_errors {
        warn!("{source_error}");
    }
    info!("credential chain: {:?}", credential.source_names());

    // -------------------------------
    // 3. Fetch a token, cancelled by Ctrl-C or the timeout
    // -------------------------------

    let ctx = FetchContext::new().with_timeout(timeout);
    let on_signal = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let scope_refs: Vec<&str> = scopes.iter().map(String::as_str).collect();
    let token = credential
        .get_token_with_context(&ctx, &scope_refs, None)
        .await
        .context("token request failed")?;

    println!("{}", render(&token, &credential, &scopes, args.print_token));
    Ok(())
}

fn render(
    token: &AccessToken,
    credential: &DefaultAzureCredential,
    scopes: &[String],
    print_token: bool,
) -> serde_json::Value {
    let mut out = json!({
        "sources": credential.source_names(),
        "selected_source": credential.selected_source(),
        "scopes": scopes,
        "expires_on": token.expires_on.to_string(),
    });
    if print_token {
        out["token"] = json!(token.token.secret());
    }
    out
}
