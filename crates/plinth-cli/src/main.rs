mod commands;
mod config;
mod credentials;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use plinth_api::{ApiClient, Session};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Args;
use crate::credentials::CredentialsFile;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("plinth={}", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    args.validate().map_err(|e| anyhow::anyhow!(e))?;

    let credentials = CredentialsFile::new(args.credentials_file.clone())?;
    let session = match credentials.load() {
        Some(tokens) => Session::with_tokens(tokens),
        None => Session::new(),
    };

    debug!(api_url = %args.api_url, credentials = %credentials.path().display(), "Starting");

    let client = Arc::new(ApiClient::new(args.api_config(), session));
    let outcome = commands::run(args.command, Arc::clone(&client)).await;

    // A 401 clears the in-memory session; mirror that on disk so the next
    // invocation does not retry a dead token.
    match client.session().tokens() {
        Some(tokens) => credentials.save(&tokens)?,
        None => credentials.clear()?,
    }

    outcome
}
