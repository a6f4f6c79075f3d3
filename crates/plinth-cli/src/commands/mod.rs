//! Console commands, one module per content domain

use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use plinth_api::ApiClient;

pub mod athletics;
pub mod auth;
pub mod blog;
pub mod influences;
pub mod portfolio;
pub mod settings;
pub mod upload;
pub mod work;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and persist the session
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when not given
        #[arg(long, env = "PLINTH_PASSWORD")]
        password: Option<String>,
    },
    /// Drop the persisted session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Blog posts and tags
    #[command(subcommand)]
    Posts(blog::PostsCommand),
    /// Work experiences, timelines, featured posts
    #[command(subcommand)]
    Work(work::WorkCommand),
    /// Portfolio gallery
    #[command(subcommand)]
    Portfolio(portfolio::PortfolioCommand),
    /// Influences shelf
    #[command(subcommand)]
    Influences(influences::InfluencesCommand),
    /// Athletics services and contact messages
    #[command(subcommand)]
    Athletics(athletics::AthleticsCommand),
    /// Site-wide settings
    #[command(subcommand)]
    Settings(settings::SettingsCommand),
    /// Asset uploads
    #[command(subcommand)]
    Upload(upload::UploadCommand),
}

pub async fn run(command: Command, client: Arc<ApiClient>) -> Result<()> {
    match command {
        Command::Login { email, password } => auth::login(client, &email, password).await,
        Command::Logout => auth::logout(client),
        Command::Whoami => auth::whoami(client).await,
        Command::Posts(command) => blog::run(client, command).await,
        Command::Work(command) => work::run(client, command).await,
        Command::Portfolio(command) => portfolio::run(client, command).await,
        Command::Influences(command) => influences::run(client, command).await,
        Command::Athletics(command) => athletics::run(client, command).await,
        Command::Settings(command) => settings::run(client, command).await,
        Command::Upload(command) => upload::run(client, command).await,
    }
}
