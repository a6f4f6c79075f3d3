//! Typed client for the plinth content API
//!
//! Wraps every REST endpoint of the content backend behind one
//! [`ApiClient`]: blog posts and tags, work experiences with timelines
//! and featured posts, the portfolio gallery, influences, athletics
//! services, site settings, auth, and multipart uploads. Responses are
//! deserialized into typed structs; bodies that do not match the
//! expected shape are rejected as [`ApiError::Json`].
//!
//! # Example
//!
//! ```rust,no_run
//! use plinth_api::blog::PostListOptions;
//! use plinth_api::{ApiClient, ApiConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new();
//!     let client = ApiClient::new(ApiConfig::default(), session.clone());
//!
//!     client.login("admin@example.com", "password").await?;
//!
//!     let page = client.list_posts(&PostListOptions::default()).await?;
//!     println!("{} published posts", page.total);
//!
//!     Ok(())
//! }
//! ```

pub mod athletics;
pub mod auth;
pub mod blog;
pub mod client;
pub mod config;
pub mod error;
pub mod influences;
pub mod portfolio;
pub mod session;
pub mod settings;
pub mod types;
pub mod upload;
pub mod work;

// Re-export main types
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use session::{Session, TokenPair};
pub use types::{MediaType, Message};
