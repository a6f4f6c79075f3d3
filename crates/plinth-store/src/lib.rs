//! Client-side stores for the plinth content site
//!
//! Each domain gets a store that owns its state and drives it through a
//! shared [`plinth_api::ApiClient`]. State only changes through an
//! explicit event type folded by a pure `apply`, so every merge rule is
//! inspectable and testable; fetch completions carry a generation and
//! stale ones are dropped. Failures collapse to stable, caller-facing
//! messages, with the underlying detail going to the log.
//!
//! # Example
//!
//! ```rust,no_run
//! use plinth_api::blog::PostListOptions;
//! use plinth_api::{ApiClient, ApiConfig, Session};
//! use plinth_store::blog::BlogStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(ApiClient::new(ApiConfig::default(), Session::new()));
//!
//!     let mut blog = BlogStore::new(client);
//!     blog.fetch_page(&PostListOptions::default()).await?;
//!     println!("{} posts on this page", blog.state().items.len());
//!
//!     Ok(())
//! }
//! ```

pub mod athletics;
pub mod auth;
pub mod blog;
pub mod draft;
pub mod error;
pub mod influences;
pub mod portfolio;
pub mod settings;
pub mod status;
pub mod work;

// Re-export main types
pub use athletics::AthleticsStore;
pub use auth::AuthStore;
pub use blog::BlogStore;
pub use draft::{ExperienceDraft, PostDraft, TimelineEventForm};
pub use error::{Result, StoreError};
pub use influences::InfluencesStore;
pub use portfolio::PortfolioStore;
pub use settings::SettingsStore;
pub use status::RequestStatus;
pub use work::WorkStore;
