//! Settings store: the site-wide singleton

use crate::error::{Result, StoreError};
use crate::status::RequestStatus;
use plinth_api::settings::SiteSettings;
use plinth_api::ApiClient;
use std::sync::Arc;

// ==================== State ====================

/// Settings state, mutated only through [`SettingsState::apply`]
#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub data: SiteSettings,
    pub status: RequestStatus,
    pub error: Option<String>,
}

// ==================== Events ====================

/// Everything that can change settings state
#[derive(Debug, Clone)]
pub enum SettingsEvent {
    FetchStarted,
    Fetched { settings: SiteSettings },
    FetchFailed { message: String },
    /// Upsert result arrived; replaces the data without touching status
    Updated { settings: SiteSettings },
}

impl SettingsState {
    /// Fold one event into the state
    pub fn apply(&mut self, event: SettingsEvent) {
        match event {
            SettingsEvent::FetchStarted => {
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            SettingsEvent::Fetched { settings } => {
                self.data = settings;
                self.status = RequestStatus::Idle;
            }
            SettingsEvent::FetchFailed { message } => {
                self.status = RequestStatus::Failed;
                self.error = Some(message);
            }
            SettingsEvent::Updated { settings } => {
                self.data = settings;
            }
        }
    }
}

// ==================== Store ====================

/// Settings store; owns its state and drives it through the API client
pub struct SettingsStore {
    client: Arc<ApiClient>,
    state: SettingsState,
}

impl SettingsStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: SettingsState::default(),
        }
    }

    pub fn state(&self) -> &SettingsState {
        &self.state
    }

    /// Apply an externally produced event
    pub fn apply(&mut self, event: SettingsEvent) {
        self.state.apply(event);
    }

    /// Fetch the settings singleton
    pub async fn fetch_settings(&mut self) -> Result<()> {
        self.state.apply(SettingsEvent::FetchStarted);

        match self.client.get_settings().await {
            Ok(settings) => {
                self.state.apply(SettingsEvent::Fetched { settings });
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from_api(err, "Failed to fetch settings");
                self.state.apply(SettingsEvent::FetchFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Upsert the settings singleton; only set fields are written
    pub async fn update_settings(&mut self, settings: &SiteSettings) -> Result<SiteSettings> {
        let saved = self
            .client
            .update_settings(settings)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to update settings"))?;
        self.state.apply(SettingsEvent::Updated {
            settings: saved.clone(),
        });
        Ok(saved)
    }
}
