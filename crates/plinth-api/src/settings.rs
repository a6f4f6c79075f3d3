//! Settings gateway: the site-wide singleton

use crate::client::ApiClient;
use crate::error::Result;
use reqwest::header;
use serde::{Deserialize, Serialize};

// ==================== Types ====================

/// Site-wide settings singleton.
///
/// The server returns an empty object until the row is first written, so
/// every field is optional and missing keys default to unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub athletics_intro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub athletics_philosophy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_linkedin: Option<String>,
}

// ==================== Operations ====================

impl ApiClient {
    /// Fetch the settings singleton; all-unset before the first write
    pub async fn get_settings(&self) -> Result<SiteSettings> {
        let url = format!("{}/settings", self.config.base_url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Upsert the settings singleton; unset fields are left unchanged
    pub async fn update_settings(&self, settings: &SiteSettings) -> Result<SiteSettings> {
        let url = format!("{}/settings/admin", self.config.base_url);

        let response = self
            .authorize(self.client.put(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(settings)
            .send()
            .await?;
        self.handle_response(response).await
    }
}
