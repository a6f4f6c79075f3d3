//! Portfolio gateway: media items and categories

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{MediaType, Message};
use chrono::{DateTime, Utc};
use reqwest::header;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==================== Types ====================

/// Portfolio item as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub media_type: MediaType,
    pub media_url: String,
    /// Preview image, used for videos
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Free-form grouping label
    #[serde(default)]
    pub category: Option<String>,
    pub sort_order: i32,
    /// Native pixel size, when known
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Options for the public item listing
#[derive(Debug, Clone, Default)]
pub struct PortfolioListOptions {
    /// Only items in this category
    pub category: Option<String>,
    /// Only items of this media kind
    pub media_type: Option<MediaType>,
    /// Only featured items
    pub featured_only: bool,
}

/// Fields for creating a portfolio item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePortfolioItemInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub media_type: MediaType,
    pub media_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(default)]
    pub is_featured: bool,
}

/// Fields for updating a portfolio item; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePortfolioItemInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ReorderRequest {
    sort_order: i32,
}

// ==================== Operations ====================

impl ApiClient {
    /// List items, ordered by sort order then newest first
    pub async fn list_portfolio_items(
        &self,
        options: &PortfolioListOptions,
    ) -> Result<Vec<PortfolioItem>> {
        let mut url = format!("{}/portfolio/items", self.config.base_url);

        let mut params = Vec::new();
        if let Some(ref category) = options.category {
            params.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(media_type) = options.media_type {
            params.push(format!("media_type={}", media_type.as_str()));
        }
        if options.featured_only {
            params.push("featured_only=true".to_string());
        }
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Get one item by id
    pub async fn get_portfolio_item(&self, id: Uuid) -> Result<PortfolioItem> {
        let url = format!("{}/portfolio/items/{}", self.config.base_url, id);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Distinct category labels in use, sorted
    pub async fn list_portfolio_categories(&self) -> Result<Vec<String>> {
        let url = format!("{}/portfolio/categories", self.config.base_url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Create an item
    pub async fn create_portfolio_item(
        &self,
        input: &CreatePortfolioItemInput,
    ) -> Result<PortfolioItem> {
        let url = format!("{}/portfolio/admin/items", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update an item
    pub async fn update_portfolio_item(
        &self,
        id: Uuid,
        input: &UpdatePortfolioItemInput,
    ) -> Result<PortfolioItem> {
        let url = format!("{}/portfolio/admin/items/{}", self.config.base_url, id);

        let response = self
            .authorize(self.client.put(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete an item
    pub async fn delete_portfolio_item(&self, id: Uuid) -> Result<Message> {
        let url = format!("{}/portfolio/admin/items/{}", self.config.base_url, id);

        let response = self.authorize(self.client.delete(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Move an item to a new position in the gallery ordering
    pub async fn reorder_portfolio_item(&self, id: Uuid, sort_order: i32) -> Result<PortfolioItem> {
        let url = format!(
            "{}/portfolio/admin/items/{}/reorder",
            self.config.base_url, id
        );

        let response = self
            .authorize(self.client.patch(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&ReorderRequest { sort_order })
            .send()
            .await?;
        self.handle_response(response).await
    }
}
