//! Influences gateway: books, podcasts, creators

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::Message;
use chrono::{DateTime, Utc};
use reqwest::header;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==================== Types ====================

/// Influence grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfluenceCategory {
    Book,
    Podcast,
    Creator,
}

impl InfluenceCategory {
    /// Wire name, as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            InfluenceCategory::Book => "book",
            InfluenceCategory::Podcast => "podcast",
            InfluenceCategory::Creator => "creator",
        }
    }
}

/// Influence entry as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Influence {
    pub id: Uuid,
    pub title: String,
    pub category: InfluenceCategory,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    pub sort_order: i32,
    /// Hidden from the public listing when false
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating an influence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInfluenceInput {
    pub title: String,
    pub category: InfluenceCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub is_active: bool,
}

/// Fields for updating an influence; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInfluenceInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<InfluenceCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ==================== Operations ====================

impl ApiClient {
    /// List active influences, grouped by category in display order
    pub async fn list_influences(
        &self,
        category: Option<InfluenceCategory>,
    ) -> Result<Vec<Influence>> {
        let mut url = format!("{}/influences", self.config.base_url);
        if let Some(category) = category {
            url.push_str(&format!("?category={}", category.as_str()));
        }

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// List all influences regardless of visibility
    pub async fn list_admin_influences(&self) -> Result<Vec<Influence>> {
        let url = format!("{}/influences/admin/influences", self.config.base_url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Create an influence
    pub async fn create_influence(&self, input: &CreateInfluenceInput) -> Result<Influence> {
        let url = format!("{}/influences/admin/influences", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update an influence
    pub async fn update_influence(
        &self,
        id: Uuid,
        input: &UpdateInfluenceInput,
    ) -> Result<Influence> {
        let url = format!("{}/influences/admin/influences/{}", self.config.base_url, id);

        let response = self
            .authorize(self.client.put(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete an influence
    pub async fn delete_influence(&self, id: Uuid) -> Result<Message> {
        let url = format!("{}/influences/admin/influences/{}", self.config.base_url, id);

        let response = self.authorize(self.client.delete(&url)).send().await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_influence_parses_wire_shape() {
        let body = json!({
            "id": "d2cf4f41-3a76-4adf-9c30-0e3a27fd6f55",
            "title": "Atomic Habits",
            "category": "book",
            "author": "James Clear",
            "description": null,
            "image_url": null,
            "link_url": "https://example.test/atomic-habits",
            "sort_order": 1,
            "is_active": true,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        });

        let influence: Influence = serde_json::from_value(body).unwrap();
        assert_eq!(influence.category, InfluenceCategory::Book);
        assert_eq!(influence.author.as_deref(), Some("James Clear"));
    }

    #[test]
    fn test_influence_rejects_unknown_category() {
        let body = json!({
            "id": "d2cf4f41-3a76-4adf-9c30-0e3a27fd6f55",
            "title": "Some Film",
            "category": "film",
            "sort_order": 0,
            "is_active": true,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        });

        assert!(serde_json::from_value::<Influence>(body).is_err());
    }
}
