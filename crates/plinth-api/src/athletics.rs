//! Athletics gateway: coaching services and the contact form

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::Message;
use chrono::{DateTime, Utc};
use reqwest::header;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==================== Types ====================

/// Coaching service as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleticsService {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Icon identifier rendered by the client
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub price_info: Option<String>,
    pub sort_order: i32,
    /// Hidden from the public listing when false
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAthleticsServiceInput {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_info: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub is_active: bool,
}

/// Fields for updating a service; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAthleticsServiceInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Contact form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

// ==================== Operations ====================

impl ApiClient {
    /// List active services in display order
    pub async fn list_athletics_services(&self) -> Result<Vec<AthleticsService>> {
        let url = format!("{}/athletics/services", self.config.base_url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// List all services regardless of visibility
    pub async fn list_admin_athletics_services(&self) -> Result<Vec<AthleticsService>> {
        let url = format!("{}/athletics/admin/services", self.config.base_url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Create a service
    pub async fn create_athletics_service(
        &self,
        input: &CreateAthleticsServiceInput,
    ) -> Result<AthleticsService> {
        let url = format!("{}/athletics/admin/services", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update a service
    pub async fn update_athletics_service(
        &self,
        id: Uuid,
        input: &UpdateAthleticsServiceInput,
    ) -> Result<AthleticsService> {
        let url = format!("{}/athletics/admin/services/{}", self.config.base_url, id);

        let response = self
            .authorize(self.client.put(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a service
    pub async fn delete_athletics_service(&self, id: Uuid) -> Result<Message> {
        let url = format!("{}/athletics/admin/services/{}", self.config.base_url, id);

        let response = self.authorize(self.client.delete(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Submit the public contact form
    pub async fn submit_contact(&self, message: &ContactMessage) -> Result<Message> {
        let url = format!("{}/athletics/contact", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(message)
            .send()
            .await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_parses_wire_shape() {
        let body = json!({
            "id": "e30b51b5-90b8-4a8e-bb27-7a1f13e52b8f",
            "title": "1:1 Coaching",
            "description": "Personalized training plans",
            "icon_name": "target",
            "price_info": "from $80/session",
            "sort_order": 0,
            "is_active": true,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        });

        let service: AthleticsService = serde_json::from_value(body).unwrap();
        assert_eq!(service.title, "1:1 Coaching");
        assert_eq!(service.price_info.as_deref(), Some("from $80/session"));
    }

    #[test]
    fn test_contact_message_serializes_all_fields() {
        let message = ContactMessage {
            name: "Jo".to_string(),
            email: "jo@example.test".to_string(),
            message: "Hello".to_string(),
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({"name": "Jo", "email": "jo@example.test", "message": "Hello"})
        );
    }
}
