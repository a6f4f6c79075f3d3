//! Work gateway: experiences, timelines, featured posts

use crate::blog::Post;
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::Message;
use chrono::{DateTime, NaiveDate, Utc};
use plinth_document::Document;
use reqwest::header;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==================== Types ====================

/// Professional experience as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    /// URL-safe identifier, unique per experience
    pub slug: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Structured body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Document>,
    /// Pre-rendered body, saved alongside `description`
    #[serde(default)]
    pub description_html: Option<String>,
    #[serde(default)]
    pub header_image_url: Option<String>,
    pub sort_order: i32,
    /// Hidden from the public listing when false
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dated milestone within an experience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: Uuid,
    pub experience_id: Uuid,
    pub event_date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Post pinned to an experience, enriched with its feature position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedPost {
    #[serde(flatten)]
    pub post: Post,
    pub sort_order: i32,
}

/// One entry of a featured-post selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedPostRef {
    pub post_id: Uuid,
    pub sort_order: i32,
}

/// Raw join row returned when a selection is replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedPostLink {
    pub experience_id: Uuid,
    pub post_id: Uuid,
    pub sort_order: i32,
}

/// Experience with its timeline and featured posts embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceDetail {
    #[serde(flatten)]
    pub experience: Experience,
    /// Newest event first
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    /// Published posts only, in feature order
    #[serde(default)]
    pub featured_posts: Vec<FeaturedPost>,
}

/// Fields for creating an experience
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExperienceInput {
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub is_active: bool,
}

/// Fields for updating an experience; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExperienceInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Fields for creating a timeline event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimelineEventInput {
    pub event_date: NaiveDate,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Fields for updating a timeline event; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTimelineEventInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ReplaceFeaturedPostsRequest<'a> {
    posts: &'a [FeaturedPostRef],
}

// ==================== Operations ====================

impl ApiClient {
    /// List active experiences in display order
    pub async fn list_experiences(&self) -> Result<Vec<Experience>> {
        let url = format!("{}/work/experiences", self.config.base_url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Get an experience by slug with its timeline and featured posts
    pub async fn get_experience(&self, slug: &str) -> Result<ExperienceDetail> {
        let url = format!(
            "{}/work/experiences/{}",
            self.config.base_url,
            urlencoding::encode(slug)
        );

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// List all experiences regardless of visibility, in display order
    pub async fn list_admin_experiences(&self) -> Result<Vec<Experience>> {
        let url = format!("{}/work/admin/experiences", self.config.base_url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Create an experience
    pub async fn create_experience(&self, input: &CreateExperienceInput) -> Result<Experience> {
        let url = format!("{}/work/admin/experiences", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update an experience
    pub async fn update_experience(
        &self,
        id: Uuid,
        input: &UpdateExperienceInput,
    ) -> Result<Experience> {
        let url = format!("{}/work/admin/experiences/{}", self.config.base_url, id);

        let response = self
            .authorize(self.client.put(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete an experience along with its timeline and feature links
    pub async fn delete_experience(&self, id: Uuid) -> Result<Message> {
        let url = format!("{}/work/admin/experiences/{}", self.config.base_url, id);

        let response = self.authorize(self.client.delete(&url)).send().await?;
        self.handle_response(response).await
    }

    /// List an experience's timeline, newest event first
    pub async fn list_timeline(&self, experience_id: Uuid) -> Result<Vec<TimelineEvent>> {
        let url = format!(
            "{}/work/admin/experiences/{}/timeline",
            self.config.base_url, experience_id
        );

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Add a timeline event to an experience
    pub async fn create_timeline_event(
        &self,
        experience_id: Uuid,
        input: &CreateTimelineEventInput,
    ) -> Result<TimelineEvent> {
        let url = format!(
            "{}/work/admin/experiences/{}/timeline",
            self.config.base_url, experience_id
        );

        let response = self
            .authorize(self.client.post(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update a timeline event
    pub async fn update_timeline_event(
        &self,
        event_id: Uuid,
        input: &UpdateTimelineEventInput,
    ) -> Result<TimelineEvent> {
        let url = format!("{}/work/admin/timeline/{}", self.config.base_url, event_id);

        let response = self
            .authorize(self.client.put(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a timeline event
    pub async fn delete_timeline_event(&self, event_id: Uuid) -> Result<Message> {
        let url = format!("{}/work/admin/timeline/{}", self.config.base_url, event_id);

        let response = self.authorize(self.client.delete(&url)).send().await?;
        self.handle_response(response).await
    }

    /// List an experience's featured posts in feature order, drafts included
    pub async fn list_featured_posts(&self, experience_id: Uuid) -> Result<Vec<FeaturedPost>> {
        let url = format!(
            "{}/work/admin/experiences/{}/featured-posts",
            self.config.base_url, experience_id
        );

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Replace an experience's featured-post selection in one request.
    ///
    /// The response carries bare join rows; call
    /// [`list_featured_posts`](Self::list_featured_posts) afterwards for the
    /// enriched view.
    pub async fn replace_featured_posts(
        &self,
        experience_id: Uuid,
        posts: &[FeaturedPostRef],
    ) -> Result<Vec<FeaturedPostLink>> {
        let url = format!(
            "{}/work/admin/experiences/{}/featured-posts",
            self.config.base_url, experience_id
        );

        let response = self
            .authorize(self.client.put(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&ReplaceFeaturedPostsRequest { posts })
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
    fn test_detail_parses_flattened_shape() {
        let body = json!({
            "id": "7f7f86a4-2f5d-43c0-9db3-1f1a4a5f2b10",
            "title": "Mountain Guiding",
            "slug": "mountain-guiding",
            "subtitle": "Alps and beyond",
            "description": {"type": "doc", "content": []},
            "description_html": "",
            "header_image_url": null,
            "sort_order": 0,
            "is_active": true,
            "created_at": "2023-06-01T00:00:00Z",
            "updated_at": "2023-06-02T00:00:00Z",
            "timeline": [{
                "id": "0465b7e1-08ba-4aae-bf3f-13b3a1f60dcf",
                "experience_id": "7f7f86a4-2f5d-43c0-9db3-1f1a4a5f2b10",
                "event_date": "2022-08-15",
                "title": "First ascent",
                "subtitle": null,
                "photo_url": null,
                "sort_order": 0
            }],
            "featured_posts": []
        });

        let detail: ExperienceDetail = serde_json::from_value(body).unwrap();
        assert_eq!(detail.experience.slug, "mountain-guiding");
        assert_eq!(detail.timeline.len(), 1);
        assert_eq!(
            detail.timeline[0].event_date,
            NaiveDate::from_ymd_opt(2022, 8, 15).unwrap()
        );
        assert!(detail.featured_posts.is_empty());
    }

    #[test]
    fn test_featured_post_flattens_sort_order_next_to_post_fields() {
        let body = json!({
            "id": "5bd9f9c2-7a55-4c2f-9b19-cc2dd03148a1",
            "title": "Summit Report",
            "slug": "summit-report",
            "status": "published",
            "created_at": "2024-02-28T09:30:00Z",
            "updated_at": "2024-03-01T12:00:00Z",
            "sort_order": 1
        });

        let featured: FeaturedPost = serde_json::from_value(body).unwrap();
        assert_eq!(featured.post.slug, "summit-report");
        assert_eq!(featured.sort_order, 1);
    }

    #[test]
    fn test_replace_request_wraps_posts_key() {
        let refs = [FeaturedPostRef {
            post_id: Uuid::nil(),
            sort_order: 0,
        }];
        let value = serde_json::to_value(ReplaceFeaturedPostsRequest { posts: &refs }).unwrap();
        assert_eq!(
            value,
            json!({"posts": [{"post_id": "00000000-0000-0000-0000-000000000000", "sort_order": 0}]})
        );
    }
}
