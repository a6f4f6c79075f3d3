//! Blog gateway: posts and tags

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::Message;
use chrono::{DateTime, Utc};
use plinth_document::Document;
use reqwest::header;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==================== Types ====================

/// Post publication state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

/// Blog tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    /// URL-safe identifier, unique per tag
    pub slug: String,
}

/// Blog post as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    /// URL-safe identifier, unique per post
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Structured body; omitted from list responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Document>,
    /// Pre-rendered body, saved alongside `content`
    #[serde(default)]
    pub content_html: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    pub status: PostStatus,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub author_id: Option<Uuid>,
    /// Set when the post was last published; cleared on unpublish
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// One page of published posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    /// Total published posts matching the filter, across all pages
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

/// Options for the public post listing
#[derive(Debug, Clone, Default)]
pub struct PostListOptions {
    /// 1-based page number (server default 1)
    pub page: Option<u32>,
    /// Page size (server default 10, capped at 50)
    pub per_page: Option<u32>,
    /// Only posts carrying the tag with this slug
    pub tag: Option<String>,
}

/// Fields for creating a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub content: Document,
    pub content_html: String,
    /// Serialized even when absent so clearing a cover sticks
    pub cover_image_url: Option<String>,
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

/// Fields for updating a post; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<Uuid>>,
}

/// Fields for creating a tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagInput {
    pub name: String,
    pub slug: String,
}

// ==================== Operations ====================

impl ApiClient {
    /// List published posts, newest first, one page at a time
    pub async fn list_posts(&self, options: &PostListOptions) -> Result<PostListResponse> {
        let mut url = format!("{}/blog/posts", self.config.base_url);

        let mut params = Vec::new();
        if let Some(page) = options.page {
            params.push(format!("page={}", page));
        }
        if let Some(per_page) = options.per_page {
            params.push(format!("per_page={}", per_page));
        }
        if let Some(ref tag) = options.tag {
            params.push(format!("tag={}", urlencoding::encode(tag)));
        }
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Get a published post by slug
    pub async fn get_post(&self, slug: &str) -> Result<Post> {
        let url = format!(
            "{}/blog/posts/{}",
            self.config.base_url,
            urlencoding::encode(slug)
        );

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// List every tag, ordered by name
    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let url = format!("{}/blog/tags", self.config.base_url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// List all posts regardless of status, most recently updated first
    pub async fn list_admin_posts(&self) -> Result<Vec<Post>> {
        let url = format!("{}/blog/admin/posts", self.config.base_url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Get one post by id regardless of status
    pub async fn get_admin_post(&self, id: Uuid) -> Result<Post> {
        let url = format!("{}/blog/admin/posts/{}", self.config.base_url, id);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Create a post
    pub async fn create_post(&self, input: &CreatePostInput) -> Result<Post> {
        let url = format!("{}/blog/admin/posts", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update a post
    pub async fn update_post(&self, id: Uuid, input: &UpdatePostInput) -> Result<Post> {
        let url = format!("{}/blog/admin/posts/{}", self.config.base_url, id);

        let response = self
            .authorize(self.client.put(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a post
    pub async fn delete_post(&self, id: Uuid) -> Result<Message> {
        let url = format!("{}/blog/admin/posts/{}", self.config.base_url, id);

        let response = self.authorize(self.client.delete(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Mark a post published and stamp `published_at`
    pub async fn publish_post(&self, id: Uuid) -> Result<Post> {
        let url = format!("{}/blog/admin/posts/{}/publish", self.config.base_url, id);

        let response = self.authorize(self.client.patch(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Return a post to draft and clear `published_at`
    pub async fn unpublish_post(&self, id: Uuid) -> Result<Post> {
        let url = format!("{}/blog/admin/posts/{}/unpublish", self.config.base_url, id);

        let response = self.authorize(self.client.patch(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Create a tag
    pub async fn create_tag(&self, input: &CreateTagInput) -> Result<Tag> {
        let url = format!("{}/blog/admin/tags", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a tag, detaching it from every post
    pub async fn delete_tag(&self, id: Uuid) -> Result<Message> {
        let url = format!("{}/blog/admin/tags/{}", self.config.base_url, id);

        let response = self.authorize(self.client.delete(&url)).send().await?;
        self.handle_response(response).await
    }
}
