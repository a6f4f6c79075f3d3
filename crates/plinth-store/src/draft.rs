//! Editing drafts for posts and experiences.
//!
//! A draft owns the in-progress form state plus a [`DocumentBody`], so the
//! structured body and its rendered HTML always leave together. The slug
//! field follows the title for as long as it still matches the slug
//! derived from the title's previous value; one manual slug edit breaks
//! the link, and editing it back restores it.

use crate::error::{Result, StoreError};
use chrono::NaiveDate;
use plinth_api::blog::{CreatePostInput, Post, PostStatus, UpdatePostInput};
use plinth_api::work::{
    CreateExperienceInput, CreateTimelineEventInput, Experience, UpdateExperienceInput,
};
use plinth_document::{derive_slug, DocumentBody, Node};
use uuid::Uuid;

fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ==================== Post draft ====================

/// In-progress blog post edit
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    id: Option<Uuid>,
    title: String,
    slug: String,
    excerpt: String,
    body: DocumentBody,
    cover_image_url: Option<String>,
    status: Option<PostStatus>,
    meta_title: String,
    meta_description: String,
    tag_ids: Vec<Uuid>,
}

impl PostDraft {
    /// Blank draft for a new post
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft pre-filled from an existing post
    pub fn from_post(post: &Post) -> Self {
        let mut draft = Self::new();
        draft.absorb(post);
        draft
    }

    /// Fill the draft from a freshly loaded post.
    ///
    /// Scalar fields are overwritten; the body is only applied while still
    /// empty, so a slow load cannot clobber writing already in progress.
    pub fn absorb(&mut self, post: &Post) {
        self.id = Some(post.id);
        self.title = post.title.clone();
        self.slug = post.slug.clone();
        self.excerpt = post.excerpt.clone().unwrap_or_default();
        self.cover_image_url = post.cover_image_url.clone();
        self.status = Some(post.status);
        self.meta_title = post.meta_title.clone().unwrap_or_default();
        self.meta_description = post.meta_description.clone().unwrap_or_default();
        self.tag_ids = post.tags.iter().map(|t| t.id).collect();
        self.body.load(post.content.clone());
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }

    pub fn cover_image_url(&self) -> Option<&str> {
        self.cover_image_url.as_deref()
    }

    pub fn tag_ids(&self) -> &[Uuid] {
        &self.tag_ids
    }

    pub fn body(&self) -> &DocumentBody {
        &self.body
    }

    /// Set the title; the slug follows while it still matches the slug
    /// derived from the previous title
    pub fn set_title(&mut self, title: &str) {
        if self.slug == derive_slug(&self.title) {
            self.slug = derive_slug(title);
        }
        self.title = title.to_string();
    }

    /// Set the slug by hand, breaking the link to the title
    pub fn set_slug(&mut self, slug: &str) {
        self.slug = slug.to_string();
    }

    pub fn set_excerpt(&mut self, excerpt: &str) {
        self.excerpt = excerpt.to_string();
    }

    pub fn set_cover_image_url(&mut self, url: Option<String>) {
        self.cover_image_url = url;
    }

    pub fn set_meta_title(&mut self, meta_title: &str) {
        self.meta_title = meta_title.to_string();
    }

    pub fn set_meta_description(&mut self, meta_description: &str) {
        self.meta_description = meta_description.to_string();
    }

    pub fn add_tag(&mut self, tag_id: Uuid) {
        if !self.tag_ids.contains(&tag_id) {
            self.tag_ids.push(tag_id);
        }
    }

    pub fn remove_tag(&mut self, tag_id: Uuid) {
        self.tag_ids.retain(|id| *id != tag_id);
    }

    /// Edit the body blocks; the rendered HTML is refreshed afterwards
    pub fn edit_body(&mut self, f: impl FnOnce(&mut Vec<Node>)) {
        self.body.edit(f);
    }

    /// Guard shared by create and update saves
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.slug.trim().is_empty() {
            return Err(StoreError::Invalid(
                "Title and slug are required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_create_input(&self) -> CreatePostInput {
        let (content, content_html) = self.body.to_parts();
        CreatePostInput {
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: none_if_empty(&self.excerpt),
            content,
            content_html,
            cover_image_url: self.cover_image_url.clone(),
            status: self.status.unwrap_or(PostStatus::Draft),
            meta_title: none_if_empty(&self.meta_title),
            meta_description: none_if_empty(&self.meta_description),
            tag_ids: self.tag_ids.clone(),
        }
    }

    pub fn to_update_input(&self) -> UpdatePostInput {
        let (content, content_html) = self.body.to_parts();
        UpdatePostInput {
            title: Some(self.title.clone()),
            slug: Some(self.slug.clone()),
            excerpt: none_if_empty(&self.excerpt),
            content: Some(content),
            content_html: Some(content_html),
            cover_image_url: self.cover_image_url.clone(),
            status: self.status,
            meta_title: none_if_empty(&self.meta_title),
            meta_description: none_if_empty(&self.meta_description),
            tag_ids: Some(self.tag_ids.clone()),
        }
    }
}

// ==================== Experience draft ====================

/// In-progress experience edit.
///
/// Unlike posts, the slug only follows the title while the experience has
/// never been saved; published experience URLs stay put.
#[derive(Debug, Clone)]
pub struct ExperienceDraft {
    id: Option<Uuid>,
    title: String,
    slug: String,
    subtitle: String,
    body: DocumentBody,
    header_image_url: Option<String>,
    sort_order: i32,
    is_active: bool,
}

impl Default for ExperienceDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            slug: String::new(),
            subtitle: String::new(),
            body: DocumentBody::new(),
            header_image_url: None,
            sort_order: 0,
            is_active: true,
        }
    }
}

impl ExperienceDraft {
    /// Blank draft for a new experience
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft pre-filled from an existing experience
    pub fn from_experience(experience: &Experience) -> Self {
        let mut draft = Self::new();
        draft.absorb(experience);
        draft
    }

    /// Fill the draft from a freshly loaded experience; the body is only
    /// applied while still empty
    pub fn absorb(&mut self, experience: &Experience) {
        self.id = Some(experience.id);
        self.title = experience.title.clone();
        self.slug = experience.slug.clone();
        self.subtitle = experience.subtitle.clone().unwrap_or_default();
        self.header_image_url = experience.header_image_url.clone();
        self.sort_order = experience.sort_order;
        self.is_active = experience.is_active;
        self.body.load(experience.description.clone());
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn body(&self) -> &DocumentBody {
        &self.body
    }

    /// Set the title; the slug follows only while the draft is unsaved and
    /// still matches the derived slug
    pub fn set_title(&mut self, title: &str) {
        if self.id.is_none() && self.slug == derive_slug(&self.title) {
            self.slug = derive_slug(title);
        }
        self.title = title.to_string();
    }

    /// Set the slug by hand, breaking the link to the title
    pub fn set_slug(&mut self, slug: &str) {
        self.slug = slug.to_string();
    }

    pub fn set_subtitle(&mut self, subtitle: &str) {
        self.subtitle = subtitle.to_string();
    }

    pub fn set_header_image_url(&mut self, url: Option<String>) {
        self.header_image_url = url;
    }

    pub fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }

    pub fn set_is_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Edit the body blocks; the rendered HTML is refreshed afterwards
    pub fn edit_body(&mut self, f: impl FnOnce(&mut Vec<Node>)) {
        self.body.edit(f);
    }

    /// Guard shared by create and update saves
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.slug.trim().is_empty() {
            return Err(StoreError::Invalid(
                "Title and slug are required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_create_input(&self) -> CreateExperienceInput {
        let (description, description_html) = self.body.to_parts();
        CreateExperienceInput {
            title: self.title.clone(),
            slug: self.slug.clone(),
            subtitle: none_if_empty(&self.subtitle),
            description: Some(description),
            description_html: Some(description_html),
            header_image_url: self.header_image_url.clone(),
            sort_order: self.sort_order,
            is_active: self.is_active,
        }
    }

    pub fn to_update_input(&self) -> UpdateExperienceInput {
        let (description, description_html) = self.body.to_parts();
        UpdateExperienceInput {
            title: Some(self.title.clone()),
            slug: Some(self.slug.clone()),
            subtitle: none_if_empty(&self.subtitle),
            description: Some(description),
            description_html: Some(description_html),
            header_image_url: self.header_image_url.clone(),
            sort_order: Some(self.sort_order),
            is_active: Some(self.is_active),
        }
    }
}

// ==================== Timeline form ====================

/// Form state for one timeline event
#[derive(Debug, Clone, Default)]
pub struct TimelineEventForm {
    pub event_date: Option<NaiveDate>,
    pub title: String,
    pub subtitle: String,
    pub photo_url: Option<String>,
    pub sort_order: i32,
}

impl TimelineEventForm {
    /// Validate and convert into a create input
    pub fn to_input(&self) -> Result<CreateTimelineEventInput> {
        let event_date = match self.event_date {
            Some(date) if !self.title.trim().is_empty() => date,
            _ => {
                return Err(StoreError::Invalid(
                    "Date and title are required".to_string(),
                ))
            }
        };

        Ok(CreateTimelineEventInput {
            event_date,
            title: self.title.clone(),
            subtitle: none_if_empty(&self.subtitle),
            photo_url: self.photo_url.clone(),
            sort_order: self.sort_order,
        })
    }
}
