//! Blog store: public page, admin list, tags

use crate::draft::PostDraft;
use crate::error::{Result, StoreError};
use crate::status::RequestStatus;
use plinth_api::blog::{
    CreatePostInput, CreateTagInput, Post, PostListOptions, PostListResponse, Tag, UpdatePostInput,
};
use plinth_api::ApiClient;
use plinth_document::derive_slug;
use std::sync::Arc;
use uuid::Uuid;

// ==================== State ====================

/// Blog state, mutated only through [`BlogState::apply`]
#[derive(Debug, Clone)]
pub struct BlogState {
    /// Current page of published posts
    pub items: Vec<Post>,
    /// Total published posts matching the filter, across all pages
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    /// Admin listing, drafts included
    pub admin_items: Vec<Post>,
    /// Post being viewed or edited
    pub current: Option<Post>,
    pub tags: Vec<Tag>,
    pub status: RequestStatus,
    pub error: Option<String>,
    /// Bumped when a public page fetch starts; stale completions are dropped
    pub page_generation: u64,
    /// Bumped when an admin list fetch starts
    pub admin_generation: u64,
}

impl Default for BlogState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            per_page: 10,
            admin_items: Vec::new(),
            current: None,
            tags: Vec::new(),
            status: RequestStatus::Idle,
            error: None,
            page_generation: 0,
            admin_generation: 0,
        }
    }
}

// ==================== Events ====================

/// Everything that can change blog state
#[derive(Debug, Clone)]
pub enum BlogEvent {
    PageFetchStarted,
    PageFetched {
        generation: u64,
        page: PostListResponse,
    },
    PageFetchFailed {
        generation: u64,
        message: String,
    },
    PostFetchStarted,
    PostFetched {
        post: Post,
    },
    PostFetchFailed {
        message: String,
    },
    AdminFetchStarted,
    AdminFetched {
        generation: u64,
        posts: Vec<Post>,
    },
    AdminFetchFailed {
        generation: u64,
        message: String,
    },
    /// Admin detail load; touches `current` only
    AdminPostLoaded {
        post: Post,
    },
    TagsLoaded {
        tags: Vec<Tag>,
    },
    PostCreated {
        post: Post,
    },
    PostUpdated {
        post: Post,
    },
    PostPublished {
        post: Post,
    },
    PostUnpublished {
        post: Post,
    },
    PostDeleted {
        id: Uuid,
    },
    CurrentCleared,
    ErrorCleared,
}

impl BlogState {
    /// Fold one event into the state.
    ///
    /// Fetch completions carry the generation captured when the fetch
    /// started; a completion whose generation no longer matches is dropped
    /// so a late response cannot overwrite newer state.
    pub fn apply(&mut self, event: BlogEvent) {
        match event {
            BlogEvent::PageFetchStarted => {
                self.page_generation += 1;
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            BlogEvent::PageFetched { generation, page } => {
                if generation != self.page_generation {
                    return;
                }
                self.items = page.posts;
                self.total = page.total;
                self.page = page.page;
                self.per_page = page.per_page;
                self.status = RequestStatus::Idle;
            }
            BlogEvent::PageFetchFailed {
                generation,
                message,
            } => {
                if generation != self.page_generation {
                    return;
                }
                self.status = RequestStatus::Failed;
                self.error = Some(message);
            }
            BlogEvent::PostFetchStarted => {
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            BlogEvent::PostFetched { post } => {
                self.current = Some(post);
                self.status = RequestStatus::Idle;
            }
            BlogEvent::PostFetchFailed { message } => {
                self.status = RequestStatus::Failed;
                self.error = Some(message);
            }
            BlogEvent::AdminFetchStarted => {
                self.admin_generation += 1;
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            BlogEvent::AdminFetched { generation, posts } => {
                if generation != self.admin_generation {
                    return;
                }
                self.admin_items = posts;
                self.status = RequestStatus::Idle;
            }
            BlogEvent::AdminFetchFailed {
                generation,
                message,
            } => {
                if generation != self.admin_generation {
                    return;
                }
                self.status = RequestStatus::Failed;
                self.error = Some(message);
            }
            BlogEvent::AdminPostLoaded { post } => {
                self.current = Some(post);
            }
            BlogEvent::TagsLoaded { tags } => {
                self.tags = tags;
            }
            BlogEvent::PostCreated { post } => {
                self.admin_items.insert(0, post);
            }
            BlogEvent::PostUpdated { post } => {
                if let Some(existing) = self.admin_items.iter_mut().find(|p| p.id == post.id) {
                    *existing = post.clone();
                }
                if self.current.as_ref().is_some_and(|c| c.id == post.id) {
                    self.current = Some(post);
                }
            }
            BlogEvent::PostPublished { post } | BlogEvent::PostUnpublished { post } => {
                if let Some(existing) = self.admin_items.iter_mut().find(|p| p.id == post.id) {
                    *existing = post;
                }
            }
            BlogEvent::PostDeleted { id } => {
                self.admin_items.retain(|p| p.id != id);
            }
            BlogEvent::CurrentCleared => {
                self.current = None;
            }
            BlogEvent::ErrorCleared => {
                self.error = None;
            }
        }
    }
}

// ==================== Store ====================

/// Blog store; owns its state and drives it through the API client
pub struct BlogStore {
    client: Arc<ApiClient>,
    state: BlogState,
}

impl BlogStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: BlogState::default(),
        }
    }

    pub fn state(&self) -> &BlogState {
        &self.state
    }

    /// Apply an externally produced event
    pub fn apply(&mut self, event: BlogEvent) {
        self.state.apply(event);
    }

    /// Fetch one page of published posts
    pub async fn fetch_page(&mut self, options: &PostListOptions) -> Result<()> {
        self.state.apply(BlogEvent::PageFetchStarted);
        let generation = self.state.page_generation;

        match self.client.list_posts(options).await {
            Ok(page) => {
                self.state.apply(BlogEvent::PageFetched { generation, page });
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from_api(err, "Failed to fetch posts");
                self.state.apply(BlogEvent::PageFetchFailed {
                    generation,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Fetch a published post by slug into `current`
    pub async fn fetch_post(&mut self, slug: &str) -> Result<()> {
        self.state.apply(BlogEvent::PostFetchStarted);

        match self.client.get_post(slug).await {
            Ok(post) => {
                self.state.apply(BlogEvent::PostFetched { post });
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from_api(err, "Failed to fetch post");
                self.state.apply(BlogEvent::PostFetchFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Fetch the admin listing, drafts included
    pub async fn fetch_admin_posts(&mut self) -> Result<()> {
        self.state.apply(BlogEvent::AdminFetchStarted);
        let generation = self.state.admin_generation;

        match self.client.list_admin_posts().await {
            Ok(posts) => {
                self.state
                    .apply(BlogEvent::AdminFetched { generation, posts });
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from_api(err, "Failed to fetch admin posts");
                self.state.apply(BlogEvent::AdminFetchFailed {
                    generation,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Fetch one post by id into `current`, regardless of status
    pub async fn fetch_admin_post(&mut self, id: Uuid) -> Result<()> {
        let post = self
            .client
            .get_admin_post(id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch post"))?;
        self.state.apply(BlogEvent::AdminPostLoaded { post });
        Ok(())
    }

    /// Fetch every tag
    pub async fn fetch_tags(&mut self) -> Result<()> {
        let tags = self
            .client
            .list_tags()
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch tags"))?;
        self.state.apply(BlogEvent::TagsLoaded { tags });
        Ok(())
    }

    /// Create a post and prepend it to the admin listing
    pub async fn create_post(&mut self, input: &CreatePostInput) -> Result<Post> {
        let post = self
            .client
            .create_post(input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to create post"))?;
        self.state.apply(BlogEvent::PostCreated { post: post.clone() });
        Ok(post)
    }

    /// Update a post in place, syncing `current` when it is the same post
    pub async fn update_post(&mut self, id: Uuid, input: &UpdatePostInput) -> Result<Post> {
        let post = self
            .client
            .update_post(id, input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to update post"))?;
        self.state.apply(BlogEvent::PostUpdated { post: post.clone() });
        Ok(post)
    }

    /// Delete a post and drop it from the admin listing
    pub async fn delete_post(&mut self, id: Uuid) -> Result<()> {
        self.client
            .delete_post(id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to delete post"))?;
        self.state.apply(BlogEvent::PostDeleted { id });
        Ok(())
    }

    /// Publish a post; the server stamps `published_at`
    pub async fn publish_post(&mut self, id: Uuid) -> Result<Post> {
        let post = self
            .client
            .publish_post(id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to publish post"))?;
        self.state.apply(BlogEvent::PostPublished { post: post.clone() });
        Ok(post)
    }

    /// Return a post to draft; the server clears `published_at`
    pub async fn unpublish_post(&mut self, id: Uuid) -> Result<Post> {
        let post = self
            .client
            .unpublish_post(id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to unpublish post"))?;
        self.state
            .apply(BlogEvent::PostUnpublished { post: post.clone() });
        Ok(post)
    }

    /// Create a tag named `name` with a derived slug, then refresh the list
    pub async fn create_tag(&mut self, name: &str) -> Result<Tag> {
        let input = CreateTagInput {
            name: name.to_string(),
            slug: derive_slug(name),
        };
        let tag = self
            .client
            .create_tag(&input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to create tag"))?;
        self.fetch_tags().await?;
        Ok(tag)
    }

    /// Delete a tag, then refresh the list
    pub async fn delete_tag(&mut self, id: Uuid) -> Result<()> {
        self.client
            .delete_tag(id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to delete tag"))?;
        self.fetch_tags().await
    }

    /// Save a draft: create when it has no id yet, update otherwise
    pub async fn save_draft(&mut self, draft: &PostDraft) -> Result<Post> {
        draft.validate()?;
        match draft.id() {
            None => self.create_post(&draft.to_create_input()).await,
            Some(id) => self.update_post(id, &draft.to_update_input()).await,
        }
    }

    pub fn clear_current(&mut self) {
        self.state.apply(BlogEvent::CurrentCleared);
    }

    pub fn clear_error(&mut self) {
        self.state.apply(BlogEvent::ErrorCleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use plinth_api::blog::PostStatus;

    fn post(id: u128, title: &str) -> Post {
        Post {
            id: Uuid::from_u128(id),
            title: title.to_string(),
            slug: derive_slug(title),
            excerpt: None,
            content: None,
            content_html: None,
            cover_image_url: None,
            status: PostStatus::Draft,
            meta_title: None,
            meta_description: None,
            author_id: None,
            published_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tags: Vec::new(),
        }
    }

    fn page_of(posts: Vec<Post>) -> PostListResponse {
        PostListResponse {
            total: posts.len() as u64,
            posts,
            page: 1,
            per_page: 10,
        }
    }

    #[test]
    fn test_page_fetch_lifecycle_returns_to_idle() {
        let mut state = BlogState::default();

        state.apply(BlogEvent::PageFetchStarted);
        assert_eq!(state.status, RequestStatus::Loading);
        assert_eq!(state.error, None);

        let generation = state.page_generation;
        state.apply(BlogEvent::PageFetched {
            generation,
            page: page_of(vec![post(1, "First")]),
        });
        assert_eq!(state.status, RequestStatus::Idle);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.total, 1);
    }

    #[test]
    fn test_stale_page_completion_is_dropped() {
        let mut state = BlogState::default();

        state.apply(BlogEvent::PageFetchStarted);
        let stale = state.page_generation;
        state.apply(BlogEvent::PageFetchStarted);
        let fresh = state.page_generation;

        state.apply(BlogEvent::PageFetched {
            generation: fresh,
            page: page_of(vec![post(2, "Fresh")]),
        });
        state.apply(BlogEvent::PageFetched {
            generation: stale,
            page: page_of(vec![post(1, "Stale")]),
        });

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].title, "Fresh");
        assert_eq!(state.status, RequestStatus::Idle);
    }

    #[test]
    fn test_stale_failure_does_not_mark_failed() {
        let mut state = BlogState::default();

        state.apply(BlogEvent::PageFetchStarted);
        let stale = state.page_generation;
        state.apply(BlogEvent::PageFetchStarted);
        let fresh = state.page_generation;

        state.apply(BlogEvent::PageFetched {
            generation: fresh,
            page: page_of(Vec::new()),
        });
        state.apply(BlogEvent::PageFetchFailed {
            generation: stale,
            message: "Failed to fetch posts".to_string(),
        });

        assert_eq!(state.status, RequestStatus::Idle);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_failed_fetch_records_message() {
        let mut state = BlogState::default();

        state.apply(BlogEvent::AdminFetchStarted);
        let generation = state.admin_generation;
        state.apply(BlogEvent::AdminFetchFailed {
            generation,
            message: "Failed to fetch admin posts".to_string(),
        });

        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to fetch admin posts")
        );
    }

    #[test]
    fn test_created_post_is_prepended() {
        let mut state = BlogState::default();
        state.admin_items = vec![post(1, "Old")];

        state.apply(BlogEvent::PostCreated {
            post: post(2, "New"),
        });

        assert_eq!(state.admin_items.len(), 2);
        assert_eq!(state.admin_items[0].title, "New");
    }

    #[test]
    fn test_updated_post_replaces_in_place_and_syncs_current() {
        let mut state = BlogState::default();
        state.admin_items = vec![post(1, "One"), post(2, "Two")];
        state.current = Some(post(2, "Two"));

        let mut updated = post(2, "Two Revised");
        updated.slug = "two".to_string();
        state.apply(BlogEvent::PostUpdated {
            post: updated.clone(),
        });

        assert_eq!(state.admin_items[0].title, "One");
        assert_eq!(state.admin_items[1].title, "Two Revised");
        assert_eq!(state.current.as_ref().unwrap().title, "Two Revised");
    }

    #[test]
    fn test_update_for_unknown_id_is_a_no_op() {
        let mut state = BlogState::default();
        state.admin_items = vec![post(1, "One")];

        state.apply(BlogEvent::PostUpdated {
            post: post(9, "Ghost"),
        });

        assert_eq!(state.admin_items.len(), 1);
        assert_eq!(state.admin_items[0].title, "One");
    }

    #[test]
    fn test_publish_touches_admin_list_but_not_current() {
        let mut state = BlogState::default();
        state.admin_items = vec![post(1, "One")];
        state.current = Some(post(1, "One"));

        let mut published = post(1, "One");
        published.status = PostStatus::Published;
        state.apply(BlogEvent::PostPublished { post: published });

        assert_eq!(state.admin_items[0].status, PostStatus::Published);
        assert_eq!(state.current.as_ref().unwrap().status, PostStatus::Draft);
    }

    #[test]
    fn test_deleted_post_is_filtered_out() {
        let mut state = BlogState::default();
        state.admin_items = vec![post(1, "One"), post(2, "Two")];

        state.apply(BlogEvent::PostDeleted {
            id: Uuid::from_u128(1),
        });

        assert_eq!(state.admin_items.len(), 1);
        assert_eq!(state.admin_items[0].title, "Two");
    }

    #[test]
    fn test_admin_detail_load_touches_current_only() {
        let mut state = BlogState::default();
        state.apply(BlogEvent::AdminPostLoaded {
            post: post(3, "Detail"),
        });

        assert_eq!(state.current.as_ref().unwrap().title, "Detail");
        assert_eq!(state.status, RequestStatus::Idle);
    }

    #[test]
    fn test_clear_events() {
        let mut state = BlogState::default();
        state.current = Some(post(1, "One"));
        state.error = Some("Failed to fetch posts".to_string());

        state.apply(BlogEvent::CurrentCleared);
        state.apply(BlogEvent::ErrorCleared);

        assert_eq!(state.current, None);
        assert_eq!(state.error, None);
    }
}
