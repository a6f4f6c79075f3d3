//! Work store: experiences, timelines, featured posts

use crate::draft::{ExperienceDraft, TimelineEventForm};
use crate::error::{Result, StoreError};
use crate::status::RequestStatus;
use plinth_api::work::{
    CreateExperienceInput, CreateTimelineEventInput, Experience, ExperienceDetail, FeaturedPost,
    FeaturedPostRef, TimelineEvent, UpdateExperienceInput, UpdateTimelineEventInput,
};
use plinth_api::ApiClient;
use std::sync::Arc;
use uuid::Uuid;

// ==================== State ====================

/// Work state, mutated only through [`WorkState::apply`]
#[derive(Debug, Clone, Default)]
pub struct WorkState {
    /// Experience listing; public and admin fetches share this slot
    pub experiences: Vec<Experience>,
    /// Experience being viewed, with embedded timeline and featured posts
    pub current: Option<ExperienceDetail>,
    /// Timeline of the experience being edited
    pub timeline: Vec<TimelineEvent>,
    /// Featured posts of the experience being edited, drafts included
    pub featured_posts: Vec<FeaturedPost>,
    pub status: RequestStatus,
    pub error: Option<String>,
    /// Bumped on every wholesale write to `experiences`
    pub list_generation: u64,
}

// ==================== Events ====================

/// Everything that can change work state
#[derive(Debug, Clone)]
pub enum WorkEvent {
    ListFetchStarted,
    ListFetched {
        generation: u64,
        experiences: Vec<Experience>,
    },
    ListFetchFailed {
        generation: u64,
        message: String,
    },
    /// Admin listing arrived; replaces the list without touching status
    AdminListLoaded {
        experiences: Vec<Experience>,
    },
    ExperienceFetchStarted,
    ExperienceFetched {
        detail: ExperienceDetail,
    },
    ExperienceFetchFailed {
        message: String,
    },
    ExperienceCreated {
        experience: Experience,
    },
    ExperienceDeleted {
        id: Uuid,
    },
    TimelineLoaded {
        events: Vec<TimelineEvent>,
    },
    TimelineEventCreated {
        event: TimelineEvent,
    },
    TimelineEventUpdated {
        event: TimelineEvent,
    },
    TimelineEventDeleted {
        id: Uuid,
    },
    FeaturedPostsLoaded {
        posts: Vec<FeaturedPost>,
    },
    CurrentCleared,
    ErrorCleared,
}

impl WorkState {
    /// Fold one event into the state.
    ///
    /// The listing slot is written by both the public and the admin fetch;
    /// every wholesale write bumps `list_generation`, so an in-flight fetch
    /// that started earlier completes with a stale generation and is
    /// dropped.
    pub fn apply(&mut self, event: WorkEvent) {
        match event {
            WorkEvent::ListFetchStarted => {
                self.list_generation += 1;
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            WorkEvent::ListFetched {
                generation,
                experiences,
            } => {
                if generation != self.list_generation {
                    return;
                }
                self.experiences = experiences;
                self.status = RequestStatus::Idle;
            }
            WorkEvent::ListFetchFailed {
                generation,
                message,
            } => {
                if generation != self.list_generation {
                    return;
                }
                self.status = RequestStatus::Failed;
                self.error = Some(message);
            }
            WorkEvent::AdminListLoaded { experiences } => {
                self.list_generation += 1;
                self.experiences = experiences;
            }
            WorkEvent::ExperienceFetchStarted => {
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            WorkEvent::ExperienceFetched { detail } => {
                self.current = Some(detail);
                self.status = RequestStatus::Idle;
            }
            WorkEvent::ExperienceFetchFailed { message } => {
                self.status = RequestStatus::Failed;
                self.error = Some(message);
            }
            WorkEvent::ExperienceCreated { experience } => {
                self.experiences.push(experience);
            }
            WorkEvent::ExperienceDeleted { id } => {
                self.experiences.retain(|e| e.id != id);
            }
            WorkEvent::TimelineLoaded { events } => {
                self.timeline = events;
            }
            WorkEvent::TimelineEventCreated { event } => {
                self.timeline.push(event);
            }
            WorkEvent::TimelineEventUpdated { event } => {
                if let Some(existing) = self.timeline.iter_mut().find(|e| e.id == event.id) {
                    *existing = event;
                }
            }
            WorkEvent::TimelineEventDeleted { id } => {
                self.timeline.retain(|e| e.id != id);
            }
            WorkEvent::FeaturedPostsLoaded { posts } => {
                self.featured_posts = posts;
            }
            WorkEvent::CurrentCleared => {
                self.current = None;
                self.timeline.clear();
                self.featured_posts.clear();
            }
            WorkEvent::ErrorCleared => {
                self.error = None;
            }
        }
    }
}

// ==================== Store ====================

/// Work store; owns its state and drives it through the API client
pub struct WorkStore {
    client: Arc<ApiClient>,
    state: WorkState,
}

impl WorkStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: WorkState::default(),
        }
    }

    pub fn state(&self) -> &WorkState {
        &self.state
    }

    /// Apply an externally produced event
    pub fn apply(&mut self, event: WorkEvent) {
        self.state.apply(event);
    }

    /// Fetch active experiences in display order
    pub async fn fetch_experiences(&mut self) -> Result<()> {
        self.state.apply(WorkEvent::ListFetchStarted);
        let generation = self.state.list_generation;

        match self.client.list_experiences().await {
            Ok(experiences) => {
                self.state.apply(WorkEvent::ListFetched {
                    generation,
                    experiences,
                });
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from_api(err, "Failed to fetch experiences");
                self.state.apply(WorkEvent::ListFetchFailed {
                    generation,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Fetch one experience by slug, with timeline and featured posts
    pub async fn fetch_experience(&mut self, slug: &str) -> Result<()> {
        self.state.apply(WorkEvent::ExperienceFetchStarted);

        match self.client.get_experience(slug).await {
            Ok(detail) => {
                self.state.apply(WorkEvent::ExperienceFetched { detail });
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from_api(err, "Failed to fetch experience");
                self.state.apply(WorkEvent::ExperienceFetchFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Fetch all experiences regardless of visibility
    pub async fn fetch_admin_experiences(&mut self) -> Result<()> {
        let experiences = self
            .client
            .list_admin_experiences()
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch experiences"))?;
        self.state.apply(WorkEvent::AdminListLoaded { experiences });
        Ok(())
    }

    /// Create an experience and append it to the listing
    pub async fn create_experience(&mut self, input: &CreateExperienceInput) -> Result<Experience> {
        let experience = self
            .client
            .create_experience(input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to create experience"))?;
        self.state.apply(WorkEvent::ExperienceCreated {
            experience: experience.clone(),
        });
        Ok(experience)
    }

    /// Update an experience. The listing is left as-is; refetch to see the
    /// change reflected there.
    pub async fn update_experience(
        &mut self,
        id: Uuid,
        input: &UpdateExperienceInput,
    ) -> Result<Experience> {
        self.client
            .update_experience(id, input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to update experience"))
    }

    /// Delete an experience and drop it from the listing
    pub async fn delete_experience(&mut self, id: Uuid) -> Result<()> {
        self.client
            .delete_experience(id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to delete experience"))?;
        self.state.apply(WorkEvent::ExperienceDeleted { id });
        Ok(())
    }

    /// Save a draft: create when it has no id yet, update otherwise
    pub async fn save_draft(&mut self, draft: &ExperienceDraft) -> Result<Experience> {
        draft.validate()?;
        match draft.id() {
            None => self.create_experience(&draft.to_create_input()).await,
            Some(id) => self.update_experience(id, &draft.to_update_input()).await,
        }
    }

    /// Fetch an experience's timeline, newest event first
    pub async fn fetch_timeline(&mut self, experience_id: Uuid) -> Result<()> {
        let events = self
            .client
            .list_timeline(experience_id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch timeline"))?;
        self.state.apply(WorkEvent::TimelineLoaded { events });
        Ok(())
    }

    /// Validate a timeline form and create the event
    pub async fn add_timeline_event(
        &mut self,
        experience_id: Uuid,
        form: &TimelineEventForm,
    ) -> Result<TimelineEvent> {
        let input = form.to_input()?;
        self.create_timeline_event(experience_id, &input).await
    }

    /// Create a timeline event and append it
    pub async fn create_timeline_event(
        &mut self,
        experience_id: Uuid,
        input: &CreateTimelineEventInput,
    ) -> Result<TimelineEvent> {
        let event = self
            .client
            .create_timeline_event(experience_id, input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to create timeline event"))?;
        self.state.apply(WorkEvent::TimelineEventCreated {
            event: event.clone(),
        });
        Ok(event)
    }

    /// Update a timeline event in place
    pub async fn update_timeline_event(
        &mut self,
        event_id: Uuid,
        input: &UpdateTimelineEventInput,
    ) -> Result<TimelineEvent> {
        let event = self
            .client
            .update_timeline_event(event_id, input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to update timeline event"))?;
        self.state.apply(WorkEvent::TimelineEventUpdated {
            event: event.clone(),
        });
        Ok(event)
    }

    /// Delete a timeline event and drop it
    pub async fn delete_timeline_event(&mut self, event_id: Uuid) -> Result<()> {
        self.client
            .delete_timeline_event(event_id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to delete timeline event"))?;
        self.state
            .apply(WorkEvent::TimelineEventDeleted { id: event_id });
        Ok(())
    }

    /// Fetch an experience's featured posts, drafts included
    pub async fn fetch_featured_posts(&mut self, experience_id: Uuid) -> Result<()> {
        let posts = self
            .client
            .list_featured_posts(experience_id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch featured posts"))?;
        self.state.apply(WorkEvent::FeaturedPostsLoaded { posts });
        Ok(())
    }

    /// Replace the featured selection in one request, then refresh the
    /// enriched view
    pub async fn set_featured_posts(
        &mut self,
        experience_id: Uuid,
        refs: &[FeaturedPostRef],
    ) -> Result<()> {
        self.client
            .replace_featured_posts(experience_id, refs)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to update featured posts"))?;
        self.fetch_featured_posts(experience_id).await
    }

    /// Feature one more post at the end of the selection
    pub async fn add_featured_post(&mut self, experience_id: Uuid, post_id: Uuid) -> Result<()> {
        if self
            .state
            .featured_posts
            .iter()
            .any(|f| f.post.id == post_id)
        {
            return Err(StoreError::Invalid("Post already featured".to_string()));
        }

        let mut refs: Vec<FeaturedPostRef> = self
            .state
            .featured_posts
            .iter()
            .enumerate()
            .map(|(i, f)| FeaturedPostRef {
                post_id: f.post.id,
                sort_order: i as i32,
            })
            .collect();
        refs.push(FeaturedPostRef {
            post_id,
            sort_order: refs.len() as i32,
        });

        self.set_featured_posts(experience_id, &refs).await
    }

    /// Unfeature a post, renumbering the remaining selection
    pub async fn remove_featured_post(&mut self, experience_id: Uuid, post_id: Uuid) -> Result<()> {
        let refs: Vec<FeaturedPostRef> = self
            .state
            .featured_posts
            .iter()
            .filter(|f| f.post.id != post_id)
            .enumerate()
            .map(|(i, f)| FeaturedPostRef {
                post_id: f.post.id,
                sort_order: i as i32,
            })
            .collect();

        self.set_featured_posts(experience_id, &refs).await
    }

    pub fn clear_current(&mut self) {
        self.state.apply(WorkEvent::CurrentCleared);
    }

    pub fn clear_error(&mut self) {
        self.state.apply(WorkEvent::ErrorCleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn experience(id: u128, title: &str) -> Experience {
        Experience {
            id: Uuid::from_u128(id),
            title: title.to_string(),
            slug: plinth_document::derive_slug(title),
            subtitle: None,
            description: None,
            description_html: None,
            header_image_url: None,
            sort_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn timeline_event(id: u128, title: &str) -> TimelineEvent {
        TimelineEvent {
            id: Uuid::from_u128(id),
            experience_id: Uuid::from_u128(100),
            event_date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            title: title.to_string(),
            subtitle: None,
            photo_url: None,
            sort_order: 0,
        }
    }

    #[test]
    fn test_admin_load_invalidates_inflight_public_fetch() {
        let mut state = WorkState::default();

        state.apply(WorkEvent::ListFetchStarted);
        let inflight = state.list_generation;

        state.apply(WorkEvent::AdminListLoaded {
            experiences: vec![experience(1, "Guiding"), experience(2, "Hidden")],
        });

        state.apply(WorkEvent::ListFetched {
            generation: inflight,
            experiences: vec![experience(1, "Guiding")],
        });

        assert_eq!(state.experiences.len(), 2);
    }

    #[test]
    fn test_created_experience_is_appended() {
        let mut state = WorkState::default();
        state.experiences = vec![experience(1, "First")];

        state.apply(WorkEvent::ExperienceCreated {
            experience: experience(2, "Second"),
        });

        assert_eq!(state.experiences.len(), 2);
        assert_eq!(state.experiences[1].title, "Second");
    }

    #[test]
    fn test_experience_fetch_sets_current_and_returns_to_idle() {
        let mut state = WorkState::default();

        state.apply(WorkEvent::ExperienceFetchStarted);
        assert_eq!(state.status, RequestStatus::Loading);

        state.apply(WorkEvent::ExperienceFetched {
            detail: ExperienceDetail {
                experience: experience(1, "Guiding"),
                timeline: vec![timeline_event(10, "First ascent")],
                featured_posts: Vec::new(),
            },
        });

        assert_eq!(state.status, RequestStatus::Idle);
        let detail = state.current.as_ref().unwrap();
        assert_eq!(detail.experience.slug, "guiding");
        assert_eq!(detail.timeline.len(), 1);
    }

    #[test]
    fn test_timeline_update_replaces_by_id() {
        let mut state = WorkState::default();
        state.timeline = vec![timeline_event(1, "Start"), timeline_event(2, "Middle")];

        let mut updated = timeline_event(2, "Midpoint");
        updated.sort_order = 5;
        state.apply(WorkEvent::TimelineEventUpdated { event: updated });

        assert_eq!(state.timeline[0].title, "Start");
        assert_eq!(state.timeline[1].title, "Midpoint");
        assert_eq!(state.timeline[1].sort_order, 5);
    }

    #[test]
    fn test_timeline_delete_filters_by_id() {
        let mut state = WorkState::default();
        state.timeline = vec![timeline_event(1, "Start"), timeline_event(2, "Middle")];

        state.apply(WorkEvent::TimelineEventDeleted {
            id: Uuid::from_u128(1),
        });

        assert_eq!(state.timeline.len(), 1);
        assert_eq!(state.timeline[0].title, "Middle");
    }

    #[test]
    fn test_clear_current_resets_editing_slots() {
        let mut state = WorkState::default();
        state.current = Some(ExperienceDetail {
            experience: experience(1, "Guiding"),
            timeline: Vec::new(),
            featured_posts: Vec::new(),
        });
        state.timeline = vec![timeline_event(1, "Start")];

        state.apply(WorkEvent::CurrentCleared);

        assert!(state.current.is_none());
        assert!(state.timeline.is_empty());
        assert!(state.featured_posts.is_empty());
    }
}
