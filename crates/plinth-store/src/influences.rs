//! Influences store: books, podcasts, creators

use crate::error::{Result, StoreError};
use crate::status::RequestStatus;
use plinth_api::influences::{
    CreateInfluenceInput, Influence, InfluenceCategory, UpdateInfluenceInput,
};
use plinth_api::ApiClient;
use std::sync::Arc;
use uuid::Uuid;

// ==================== State ====================

/// Influences state, mutated only through [`InfluencesState::apply`]
#[derive(Debug, Clone, Default)]
pub struct InfluencesState {
    /// Influence listing; public and admin fetches share this slot
    pub items: Vec<Influence>,
    pub status: RequestStatus,
    pub error: Option<String>,
    /// Bumped on every wholesale write to `items`
    pub list_generation: u64,
}

// ==================== Events ====================

/// Everything that can change influences state
#[derive(Debug, Clone)]
pub enum InfluencesEvent {
    ListFetchStarted,
    ListFetched {
        generation: u64,
        items: Vec<Influence>,
    },
    ListFetchFailed {
        generation: u64,
        message: String,
    },
    /// Admin listing arrived; replaces the list without touching status
    AdminListLoaded {
        items: Vec<Influence>,
    },
    Created {
        influence: Influence,
    },
    Updated {
        influence: Influence,
    },
    Deleted {
        id: Uuid,
    },
}

impl InfluencesState {
    /// Fold one event into the state
    pub fn apply(&mut self, event: InfluencesEvent) {
        match event {
            InfluencesEvent::ListFetchStarted => {
                self.list_generation += 1;
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            InfluencesEvent::ListFetched { generation, items } => {
                if generation != self.list_generation {
                    return;
                }
                self.items = items;
                self.status = RequestStatus::Idle;
            }
            InfluencesEvent::ListFetchFailed {
                generation,
                message,
            } => {
                if generation != self.list_generation {
                    return;
                }
                self.status = RequestStatus::Failed;
                self.error = Some(message);
            }
            InfluencesEvent::AdminListLoaded { items } => {
                self.list_generation += 1;
                self.items = items;
            }
            InfluencesEvent::Created { influence } => {
                self.items.push(influence);
            }
            InfluencesEvent::Updated { influence } => {
                if let Some(existing) = self.items.iter_mut().find(|i| i.id == influence.id) {
                    *existing = influence;
                }
            }
            InfluencesEvent::Deleted { id } => {
                self.items.retain(|i| i.id != id);
            }
        }
    }
}

// ==================== Store ====================

/// Influences store; owns its state and drives it through the API client
pub struct InfluencesStore {
    client: Arc<ApiClient>,
    state: InfluencesState,
}

impl InfluencesStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: InfluencesState::default(),
        }
    }

    pub fn state(&self) -> &InfluencesState {
        &self.state
    }

    /// Apply an externally produced event
    pub fn apply(&mut self, event: InfluencesEvent) {
        self.state.apply(event);
    }

    /// Fetch active influences, optionally narrowed to one category
    pub async fn fetch_influences(&mut self, category: Option<InfluenceCategory>) -> Result<()> {
        self.state.apply(InfluencesEvent::ListFetchStarted);
        let generation = self.state.list_generation;

        match self.client.list_influences(category).await {
            Ok(items) => {
                self.state
                    .apply(InfluencesEvent::ListFetched { generation, items });
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from_api(err, "Failed to fetch influences");
                self.state.apply(InfluencesEvent::ListFetchFailed {
                    generation,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Fetch all influences regardless of visibility
    pub async fn fetch_admin_influences(&mut self) -> Result<()> {
        let items = self
            .client
            .list_admin_influences()
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch influences"))?;
        self.state.apply(InfluencesEvent::AdminListLoaded { items });
        Ok(())
    }

    /// Create an influence and append it to the listing
    pub async fn create_influence(&mut self, input: &CreateInfluenceInput) -> Result<Influence> {
        let influence = self
            .client
            .create_influence(input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to create influence"))?;
        self.state.apply(InfluencesEvent::Created {
            influence: influence.clone(),
        });
        Ok(influence)
    }

    /// Update an influence in place
    pub async fn update_influence(
        &mut self,
        id: Uuid,
        input: &UpdateInfluenceInput,
    ) -> Result<Influence> {
        let influence = self
            .client
            .update_influence(id, input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to update influence"))?;
        self.state.apply(InfluencesEvent::Updated {
            influence: influence.clone(),
        });
        Ok(influence)
    }

    /// Delete an influence and drop it from the listing
    pub async fn delete_influence(&mut self, id: Uuid) -> Result<()> {
        self.client
            .delete_influence(id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to delete influence"))?;
        self.state.apply(InfluencesEvent::Deleted { id });
        Ok(())
    }
}
