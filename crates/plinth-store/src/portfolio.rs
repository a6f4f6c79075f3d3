//! Portfolio store: gallery items and categories

use crate::error::{Result, StoreError};
use crate::status::RequestStatus;
use plinth_api::portfolio::{
    CreatePortfolioItemInput, PortfolioItem, PortfolioListOptions, UpdatePortfolioItemInput,
};
use plinth_api::ApiClient;
use std::sync::Arc;
use uuid::Uuid;

// ==================== State ====================

/// Portfolio state, mutated only through [`PortfolioState::apply`]
#[derive(Debug, Clone, Default)]
pub struct PortfolioState {
    pub items: Vec<PortfolioItem>,
    /// Item being viewed or edited
    pub current: Option<PortfolioItem>,
    /// Distinct category labels in use
    pub categories: Vec<String>,
    pub status: RequestStatus,
    pub error: Option<String>,
    /// Bumped when a listing fetch starts; stale completions are dropped
    pub list_generation: u64,
}

// ==================== Events ====================

/// Everything that can change portfolio state
#[derive(Debug, Clone)]
pub enum PortfolioEvent {
    ListFetchStarted,
    ListFetched {
        generation: u64,
        items: Vec<PortfolioItem>,
    },
    ListFetchFailed {
        generation: u64,
        message: String,
    },
    /// Detail load; touches `current` only
    ItemLoaded {
        item: PortfolioItem,
    },
    CategoriesLoaded {
        categories: Vec<String>,
    },
    ItemCreated {
        item: PortfolioItem,
    },
    ItemUpdated {
        item: PortfolioItem,
    },
    ItemDeleted {
        id: Uuid,
    },
    CurrentCleared,
    ErrorCleared,
}

impl PortfolioState {
    /// Fold one event into the state
    pub fn apply(&mut self, event: PortfolioEvent) {
        match event {
            PortfolioEvent::ListFetchStarted => {
                self.list_generation += 1;
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            PortfolioEvent::ListFetched { generation, items } => {
                if generation != self.list_generation {
                    return;
                }
                self.items = items;
                self.status = RequestStatus::Idle;
            }
            PortfolioEvent::ListFetchFailed {
                generation,
                message,
            } => {
                if generation != self.list_generation {
                    return;
                }
                self.status = RequestStatus::Failed;
                self.error = Some(message);
            }
            PortfolioEvent::ItemLoaded { item } => {
                self.current = Some(item);
            }
            PortfolioEvent::CategoriesLoaded { categories } => {
                self.categories = categories;
            }
            PortfolioEvent::ItemCreated { item } => {
                self.items.push(item);
            }
            PortfolioEvent::ItemUpdated { item } => {
                if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
                    *existing = item;
                }
            }
            PortfolioEvent::ItemDeleted { id } => {
                self.items.retain(|i| i.id != id);
            }
            PortfolioEvent::CurrentCleared => {
                self.current = None;
            }
            PortfolioEvent::ErrorCleared => {
                self.error = None;
            }
        }
    }
}

// ==================== Store ====================

/// Portfolio store; owns its state and drives it through the API client
pub struct PortfolioStore {
    client: Arc<ApiClient>,
    state: PortfolioState,
}

impl PortfolioStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: PortfolioState::default(),
        }
    }

    pub fn state(&self) -> &PortfolioState {
        &self.state
    }

    /// Apply an externally produced event
    pub fn apply(&mut self, event: PortfolioEvent) {
        self.state.apply(event);
    }

    /// Fetch items matching the filter, in gallery order
    pub async fn fetch_items(&mut self, options: &PortfolioListOptions) -> Result<()> {
        self.state.apply(PortfolioEvent::ListFetchStarted);
        let generation = self.state.list_generation;

        match self.client.list_portfolio_items(options).await {
            Ok(items) => {
                self.state
                    .apply(PortfolioEvent::ListFetched { generation, items });
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from_api(err, "Failed to fetch portfolio items");
                self.state.apply(PortfolioEvent::ListFetchFailed {
                    generation,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Fetch one item by id into `current`
    pub async fn fetch_item(&mut self, id: Uuid) -> Result<()> {
        let item = self
            .client
            .get_portfolio_item(id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch portfolio item"))?;
        self.state.apply(PortfolioEvent::ItemLoaded { item });
        Ok(())
    }

    /// Fetch the distinct category labels
    pub async fn fetch_categories(&mut self) -> Result<()> {
        let categories = self
            .client
            .list_portfolio_categories()
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch categories"))?;
        self.state
            .apply(PortfolioEvent::CategoriesLoaded { categories });
        Ok(())
    }

    /// Create an item and append it to the listing
    pub async fn create_item(&mut self, input: &CreatePortfolioItemInput) -> Result<PortfolioItem> {
        let item = self
            .client
            .create_portfolio_item(input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to create portfolio item"))?;
        self.state
            .apply(PortfolioEvent::ItemCreated { item: item.clone() });
        Ok(item)
    }

    /// Update an item in place
    pub async fn update_item(
        &mut self,
        id: Uuid,
        input: &UpdatePortfolioItemInput,
    ) -> Result<PortfolioItem> {
        let item = self
            .client
            .update_portfolio_item(id, input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to update portfolio item"))?;
        self.state
            .apply(PortfolioEvent::ItemUpdated { item: item.clone() });
        Ok(item)
    }

    /// Delete an item and drop it from the listing
    pub async fn delete_item(&mut self, id: Uuid) -> Result<()> {
        self.client
            .delete_portfolio_item(id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to delete portfolio item"))?;
        self.state.apply(PortfolioEvent::ItemDeleted { id });
        Ok(())
    }

    /// Move an item to a new gallery position
    pub async fn reorder_item(&mut self, id: Uuid, sort_order: i32) -> Result<PortfolioItem> {
        let item = self
            .client
            .reorder_portfolio_item(id, sort_order)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to reorder portfolio item"))?;
        self.state
            .apply(PortfolioEvent::ItemUpdated { item: item.clone() });
        Ok(item)
    }

    pub fn clear_current(&mut self) {
        self.state.apply(PortfolioEvent::CurrentCleared);
    }

    pub fn clear_error(&mut self) {
        self.state.apply(PortfolioEvent::ErrorCleared);
    }
}
