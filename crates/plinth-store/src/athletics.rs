//! Athletics store: coaching services and the contact form

use crate::error::{Result, StoreError};
use crate::status::RequestStatus;
use plinth_api::athletics::{
    AthleticsService, ContactMessage, CreateAthleticsServiceInput, UpdateAthleticsServiceInput,
};
use plinth_api::ApiClient;
use std::sync::Arc;
use uuid::Uuid;

// ==================== State ====================

/// Athletics state, mutated only through [`AthleticsState::apply`]
#[derive(Debug, Clone, Default)]
pub struct AthleticsState {
    /// Service listing; public and admin fetches share this slot
    pub services: Vec<AthleticsService>,
    pub status: RequestStatus,
    pub error: Option<String>,
    /// Bumped on every wholesale write to `services`
    pub list_generation: u64,
}

// ==================== Events ====================

/// Everything that can change athletics state
#[derive(Debug, Clone)]
pub enum AthleticsEvent {
    ListFetchStarted,
    ListFetched {
        generation: u64,
        services: Vec<AthleticsService>,
    },
    ListFetchFailed {
        generation: u64,
        message: String,
    },
    /// Admin listing arrived; replaces the list without touching status
    AdminListLoaded {
        services: Vec<AthleticsService>,
    },
    Created {
        service: AthleticsService,
    },
    Updated {
        service: AthleticsService,
    },
    Deleted {
        id: Uuid,
    },
}

impl AthleticsState {
    /// Fold one event into the state
    pub fn apply(&mut self, event: AthleticsEvent) {
        match event {
            AthleticsEvent::ListFetchStarted => {
                self.list_generation += 1;
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            AthleticsEvent::ListFetched {
                generation,
                services,
            } => {
                if generation != self.list_generation {
                    return;
                }
                self.services = services;
                self.status = RequestStatus::Idle;
            }
            AthleticsEvent::ListFetchFailed {
                generation,
                message,
            } => {
                if generation != self.list_generation {
                    return;
                }
                self.status = RequestStatus::Failed;
                self.error = Some(message);
            }
            AthleticsEvent::AdminListLoaded { services } => {
                self.list_generation += 1;
                self.services = services;
            }
            AthleticsEvent::Created { service } => {
                self.services.push(service);
            }
            AthleticsEvent::Updated { service } => {
                if let Some(existing) = self.services.iter_mut().find(|s| s.id == service.id) {
                    *existing = service;
                }
            }
            AthleticsEvent::Deleted { id } => {
                self.services.retain(|s| s.id != id);
            }
        }
    }
}

// ==================== Store ====================

/// Athletics store; owns its state and drives it through the API client
pub struct AthleticsStore {
    client: Arc<ApiClient>,
    state: AthleticsState,
}

impl AthleticsStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: AthleticsState::default(),
        }
    }

    pub fn state(&self) -> &AthleticsState {
        &self.state
    }

    /// Apply an externally produced event
    pub fn apply(&mut self, event: AthleticsEvent) {
        self.state.apply(event);
    }

    /// Fetch active services in display order
    pub async fn fetch_services(&mut self) -> Result<()> {
        self.state.apply(AthleticsEvent::ListFetchStarted);
        let generation = self.state.list_generation;

        match self.client.list_athletics_services().await {
            Ok(services) => {
                self.state.apply(AthleticsEvent::ListFetched {
                    generation,
                    services,
                });
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from_api(err, "Failed to fetch services");
                self.state.apply(AthleticsEvent::ListFetchFailed {
                    generation,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Fetch all services regardless of visibility
    pub async fn fetch_admin_services(&mut self) -> Result<()> {
        let services = self
            .client
            .list_admin_athletics_services()
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch services"))?;
        self.state.apply(AthleticsEvent::AdminListLoaded { services });
        Ok(())
    }

    /// Create a service and append it to the listing
    pub async fn create_service(
        &mut self,
        input: &CreateAthleticsServiceInput,
    ) -> Result<AthleticsService> {
        let service = self
            .client
            .create_athletics_service(input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to create service"))?;
        self.state.apply(AthleticsEvent::Created {
            service: service.clone(),
        });
        Ok(service)
    }

    /// Update a service in place
    pub async fn update_service(
        &mut self,
        id: Uuid,
        input: &UpdateAthleticsServiceInput,
    ) -> Result<AthleticsService> {
        let service = self
            .client
            .update_athletics_service(id, input)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to update service"))?;
        self.state.apply(AthleticsEvent::Updated {
            service: service.clone(),
        });
        Ok(service)
    }

    /// Delete a service and drop it from the listing
    pub async fn delete_service(&mut self, id: Uuid) -> Result<()> {
        self.client
            .delete_athletics_service(id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to delete service"))?;
        self.state.apply(AthleticsEvent::Deleted { id });
        Ok(())
    }

    /// Submit the public contact form; leaves state untouched
    pub async fn submit_contact(&self, message: &ContactMessage) -> Result<String> {
        if message.name.trim().is_empty()
            || message.email.trim().is_empty()
            || message.message.trim().is_empty()
        {
            return Err(StoreError::Invalid(
                "Name, email and message are required".to_string(),
            ));
        }

        let ack = self
            .client
            .submit_contact(message)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to send message"))?;
        Ok(ack.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn service(id: u128, title: &str) -> AthleticsService {
        AthleticsService {
            id: Uuid::from_u128(id),
            title: title.to_string(),
            description: "A service".to_string(),
            icon_name: None,
            price_info: None,
            sort_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_fetch_lifecycle() {
        let mut state = AthleticsState::default();

        state.apply(AthleticsEvent::ListFetchStarted);
        assert_eq!(state.status, RequestStatus::Loading);

        let generation = state.list_generation;
        state.apply(AthleticsEvent::ListFetched {
            generation,
            services: vec![service(1, "1:1 Coaching")],
        });

        assert_eq!(state.status, RequestStatus::Idle);
        assert_eq!(state.services.len(), 1);
    }

    #[test]
    fn test_updated_service_replaces_by_id() {
        let mut state = AthleticsState::default();
        state.services = vec![service(1, "Coaching"), service(2, "Plans")];

        state.apply(AthleticsEvent::Updated {
            service: service(2, "Training Plans"),
        });

        assert_eq!(state.services[1].title, "Training Plans");
    }

    #[test]
    fn test_deleted_service_is_filtered_out() {
        let mut state = AthleticsState::default();
        state.services = vec![service(1, "Coaching")];

        state.apply(AthleticsEvent::Deleted {
            id: Uuid::from_u128(1),
        });

        assert!(state.services.is_empty());
    }
}
