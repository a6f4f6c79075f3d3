//! Fetch lifecycle status

/// Lifecycle of the most recent fetch in a store.
///
/// Only fetches drive this; mutations leave it untouched. A completed
/// fetch returns to [`Idle`](RequestStatus::Idle) rather than a separate
/// success state, so "not loading and no error" is the resting shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Failed,
}

impl RequestStatus {
    /// Whether a fetch is currently in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }
}
