//! Client configuration

/// API client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL including the API prefix (e.g. "http://localhost:8000/api")
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Config pointing at the given base URL, other fields defaulted
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}
