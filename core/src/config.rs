//! Client configuration.

use crate::client::TaskClient;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "TASKS_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads `TASKS_API_URL`, falling back to the default address.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(BASE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn client(&self) -> TaskClient {
        TaskClient::new(&self.base_url)
    }

    #[cfg(feature = "ureq")]
    pub fn controller(&self) -> crate::Controller<crate::UreqTransport> {
        let data = crate::DataClient::new(self.client(), crate::UreqTransport::new());
        crate::Controller::new(data)
    }
}
