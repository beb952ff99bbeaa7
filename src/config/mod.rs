#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

/// The production content service.
pub const BASE_URL: &str = "https://directus-production-2cc1.up.railway.app";

pub const DEFAULT_SETTINGS_COLLECTION: &str = "site_settings";

/// Connection settings for one content service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSettings {
    pub base_url: String,
    pub settings_collection: String,
    pub timeout: Option<Duration>,
}

impl ContentSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_settings_collection(mut self, collection: impl Into<String>) -> Self {
        self.settings_collection = collection.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            settings_collection: DEFAULT_SETTINGS_COLLECTION.to_string(),
            timeout: None,
        }
    }
}

impl ConfigProvider for ContentSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn settings_collection(&self) -> &str {
        &self.settings_collection
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Validate for ContentSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_collection_name("settings_collection", &self.settings_collection)?;
        if let Some(timeout) = self.timeout {
            validation::validate_positive_number("timeout", timeout.as_secs(), 1)?;
        }
        Ok(())
    }
}
