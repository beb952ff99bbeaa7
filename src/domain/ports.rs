use crate::domain::model::{Item, MutationResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn settings_collection(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

/// Everything page-rendering code needs from the content service.
///
/// Reads return `None` on any failure; writes always return a
/// [`MutationResult`].
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn get_services(&self) -> Option<Vec<Item>>;
    async fn get_tires(&self) -> Option<Vec<Item>>;
    async fn get_mags(&self) -> Option<Vec<Item>>;
    async fn get_gallery(&self) -> Option<Vec<Item>>;
    async fn get_site_settings(&self) -> Option<Value>;
    async fn create_booking(&self, booking: Map<String, Value>) -> MutationResult;
    async fn create_contact(&self, contact: Map<String, Value>) -> MutationResult;
}
