use crate::config::ContentSettings;
use crate::core::query::CollectionQuery;
use crate::core::tires::sort_tires;
use crate::core::{ConfigProvider, ContentApi, Envelope, Item, MutationResult};
use crate::utils::error::{ContentError, Result};
use crate::utils::format::asset_url;
use chrono::{SecondsFormat, Utc};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

const BOOKINGS: &str = "bookings";
const CONTACTS: &str = "contacts";

/// Stateless client for the site's content service.
///
/// Reads never fail: any transport, status or decoding problem is logged and
/// turned into `None`. Writes always return a [`MutationResult`] so forms can
/// tell the visitor what happened.
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: Client,
    base_url: String,
    settings_collection: String,
}

impl ContentClient {
    /// Client for the production content service with no request timeout.
    pub fn new() -> Self {
        let settings = ContentSettings::default();
        Self {
            client: Client::new(),
            base_url: settings.base_url,
            settings_collection: settings.settings_collection,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            settings_collection: config.settings_collection().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn settings_collection(&self) -> &str {
        &self.settings_collection
    }

    pub async fn get_services(&self) -> Option<Vec<Item>> {
        let query = CollectionQuery::new()
            .sort("sort")
            .filter_eq("status", "available");
        self.fetch_from_content("services", &query).await
    }

    /// Tires come back unsorted from the server and are ordered here, sale
    /// items first and then by rim size.
    pub async fn get_tires(&self) -> Option<Vec<Item>> {
        let query = CollectionQuery::new().filter_neq("status", "unavailable");
        let mut tires: Vec<Item> = self.fetch_from_content("tires", &query).await?;
        sort_tires(&mut tires);
        Some(tires)
    }

    pub async fn get_mags(&self) -> Option<Vec<Item>> {
        let query = CollectionQuery::new()
            .sort("sort")
            .filter_neq("status", "unavailable");
        self.fetch_from_content("mags", &query).await
    }

    pub async fn get_gallery(&self) -> Option<Vec<Item>> {
        let query = CollectionQuery::new()
            .sort("sort")
            .filter_eq("status", "published");
        self.fetch_from_content("gallery", &query).await
    }

    pub async fn get_site_settings(&self) -> Option<Value> {
        match self.fetch_settings().await {
            Ok(settings) if !settings.is_null() => Some(settings),
            Ok(_) => None,
            Err(e) => {
                tracing::error!("Error fetching site settings: {}", e);
                None
            }
        }
    }

    /// Submits a booking request. The record is stored as `pending`.
    pub async fn create_booking(&self, booking: Map<String, Value>) -> MutationResult {
        let mut body = booking;
        body.insert("status".to_string(), Value::String("pending".to_string()));
        self.post_to_content(BOOKINGS, body).await
    }

    pub async fn create_contact(&self, contact: Map<String, Value>) -> MutationResult {
        self.post_to_content(CONTACTS, contact).await
    }

    pub fn image_url(&self, image_id: Option<&str>) -> Option<String> {
        asset_url(&self.base_url, image_id)
    }

    fn items_url(&self, collection: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}/items/{}", self.base_url, collection))?)
    }

    async fn fetch_from_content<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &CollectionQuery,
    ) -> Option<T> {
        match self.try_fetch(collection, query).await {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::error!("Error fetching {}: {}", collection, e);
                None
            }
        }
    }

    async fn try_fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &CollectionQuery,
    ) -> Result<T> {
        let mut url = self.items_url(collection)?;
        query.apply_to(&mut url);

        tracing::debug!("📡 GET {}", url);
        let response = self.client.get(url).send().await?;
        let envelope: Envelope<T> = read_json(response).await?;
        Ok(envelope.data)
    }

    async fn fetch_settings(&self) -> Result<Value> {
        let url = self.items_url(&self.settings_collection)?;

        tracing::debug!("📡 GET {}", url);
        let response = self.client.get(url).send().await?;
        let envelope: Envelope<Value> = read_json(response).await?;
        Ok(envelope.data)
    }

    async fn post_to_content(
        &self,
        collection: &str,
        mut body: Map<String, Value>,
    ) -> MutationResult {
        body.insert("date_created".to_string(), Value::String(timestamp_now()));

        match self.try_post(collection, &body).await {
            Ok(data) => MutationResult::Success { data },
            Err(e) => {
                tracing::error!("Error creating {}: {}", collection, e);
                MutationResult::Failure {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn try_post(&self, collection: &str, body: &Map<String, Value>) -> Result<Value> {
        let url = self.items_url(collection)?;

        tracing::debug!("📡 POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        let envelope: Envelope<Option<Value>> = read_json(response).await?;
        Ok(envelope.data.unwrap_or(Value::Null))
    }
}

impl Default for ContentClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ContentApi for ContentClient {
    async fn get_services(&self) -> Option<Vec<Item>> {
        ContentClient::get_services(self).await
    }

    async fn get_tires(&self) -> Option<Vec<Item>> {
        ContentClient::get_tires(self).await
    }

    async fn get_mags(&self) -> Option<Vec<Item>> {
        ContentClient::get_mags(self).await
    }

    async fn get_gallery(&self) -> Option<Vec<Item>> {
        ContentClient::get_gallery(self).await
    }

    async fn get_site_settings(&self) -> Option<Value> {
        ContentClient::get_site_settings(self).await
    }

    async fn create_booking(&self, booking: Map<String, Value>) -> MutationResult {
        ContentClient::create_booking(self, booking).await
    }

    async fn create_contact(&self, contact: Map<String, Value>) -> MutationResult {
        ContentClient::create_contact(self, contact).await
    }
}

/// Non-2xx responses are errors even when they carry a JSON body.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    tracing::debug!("API response status: {}", status);

    if !status.is_success() {
        return Err(ContentError::HttpStatusError {
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T08:30:00.000Z`.
fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_timestamp_is_iso8601_utc() {
        let stamp = timestamp_now();
        assert!(stamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let settings = ContentSettings::new("http://localhost:8055/")
            .with_settings_collection("settings")
            .with_timeout(Duration::from_secs(5));
        let client = ContentClient::from_config(&settings).unwrap();

        assert_eq!(client.base_url(), "http://localhost:8055");
        assert_eq!(client.settings_collection(), "settings");
        assert_eq!(
            client.items_url("tires").unwrap().as_str(),
            "http://localhost:8055/items/tires"
        );
    }

    #[test]
    fn test_image_url_uses_configured_base() {
        let client = ContentClient::from_config(&ContentSettings::new("http://cms.local")).unwrap();
        assert_eq!(
            client.image_url(Some("abc123")),
            Some("http://cms.local/assets/abc123".to_string())
        );
        assert_eq!(client.image_url(None), None);
    }

    #[test]
    fn test_default_client_targets_production() {
        let client = ContentClient::default();
        assert_eq!(client.base_url(), crate::config::BASE_URL);
        assert_eq!(client.settings_collection(), "site_settings");
    }
}
