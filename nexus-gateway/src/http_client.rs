use crate::error::GatewayError;
use crate::query::{build_query, Filter, Order};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// `Accept` value asking the gateway for exactly one object instead of an
/// array. A zero-row result then comes back as 406.
const ACCEPT_SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Generic collection-level client for the hosted data gateway.
///
/// One instance is constructed at startup and shared; it is read-only
/// after construction.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, collection: &str, query: &str) -> String {
        format!(
            "{}/rest/v1/{}?{}",
            self.base_url.trim_end_matches('/'),
            collection,
            query
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Fetch all records of `collection` matching `filters`, in `order`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<Order>,
    ) -> Result<Vec<T>, GatewayError> {
        let url = self.url(collection, &build_query(filters, order));
        tracing::debug!(%url, "select");

        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::decode(response).await
    }

    /// Fetch exactly one record; zero rows map to `NotFound`.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> Result<T, GatewayError> {
        let url = self.url(collection, &build_query(filters, None));
        tracing::debug!(%url, "select_one");

        let response = self
            .authorize(self.client.get(&url))
            .header("Accept", ACCEPT_SINGLE_OBJECT)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Insert one record and return the created row.
    pub async fn insert<T: DeserializeOwned>(
        &self,
        collection: &str,
        record: &impl Serialize,
    ) -> Result<T, GatewayError> {
        let url = self.url(collection, "select=*");
        tracing::debug!(%url, "insert");

        let response = self
            .authorize(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        // The gateway answers inserts with an array of created rows.
        let mut rows: Vec<T> = Self::decode(response).await?;
        match rows.pop() {
            Some(row) if rows.is_empty() => Ok(row),
            Some(_) => Err(GatewayError::InvalidRequest(
                "gateway created more than one record".into(),
            )),
            None => Err(GatewayError::InvalidRequest(
                "gateway returned no created record".into(),
            )),
        }
    }

    /// Apply a partial update to the records matching `filters` and return
    /// the updated row.
    pub async fn update<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[Filter],
        partial: &impl Serialize,
    ) -> Result<T, GatewayError> {
        let url = self.url(collection, &build_query(filters, None));
        tracing::debug!(%url, "update");

        let response = self
            .authorize(self.client.patch(&url))
            .header("Prefer", "return=representation")
            .header("Accept", ACCEPT_SINGLE_OBJECT)
            .json(partial)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Delete the records matching `filters`.
    pub async fn delete(&self, collection: &str, filters: &[Filter]) -> Result<(), GatewayError> {
        let url = self.url(collection, &build_query(filters, None));
        tracing::debug!(%url, "delete");

        let response = self.authorize(self.client.delete(&url)).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(response).await)
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else {
            Err(Self::error_for(response).await)
        }
    }

    async fn error_for(response: Response) -> GatewayError {
        let status = response.status();
        // 406 is how the single-object Accept header reports zero rows.
        if status == StatusCode::NOT_FOUND || status == StatusCode::NOT_ACCEPTABLE {
            return GatewayError::NotFound;
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(text);

        tracing::error!(status = status.as_u16(), %message, "gateway request failed");
        GatewayError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
