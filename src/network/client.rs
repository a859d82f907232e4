//! HTTP client wrapper - one call per (resource, verb) pair

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::models::{Museum, RecordId, Resource, ResourceKind};
use crate::network::error::{extract_message, ApiError};

/// Talks to the museums and curators services
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    museums_url: String,
    curators_url: String,
}

impl ApiClient {
    pub fn new(museums_url: impl Into<String>, curators_url: impl Into<String>, timeout: Duration) -> Self {
        ApiClient {
            http: create_client(timeout),
            museums_url: museums_url.into().trim_end_matches('/').to_string(),
            curators_url: curators_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.museums_url, &config.curators_url, config.timeout)
    }

    /// Root URL of the service handling `kind`
    pub fn base_url(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::Museum => &self.museums_url,
            ResourceKind::Curator => &self.curators_url,
        }
    }

    fn item_url(&self, kind: ResourceKind, id: RecordId) -> String {
        format!("{}/{}", self.base_url(kind), id)
    }

    /// Send a request, logging it and turning non-2xx into [`ApiError::Status`]
    async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
        method: &'static str,
        url: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let start = Instant::now();
        tracing::info!(method, url, "Sending request");

        let resp = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let err = ApiError::from_reqwest(e);
                tracing::error!(method, url, error = %err, "Request did not reach the server");
                return Err(err);
            }
        };

        let status = resp.status();
        let elapsed_ms = start.elapsed().as_millis() as u64;
        if status.is_success() {
            tracing::info!(method, url, status = status.as_u16(), elapsed_ms, "Request completed");
            return Ok(resp);
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(method, url, error = %e, "Could not read error body");
                String::new()
            }
        };
        let err = ApiError::Status {
            status: status.as_u16(),
            message: extract_message(&body),
        };
        tracing::warn!(method, url, status = status.as_u16(), elapsed_ms, error = %err, "Request failed");
        Err(err)
    }

    async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        resp.json::<T>().await.map_err(|e| {
            let err = ApiError::Decode(e.to_string());
            tracing::error!(error = %err, "Could not decode response");
            err
        })
    }

    /// GET /R
    pub async fn fetch_all<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let url = self.base_url(R::KIND).to_string();
        let resp = self.execute(self.http.get(&url), "GET", &url).await?;
        let records: Vec<R> = Self::decode(resp).await?;
        tracing::debug!(resource = %R::KIND, count = records.len(), "Fetched collection");
        Ok(records)
    }

    /// GET /R/{id}
    pub async fn fetch_one<R: Resource>(&self, id: RecordId) -> Result<R, ApiError> {
        let url = self.item_url(R::KIND, id);
        let resp = self.execute(self.http.get(&url), "GET", &url).await?;
        Self::decode(resp).await
    }

    /// POST /R
    pub async fn create<R: Resource>(&self, draft: &R) -> Result<R, ApiError> {
        let url = self.base_url(R::KIND).to_string();
        let resp = self.execute(self.http.post(&url).json(draft), "POST", &url).await?;
        Self::decode(resp).await
    }

    /// PUT /R/{id}
    pub async fn update<R: Resource>(&self, id: RecordId, draft: &R) -> Result<R, ApiError> {
        let url = self.item_url(R::KIND, id);
        let resp = self.execute(self.http.put(&url).json(draft), "PUT", &url).await?;
        Self::decode(resp).await
    }

    /// DELETE /R/{id}. Deleting an unknown id fails.
    pub async fn remove<R: Resource>(&self, id: RecordId) -> Result<(), ApiError> {
        let url = self.item_url(R::KIND, id);
        self.execute(self.http.delete(&url), "DELETE", &url).await?;
        Ok(())
    }

    /// GET {museums}/curadores/{curatorId}/museos
    pub async fn museums_by_curator(&self, curator_id: RecordId) -> Result<Vec<Museum>, ApiError> {
        let url = format!("{}/curadores/{}/museos", self.museums_url, curator_id);
        let resp = self.execute(self.http.get(&url), "GET", &url).await?;
        Self::decode(resp).await
    }

    /// POST {museums}/{id}/curadores
    pub async fn assign_curator(&self, museum_id: RecordId, curator_id: RecordId) -> Result<(), ApiError> {
        let url = format!("{}/{}/curadores", self.museums_url, museum_id);
        let body = serde_json::json!({ "id": curator_id });
        self.execute(self.http.post(&url).json(&body), "POST", &url).await?;
        Ok(())
    }

    /// DELETE {museums}/{id}/curadores/{curatorId}
    pub async fn unassign_curator(&self, museum_id: RecordId, curator_id: RecordId) -> Result<(), ApiError> {
        let url = format!("{}/{}/curadores/{}", self.museums_url, museum_id, curator_id);
        self.execute(self.http.delete(&url), "DELETE", &url).await?;
        Ok(())
    }
}

/// Create an HTTP client with the given transport timeout
fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
