//! Single-shot JSON GET against the media API.

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::error::FetchError;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct JsonTransport {
    http: Client,
    base_url: Url,
}

impl JsonTransport {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `path` below the base URL, keeping the base's own path segments
    /// (`https://host/api` + `deaths` is `https://host/api/deaths`).
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url
    }

    /// Issues one GET and decodes the body as `T`.
    ///
    /// Only HTTP 200 counts as success. No timeout or retry is applied.
    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        let response = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|err| FetchError::transport(url.as_str(), err.to_string()))?;

        let request_url = response.url().to_string();
        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %request_url, status = status.as_u16(), "media api: non-200 response");
            return Err(FetchError::bad_status(request_url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::transport(request_url.as_str(), err.to_string()))?;
        debug!(url = %request_url, bytes = body.len(), "media api: response received");

        serde_json::from_slice(&body).map_err(|err| FetchError::decode(request_url, err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
