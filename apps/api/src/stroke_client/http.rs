//! HTTP transport for the stroke-counting microservice.
//!
//! Wire format:
//! - `POST /strokes` `{"text": ..}` → `{"totalStrokes": n, ..}`
//! - `GET /stroke/<char>` → `{"strokes": n, ..}`
//! - `POST /batch` `{"names": [..]}` → `{"results": [{"name", "totalStrokes"}]}`
//! - `GET /health` → 200 when up

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{error, warn};

use super::{StrokeError, StrokeOracle};

#[derive(Debug, Serialize)]
struct StrokesRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct BatchRequest<'a> {
    names: &'a [String],
}

#[derive(Debug, Deserialize)]
struct StrokesResponse {
    #[serde(rename = "totalStrokes")]
    total_strokes: u32,
}

#[derive(Debug, Deserialize)]
struct CharStrokeResponse {
    strokes: u32,
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    results: Vec<BatchEntry>,
}

#[derive(Debug, Deserialize)]
struct BatchEntry {
    name: String,
    #[serde(rename = "totalStrokes")]
    total_strokes: u32,
}

#[derive(Clone)]
pub struct HttpStrokeOracle {
    client: Client,
    base_url: String,
}

impl HttpStrokeOracle {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StrokeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StrokeError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends a request and decodes a success body. No retries: a failed call
    /// is reported to the caller as-is.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, StrokeError> {
        let response = request.send().await.map_err(|e| {
            error!("Stroke service request failed: {e}");
            StrokeError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Stroke service returned {status}: {body}");
            return Err(StrokeError::Unavailable(format!("status {}", status.as_u16())));
        }

        response.json::<T>().await.map_err(|e| {
            error!("Malformed stroke service response: {e}");
            StrokeError::Unavailable(format!("malformed response: {e}"))
        })
    }
}

#[async_trait]
impl StrokeOracle for HttpStrokeOracle {
    async fn stroke_count(&self, text: &str) -> Result<u32, StrokeError> {
        let request = self
            .client
            .post(format!("{}/strokes", self.base_url))
            .json(&StrokesRequest { text });
        let body: StrokesResponse = self.fetch(request).await?;
        Ok(body.total_strokes)
    }

    async fn char_strokes(&self, ch: char) -> Result<u32, StrokeError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| StrokeError::Unavailable(format!("invalid stroke service URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| StrokeError::Unavailable("stroke service URL cannot take a path".to_string()))?
            .pop_if_empty()
            .push("stroke")
            .push(&ch.to_string());
        let body: CharStrokeResponse = self.fetch(self.client.get(url)).await?;
        Ok(body.strokes)
    }

    async fn batch_stroke_counts(&self, names: &[String]) -> Result<Vec<(String, u32)>, StrokeError> {
        let request = self
            .client
            .post(format!("{}/batch", self.base_url))
            .json(&BatchRequest { names });
        let body: BatchResponse = self.fetch(request).await?;
        Ok(body
            .results
            .into_iter()
            .map(|entry| (entry.name, entry.total_strokes))
            .collect())
    }

    async fn is_healthy(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Stroke service health check failed: {e}");
                false
            }
        }
    }
}
