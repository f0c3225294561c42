use std::time::Duration;

use chrono::Utc;
use futures_util::StreamExt;
use reqwest::header::CACHE_CONTROL;
use tracker_core::{Generation, StatusReply, TaskId};
use tracker_logging::tracker_debug;

use crate::{decode_status_body, Endpoints, FailureKind, StatusQueryError};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 64 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait StatusClient: Send + Sync {
    async fn query_status(
        &self,
        task_id: &TaskId,
        cache_buster: &str,
    ) -> Result<StatusReply, StatusQueryError>;
}

/// Value for the `_` query parameter. Unique per query so that no cache
/// between client and server can answer with a stale status.
pub fn cache_buster(generation: Generation) -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), generation)
}

#[derive(Debug, Clone)]
pub struct ReqwestStatusClient {
    endpoints: Endpoints,
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestStatusClient {
    pub fn new(endpoints: Endpoints, settings: ClientSettings) -> Result<Self, StatusQueryError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| StatusQueryError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            endpoints,
            settings,
            client,
        })
    }

    fn too_large(&self, actual: u64) -> StatusQueryError {
        StatusQueryError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_body_bytes,
                actual: Some(actual),
            },
            "status response too large",
        )
    }
}

#[async_trait::async_trait]
impl StatusClient for ReqwestStatusClient {
    async fn query_status(
        &self,
        task_id: &TaskId,
        cache_buster: &str,
    ) -> Result<StatusReply, StatusQueryError> {
        let url = self.endpoints.status_url(task_id, cache_buster);
        tracker_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusQueryError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_body_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_body_bytes {
                return Err(self.too_large(next_len));
            }
            body.extend_from_slice(&chunk);
        }

        decode_status_body(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> StatusQueryError {
    if err.is_timeout() {
        return StatusQueryError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return StatusQueryError::new(FailureKind::Decode, err.to_string());
    }
    StatusQueryError::new(FailureKind::Network, err.to_string())
}
