//! reqwest-based client for the itinerary service's JSON API.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::TravelBackend;
use crate::{
    error::{Result, TravelError},
    wire::{ChatPayload, ChatReply, HealthStatus, ItineraryResponse, TripPayload},
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Bound on a health check. Itinerary and chat calls are bounded by the flows.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

const GENERATE_ITINERARY_PATH: &str = "/api/travel/generate-itinerary";
const CHAT_PATH: &str = "/api/chat";
const HEALTH_PATH: &str = "/api/health";

/// Talks to the itinerary service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    health_timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_send_error)?;
        decode(response).await
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn map_send_error(e: reqwest::Error) -> TravelError {
    if e.is_timeout() {
        TravelError::timeout(e.to_string())
    } else {
        TravelError::transport(e.to_string())
    }
}

async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    let status = response.status();
    if status == StatusCode::GATEWAY_TIMEOUT {
        warn!("Itinerary service reported a gateway timeout");
        return Err(TravelError::timeout(status.to_string()));
    }
    if !status.is_success() {
        return Err(TravelError::Transport {
            message: status.to_string(),
            status: Some(status.as_u16()),
        });
    }
    response
        .json::<R>()
        .await
        .map_err(|e| TravelError::transport(format!("Malformed response body: {e}")))
}

#[async_trait]
impl TravelBackend for HttpBackend {
    async fn generate_itinerary(&self, trip: &TripPayload) -> Result<ItineraryResponse> {
        self.post_json(GENERATE_ITINERARY_PATH, trip).await
    }

    async fn chat(&self, payload: &ChatPayload) -> Result<ChatReply> {
        self.post_json(CHAT_PATH, payload).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.url(HEALTH_PATH);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(map_send_error)?;
        decode(response).await
    }
}
