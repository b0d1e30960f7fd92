//! REST client for the caffeine backend.
//!
//! Thin wrapper over the endpoints the tracker needs. Intake data that comes
//! back is validated before it reaches the decay estimator.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiError, Result, ValidationError};
use crate::intake::{validate_events, CaffeineLog, IntakeEvent, NewCaffeineLog};
use crate::storage::ApiConfig;

const INTAKE_HISTORY_PATH: &str = "api/caffeine/caffeine-over-time/";
const LOGS_PATH: &str = "api/caffeine/logs";
const CREATE_LOG_PATH: &str = "api/caffeine/logs/create/";
const CHAT_PATH: &str = "api/ai/chat/";

/// Shown when the assistant answers without a `response` field.
pub const NO_RESPONSE: &str = "[No response]";

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    response: Option<String>,
}

/// Client for the caffeine REST API.
pub struct CaffeineApi {
    base_url: Url,
    token: Option<String>,
    http_client: Client,
}

impl CaffeineApi {
    /// Create a client for `base_url` with an optional auth token.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        Self::build(base_url, token, Client::new())
    }

    /// Create a client from the `[api]` configuration section.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::from)?;
        Self::build(&config.base_url, config.token().map(str::to_string), http_client)
    }

    fn build(base_url: &str, token: Option<String>, http_client: Client) -> Result<Self> {
        // A trailing slash keeps any path prefix when joining endpoints
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(ApiError::from)?;
        Ok(Self {
            base_url,
            token,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path).map_err(ApiError::from)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Token {token}")),
            None => request,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            }
            .into());
        }
        Ok(response.json::<T>().await.map_err(ApiError::from)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self
            .authorize(self.http_client.get(url))
            .send()
            .await
            .map_err(ApiError::from)?;
        Self::read_json(response).await
    }

    /// Fetch the `{date, caffeine_mg}` history that feeds the decay chart.
    pub async fn fetch_intake_history(&self) -> Result<Vec<IntakeEvent>> {
        let events: Vec<IntakeEvent> = self.get_json(INTAKE_HISTORY_PATH).await?;
        validate_events(&events)?;
        tracing::info!(count = events.len(), "fetched intake history");
        Ok(events)
    }

    /// Fetch the full log entries of the current user.
    pub async fn fetch_logs(&self) -> Result<Vec<CaffeineLog>> {
        let logs: Vec<CaffeineLog> = self.get_json(LOGS_PATH).await?;
        let events: Vec<IntakeEvent> = logs.iter().map(CaffeineLog::intake_event).collect();
        validate_events(&events)?;
        tracing::info!(count = logs.len(), "fetched caffeine logs");
        Ok(logs)
    }

    /// Create a confirmed log entry and return it as stored.
    pub async fn create_log(&self, log: &NewCaffeineLog) -> Result<CaffeineLog> {
        if !self.is_authenticated() {
            return Err(ApiError::NotAuthenticated.into());
        }
        log.validate()?;

        let url = self.endpoint(CREATE_LOG_PATH)?;
        let response = self
            .authorize(self.http_client.post(url))
            .json(log)
            .send()
            .await
            .map_err(ApiError::from)?;
        let created: CaffeineLog = Self::read_json(response).await?;
        tracing::info!(id = %created.id, caffeine_mg = created.caffeine_mg, "created caffeine log");
        Ok(created)
    }

    /// Send one message to the AI assistant and return its reply.
    ///
    /// A reply without a `response` field comes back as [`NO_RESPONSE`].
    pub async fn chat(&self, message: &str) -> Result<String> {
        if !self.is_authenticated() {
            return Err(ApiError::NotAuthenticated.into());
        }
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "message".into(),
                message: "must not be empty".into(),
            }
            .into());
        }

        let url = self.endpoint(CHAT_PATH)?;
        let response = self
            .authorize(self.http_client.post(url))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(ApiError::from)?;
        let reply: ChatResponse = Self::read_json(response).await?;
        tracing::debug!(answered = reply.response.is_some(), "assistant replied");
        Ok(reply.response.unwrap_or_else(|| NO_RESPONSE.to_string()))
    }
}
