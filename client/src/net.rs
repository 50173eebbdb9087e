use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use floorplan_shared::{
    ActionEvent, FeedbackEvent, PredictionResponse, EVENT_PATH, FEEDBACK_PATH, PREDICT_PATH,
};

use crate::config::BackendConfig;
use crate::error::{ClientError, Result};

/// Outbound half of the backend: committed actions and confirmations.
/// Response bodies are never consumed.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn submit_action(&self, event: &ActionEvent) -> Result<()>;
    async fn submit_feedback(&self, event: &FeedbackEvent) -> Result<()>;
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self) -> Result<PredictionResponse>;
}

pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    async fn post<T: serde::Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<()> {
        let response = self
            .client
            .post(endpoint_url(&self.base_url, path))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl EventSink for HttpBackend {
    async fn submit_action(&self, event: &ActionEvent) -> Result<()> {
        self.post(EVENT_PATH, event).await
    }

    async fn submit_feedback(&self, event: &FeedbackEvent) -> Result<()> {
        self.post(FEEDBACK_PATH, event).await
    }
}

#[async_trait]
impl PredictionService for HttpBackend {
    async fn predict(&self) -> Result<PredictionResponse> {
        let response = self
            .client
            .get(endpoint_url(&self.base_url, PREDICT_PATH))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_without_double_slash() {
        assert_eq!(
            endpoint_url("http://localhost:8000/", PREDICT_PATH),
            "http://localhost:8000/api/predict"
        );
        assert_eq!(
            endpoint_url("http://host", EVENT_PATH),
            "http://host/api/event"
        );
    }

    #[test]
    fn backend_builds_with_timeout() {
        let config = BackendConfig {
            base_url: "http://localhost:8000".into(),
            timeout_ms: Some(500),
        };
        assert!(HttpBackend::new(&config).is_ok());
    }
}
