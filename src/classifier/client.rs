use chrono::Utc;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{
    config::ClassifierConfig,
    domain::{ClassificationResult, Submission},
};

use super::wire::{parse_body, ClassifyRequest};

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("webhook returned malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct WebhookClient {
    http: Client,
    config: ClassifierConfig,
}

impl WebhookClient {
    pub fn new(http: Client, config: ClassifierConfig) -> Self {
        Self { http, config }
    }

    pub async fn classify(
        &self,
        submission: &Submission,
    ) -> Result<ClassificationResult, ClassifyError> {
        let mut request = self
            .http
            .post(&self.config.webhook_url)
            .json(&ClassifyRequest {
                texto: &submission.message,
            });
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClassifyError::Status { status, body });
        }

        Ok(parse_body(&body)?)
    }

    /// Runs the exchange and always settles: every failure becomes [`ClassificationResult::error`].
    pub async fn resolve(&self, submission: &Submission) -> ClassificationResult {
        let outcome = self.classify(submission).await;
        let elapsed_ms = (Utc::now() - submission.submitted_at).num_milliseconds();
        match outcome {
            Ok(result) => {
                tracing::info!(
                    target: "classifier",
                    category = %result.category,
                    confidence = result.confidence,
                    elapsed_ms,
                    "message classified"
                );
                result
            }
            Err(ClassifyError::Status { status, body }) => {
                tracing::error!(
                    target: "classifier",
                    status = status.as_u16(),
                    body = %body,
                    elapsed_ms,
                    "webhook rejected classification request"
                );
                ClassificationResult::error()
            }
            Err(err) => {
                tracing::error!(
                    target: "classifier",
                    error = %err,
                    elapsed_ms,
                    "classification failed"
                );
                ClassificationResult::error()
            }
        }
    }
}
