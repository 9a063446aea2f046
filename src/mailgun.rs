use std::time::Duration;

use anyhow::Context;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::runtime::Runtime;

use crate::{config::Config, credentials::Credentials, message::MailgunPayload};

/// What Mailgun returns when a message is accepted
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderResponse {
    pub id: String,
    pub message: String,
}

/// Provider failures sorted into the classes the user needs to act on
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("unable to reach provider: {0}")]
    Unreachable(String),

    #[error("{message}")]
    Rejected { message: String },
}

/// Anything able to hand a composed message to the provider
pub trait MessageSender {
    fn create_message(
        &self,
        domain: &str,
        payload: &MailgunPayload,
    ) -> Result<ProviderResponse, ProviderError>;
}

pub struct MailgunClient {
    rt: Runtime,
    http: Client,
    base_url: String,
    api_key: String,
}

impl MailgunClient {
    pub fn new(credentials: &Credentials, config: &Config) -> anyhow::Result<Self> {
        let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
        let timeout: Duration = config.timeout.into();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let base_url = config.base_url();
        debug!("Mailgun client using {base_url} with timeout of {}", config.timeout);
        Ok(Self {
            rt,
            http,
            base_url,
            api_key: credentials.api_key.clone(),
        })
    }

    fn messages_url(&self, domain: &str) -> String {
        format!("{}/v3/{domain}/messages", self.base_url.trim_end_matches('/'))
    }

    async fn do_send(
        &self,
        domain: &str,
        payload: &MailgunPayload,
    ) -> Result<ProviderResponse, ProviderError> {
        let url = self.messages_url(domain);
        debug!("Posting message to {url}");
        let resp = self
            .http
            .post(&url)
            .basic_auth("api", Some(&self.api_key))
            .form(payload)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(classify_transport_error)?;
        debug!("Mailgun responded with {status}");

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!("Unexpected success body from Mailgun: {body:?}");
            ProviderError::Rejected {
                message: format!("Failed to parse Mailgun response: {e}"),
            }
        })
    }
}

impl MessageSender for MailgunClient {
    fn create_message(
        &self,
        domain: &str,
        payload: &MailgunPayload,
    ) -> Result<ProviderResponse, ProviderError> {
        self.rt.block_on(self.do_send(domain, payload))
    }
}

fn classify_transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_connect() || err.is_timeout() {
        ProviderError::Unreachable(err.to_string())
    } else {
        ProviderError::Rejected {
            message: err.to_string(),
        }
    }
}

/// Maps a non-success response onto a [`ProviderError`]
fn classify_status(status: StatusCode, body: &str) -> ProviderError {
    if status == StatusCode::UNAUTHORIZED {
        return ProviderError::Unauthorized(body.to_string());
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status.to_string(),
    };
    ProviderError::Rejected { message }
}
