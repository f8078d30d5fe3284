//! Delivery to the PushPlus webhook (WeChat push).

use crate::config::Config;
use crate::consts::limits;
use crate::utils::truncate_text;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("rejected by push service (code {code}): {msg}")]
    Rejected { code: i64, msg: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushPayload {
    pub token: String,
    pub title: String,
    pub content: String,
    pub template: &'static str,
}

/// PushPlus answers 200 with its own status envelope
#[derive(Debug, Deserialize)]
struct PushReply {
    code: i64,
    #[serde(default)]
    msg: String,
}

impl PushPayload {
    pub fn new(token: &str, title_prefix: &str, date: NaiveDate, report: &str, disclaimer: Option<&str>) -> Self {
        let mut content = report.to_string();
        if let Some(footer) = disclaimer {
            content.push_str("\n\n---\n");
            content.push_str(footer);
        }
        Self {
            token: token.to_string(),
            title: format!("{} {}", title_prefix, date.format("%Y-%m-%d")),
            content,
            template: "markdown",
        }
    }
}

/// Hands a payload to the messaging side.
pub trait Pusher {
    async fn push(&self, payload: &PushPayload) -> Result<(), NotifyError>;
}

pub struct PushPlusClient {
    client: Client,
    url: String,
}

impl PushPlusClient {
    pub fn new(config: &Config) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(limits::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(limits::PUSH_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, url: config.push_url.clone() })
    }

    pub fn request(&self, payload: &PushPayload) -> RequestBuilder {
        self.client.post(&self.url).json(payload)
    }
}

impl Pusher for PushPlusClient {
    async fn push(&self, payload: &PushPayload) -> Result<(), NotifyError> {
        let res = self.request(payload).send().await?;
        let status = res.status().as_u16();
        let body = res.text().await?;
        interpret_reply(status, &body)
    }
}

/// A 2xx without a readable envelope counts as delivered; the service sometimes
/// answers with plain text.
pub fn interpret_reply(status: u16, body: &str) -> Result<(), NotifyError> {
    if !(200..300).contains(&status) {
        return Err(NotifyError::Status {
            status,
            body: truncate_text(body, limits::ERROR_BODY_CHARS),
        });
    }
    match serde_json::from_str::<PushReply>(body) {
        Ok(reply) if reply.code != 200 => Err(NotifyError::Rejected { code: reply.code, msg: reply.msg }),
        _ => {
            log::debug!("Push reply: {}", truncate_text(body, limits::ERROR_BODY_CHARS));
            Ok(())
        }
    }
}
