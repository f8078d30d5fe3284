//! Report generation over an OpenAI-compatible chat-completion endpoint.

use crate::config::Config;
use crate::consts::limits;
use crate::utils::truncate_text;
use crate::variant::DigestProfile;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Decode: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response has no choices[0].message.content")]
    MissingContent,
    #[error("completion is empty")]
    Empty,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Turns a prompt into generated text.
pub trait Completer {
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError>;
}

pub struct DeepSeekClient {
    client: Client,
    url: String,
    model: String,
    api_key: String,
}

impl DeepSeekClient {
    pub fn new(config: &Config) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(limits::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(limits::COMPLETION_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            url: config.completion_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// POST `{model, messages, stream:false}` with bearer auth.
    pub fn request(&self, prompt: &str) -> RequestBuilder {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            stream: false,
        };
        self.client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
    }
}

impl Completer for DeepSeekClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        let res = self.request(prompt).send().await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        interpret_completion(status, &body)
    }
}

/// Maps a raw status and body onto the completion text or a typed failure.
pub fn interpret_completion(status: u16, body: &str) -> Result<String, GenerateError> {
    if !(200..300).contains(&status) {
        return Err(GenerateError::Status {
            status,
            body: truncate_text(body, limits::ERROR_BODY_CHARS),
        });
    }

    let parsed: ChatResponse = serde_json::from_str(body)?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or(GenerateError::MissingContent)?;

    let content = content.trim();
    if content.is_empty() {
        return Err(GenerateError::Empty);
    }
    Ok(content.to_string())
}

/// Fills the profile's instruction template with today's date and the news.
pub fn build_prompt(profile: &DigestProfile, news: &str, date: NaiveDate) -> String {
    let label = date.format("%m月%d日").to_string();
    profile
        .prompt_template
        .replace("{date}", &label)
        .replace("{news}", news)
}
