//! Feed fetching engine: HTTP GET plus feed-rs parsing (RSS, Atom, JSON Feed).

use crate::consts::{headers, limits, Source};
use crate::utils::{clean_text, collapse_whitespace};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("Parse: {0}")]
    Parse(String),
    #[error("Empty")]
    Empty,
}

/// One headline pulled out of a feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub summary: Option<String>,
}

impl FeedEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), summary: None }
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }
}

/// Anything that can turn a source into its entries.
pub trait FeedFetcher {
    async fn fetch(&self, source: &Source) -> Result<Vec<FeedEntry>, FetchError>;
}

pub struct FeedEngine {
    client: Client,
}

impl FeedEngine {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(headers::USER_AGENT)
            .connect_timeout(Duration::from_secs(limits::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(limits::FEED_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    pub fn request(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(ACCEPT, headers::ACCEPT_RSS)
            .header(ACCEPT_LANGUAGE, headers::ACCEPT_LANG)
    }

    pub async fn fetch_url(&self, url: &str) -> Result<Vec<FeedEntry>, FetchError> {
        let res = self.request(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = res.bytes().await?;
        parse_feed(&bytes)
    }
}

impl FeedFetcher for FeedEngine {
    async fn fetch(&self, source: &Source) -> Result<Vec<FeedEntry>, FetchError> {
        self.fetch_url(source.url).await
    }
}

/// Parses a feed document, keeping entries that carry a usable title.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedEntry>, FetchError> {
    let feed = feed_rs::parser::parse(bytes).map_err(|e| FetchError::Parse(e.to_string()))?;

    let items: Vec<FeedEntry> = feed
        .entries
        .into_iter()
        .filter_map(|e| {
            // feed-rs already decodes entities; a literal '<' here is headline text
            let title = collapse_whitespace(&e.title.map(|t| t.content).unwrap_or_default());
            if title.is_empty() {
                return None;
            }
            let summary = e
                .summary
                .map(|s| s.content)
                .or_else(|| e.content.and_then(|c| c.body))
                .map(|s| clean_text(&s))
                .filter(|s| !s.is_empty());
            Some(FeedEntry::new(title).with_summary(summary))
        })
        .collect();

    if items.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(items)
}
