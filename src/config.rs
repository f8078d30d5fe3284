//! Run configuration, read once from the environment at startup.

use crate::consts::endpoints;
use crate::variant::{DigestProfile, Variant};
use std::env;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("unknown DIGEST_VARIANT '{0}' (expected insider, briefing or global)")]
    UnknownVariant(String),
}

#[derive(Clone)]
pub struct Config {
    pub variant: Variant,
    pub api_key: String,
    pub push_token: String,
    pub completion_url: String,
    pub model: String,
    pub push_url: String,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let variant = match get("DIGEST_VARIANT") {
            Some(name) => name.parse().map_err(ConfigError::UnknownVariant)?,
            None => Variant::default(),
        };

        Ok(Self {
            variant,
            api_key: required("DEEPSEEK_API_KEY")?,
            push_token: required("PUSHPLUS_TOKEN")?,
            completion_url: get("DEEPSEEK_API_URL")
                .unwrap_or_else(|| endpoints::COMPLETION_URL.to_string()),
            model: get("DEEPSEEK_MODEL").unwrap_or_else(|| endpoints::COMPLETION_MODEL.to_string()),
            push_url: get("PUSHPLUS_URL").unwrap_or_else(|| endpoints::PUSH_URL.to_string()),
        })
    }

    pub fn profile(&self) -> DigestProfile {
        self.variant.profile()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("variant", &self.variant)
            .field("api_key", &"***")
            .field("push_token", &"***")
            .field("completion_url", &self.completion_url)
            .field("model", &self.model)
            .field("push_url", &self.push_url)
            .finish()
    }
}
