//! Market digest - one-shot batch job: feeds → DeepSeek report → PushPlus.

mod aggregator;
mod config;
mod consts;
mod generator;
mod network;
mod notifier;
mod pipeline;
#[cfg(test)]
mod test_utils;
mod utils;
mod variant;

use crate::config::Config;
use crate::generator::DeepSeekClient;
use crate::network::FeedEngine;
use crate::notifier::PushPlusClient;
use crate::pipeline::{Pipeline, RunOutcome};

#[tokio::main]
async fn main() {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            return;
        }
    };
    log::info!("Starting {} digest", config.variant);
    log::debug!("{:?}", config);

    let outcome = match build_and_run(&config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("Could not set up HTTP clients: {}", e);
            return;
        }
    };

    match outcome {
        RunOutcome::Delivered => log::info!("Done: {}", outcome),
        _ => log::warn!("Stopped: {}", outcome),
    }
}

async fn build_and_run(config: &Config) -> Result<RunOutcome, Box<dyn std::error::Error>> {
    let fetcher = FeedEngine::new()?;
    let completer = DeepSeekClient::new(config)?;
    let pusher = PushPlusClient::new(config)?;

    let pipeline = Pipeline {
        profile: config.profile(),
        fetcher: &fetcher,
        completer: &completer,
        pusher: &pusher,
        push_token: &config.push_token,
    };

    let today = chrono::Local::now().date_naive();
    Ok(pipeline.run(today).await)
}
