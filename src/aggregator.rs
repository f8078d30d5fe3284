//! Feed aggregation: walk the sources in order, keep a bounded slice of each.

use crate::network::{FeedEntry, FeedFetcher, FetchError};
use crate::utils::truncate_text;
use crate::variant::DigestProfile;

/// Combined text plus a tally of how the sources behaved
#[derive(Debug, Default)]
pub struct AggregatedNews {
    pub text: String,
    pub success_count: usize,
    pub failure_count: usize,
}

impl AggregatedNews {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in chars, which is what prompt size tracks.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Fetch every source of the profile. A failing source is logged and skipped.
pub async fn aggregate<F: FeedFetcher>(fetcher: &F, profile: &DigestProfile) -> AggregatedNews {
    let mut news = AggregatedNews {
        text: String::with_capacity(4096),
        ..Default::default()
    };

    for source in profile.sources {
        log::info!("Fetching {}...", source.name);
        match fetcher.fetch(source).await {
            Ok(entries) if !entries.is_empty() => {
                let taken = entries.len().min(profile.max_entries);
                news.text.push_str(&format_section(source.name, &entries, profile));
                log::info!("{}: {} of {} entries kept", source.name, taken, entries.len());
                news.success_count += 1;
            }
            Ok(_) | Err(FetchError::Empty) => {
                log::warn!("{} has nothing new, skipping", source.name);
                news.failure_count += 1;
            }
            Err(e) => {
                log::error!("Failed to fetch {}: {}", source.name, e);
                news.failure_count += 1;
            }
        }
    }

    news
}

/// One source block: header line, then at most `max_entries` bullets.
pub fn format_section(source_name: &str, entries: &[FeedEntry], profile: &DigestProfile) -> String {
    let mut output = format!("\n--- 来自 {} ---\n", source_name);
    for entry in entries.iter().take(profile.max_entries) {
        output.push_str(&format!("• {}\n", entry.title));
        if !profile.include_summaries {
            continue;
        }
        if let Some(summary) = &entry.summary {
            let short = truncate_text(summary, profile.summary_chars);
            if short != entry.title {
                output.push_str(&format!("  {}\n", short));
            }
        }
    }
    output
}
