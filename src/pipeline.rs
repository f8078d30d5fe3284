//! Aggregate → generate → notify, each step gated on the previous one.

use crate::aggregator::aggregate;
use crate::consts::{limits, DISCLAIMER};
use crate::generator::{build_prompt, Completer};
use crate::network::FeedFetcher;
use crate::notifier::{PushPayload, Pusher};
use crate::variant::DigestProfile;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Too little news to bother the model
    NoNews,
    /// Model call failed, nothing was sent
    NoReport,
    Delivered,
    DeliveryFailed,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::NoNews => write!(f, "no usable news, check network or sources"),
            RunOutcome::NoReport => write!(f, "analysis unavailable, nothing sent"),
            RunOutcome::Delivered => write!(f, "digest delivered"),
            RunOutcome::DeliveryFailed => write!(f, "digest generated but delivery failed"),
        }
    }
}

pub struct Pipeline<'a, F, C, P> {
    pub profile: DigestProfile,
    pub fetcher: &'a F,
    pub completer: &'a C,
    pub pusher: &'a P,
    pub push_token: &'a str,
}

impl<'a, F, C, P> Pipeline<'a, F, C, P>
where
    F: FeedFetcher,
    C: Completer,
    P: Pusher,
{
    pub async fn run(&self, today: NaiveDate) -> RunOutcome {
        log::info!("Scanning {} sources...", self.profile.sources.len());
        let news = aggregate(self.fetcher, &self.profile).await;
        log::info!(
            "Aggregated {} chars ({} ok / {} failed)",
            news.char_len(),
            news.success_count,
            news.failure_count
        );

        if news.is_empty() {
            log::warn!("Every source failed or was empty");
            return RunOutcome::NoNews;
        }
        if news.char_len() <= limits::MIN_NEWS_CHARS {
            log::warn!("Collected news too short to analyse");
            return RunOutcome::NoNews;
        }

        log::info!("Requesting analysis...");
        let prompt = build_prompt(&self.profile, &news.text, today);
        let report = match self.completer.complete(&prompt).await {
            Ok(report) => report,
            Err(e) => {
                log::error!("Analysis unavailable: {}", e);
                return RunOutcome::NoReport;
            }
        };
        log::info!("Report ready ({} chars)", report.chars().count());

        let disclaimer = self.profile.append_disclaimer.then_some(DISCLAIMER);
        let payload = PushPayload::new(self.push_token, self.profile.title_prefix, today, &report, disclaimer);

        log::info!("Pushing report...");
        match self.pusher.push(&payload).await {
            Ok(()) => RunOutcome::Delivered,
            Err(e) => {
                log::error!("Push failed: {}", e);
                RunOutcome::DeliveryFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::Source;
    use crate::generator::GenerateError;
    use crate::network::{FeedEntry, FetchError};
    use crate::notifier::NotifyError;
    use crate::variant::Variant;
    use std::cell::{Cell, RefCell};

    static SOURCES: &[Source] = &[
        Source::new("First", "https://first.test/rss"),
        Source::new("Second", "https://second.test/rss"),
        Source::new("Third", "https://third.test/rss"),
    ];

    /// First source has six headlines, second is down, third is empty.
    struct MixedFeeds;

    impl FeedFetcher for MixedFeeds {
        async fn fetch(&self, source: &Source) -> Result<Vec<FeedEntry>, FetchError> {
            match source.name {
                "First" => Ok((1..=6).map(|i| FeedEntry::new(format!("Market headline number {i}"))).collect()),
                "Second" => Err(FetchError::Status(502)),
                _ => Err(FetchError::Empty),
            }
        }
    }

    struct NoFeeds;

    impl FeedFetcher for NoFeeds {
        async fn fetch(&self, _source: &Source) -> Result<Vec<FeedEntry>, FetchError> {
            Err(FetchError::Empty)
        }
    }

    struct FakeModel {
        reply: Option<&'static str>,
        prompts: RefCell<Vec<String>>,
    }

    impl FakeModel {
        fn answering(reply: &'static str) -> Self {
            Self { reply: Some(reply), prompts: RefCell::new(Vec::new()) }
        }

        fn failing() -> Self {
            Self { reply: None, prompts: RefCell::new(Vec::new()) }
        }
    }

    impl Completer for FakeModel {
        async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            match self.reply {
                Some(text) => Ok(text.to_string()),
                None => crate::generator::interpret_completion(500, "internal error"),
            }
        }
    }

    #[derive(Default)]
    struct FakePush {
        fail: bool,
        sent: RefCell<Vec<PushPayload>>,
        calls: Cell<usize>,
    }

    impl Pusher for FakePush {
        async fn push(&self, payload: &PushPayload) -> Result<(), NotifyError> {
            self.calls.set(self.calls.get() + 1);
            self.sent.borrow_mut().push(payload.clone());
            if self.fail {
                return Err(NotifyError::Rejected { code: 903, msg: "bad token".into() });
            }
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn profile(variant: Variant) -> DigestProfile {
        DigestProfile { sources: SOURCES, ..variant.profile() }
    }

    #[tokio::test]
    async fn partial_failure_still_delivers() {
        let model = FakeModel::answering("# 🦅 市场风向标\n* 风险提示");
        let push = FakePush::default();
        let pipeline = Pipeline {
            profile: profile(Variant::Insider),
            fetcher: &MixedFeeds,
            completer: &model,
            pusher: &push,
            push_token: "tok",
        };

        assert_eq!(pipeline.run(today()).await, RunOutcome::Delivered);

        let prompts = model.prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].matches("• Market headline").count(), 4);
        assert!(!prompts[0].contains("Market headline number 5"));
        assert!(!prompts[0].contains("Second"));

        let sent = push.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].content, "# 🦅 市场风向标\n* 风险提示");
        assert_eq!(sent[0].title, "📈 华尔街内参 2026-10-18");
        assert_eq!(sent[0].token, "tok");
    }

    #[tokio::test]
    async fn disclaimer_variants_keep_report_verbatim() {
        let report = "# ☕ 财经早报\n正文";
        let model = FakeModel::answering(report);
        let push = FakePush::default();
        let pipeline = Pipeline {
            profile: profile(Variant::Briefing),
            fetcher: &MixedFeeds,
            completer: &model,
            pusher: &push,
            push_token: "tok",
        };

        assert_eq!(pipeline.run(today()).await, RunOutcome::Delivered);
        let sent = push.sent.borrow();
        assert!(sent[0].content.contains(report));
        assert!(sent[0].content.ends_with(DISCLAIMER));
    }

    #[tokio::test]
    async fn no_news_skips_model_and_push() {
        let model = FakeModel::answering("unused");
        let push = FakePush::default();
        let pipeline = Pipeline {
            profile: profile(Variant::Global),
            fetcher: &NoFeeds,
            completer: &model,
            pusher: &push,
            push_token: "tok",
        };

        assert_eq!(pipeline.run(today()).await, RunOutcome::NoNews);
        assert!(model.prompts.borrow().is_empty());
        assert_eq!(push.calls.get(), 0);
    }

    #[tokio::test]
    async fn model_failure_never_reaches_push() {
        let model = FakeModel::failing();
        let push = FakePush::default();
        let pipeline = Pipeline {
            profile: profile(Variant::Insider),
            fetcher: &MixedFeeds,
            completer: &model,
            pusher: &push,
            push_token: "tok",
        };

        assert_eq!(pipeline.run(today()).await, RunOutcome::NoReport);
        assert_eq!(model.prompts.borrow().len(), 1);
        assert_eq!(push.calls.get(), 0);
    }

    #[tokio::test]
    async fn push_failure_is_reported_not_raised() {
        let model = FakeModel::answering("report");
        let push = FakePush { fail: true, ..Default::default() };
        let pipeline = Pipeline {
            profile: profile(Variant::Insider),
            fetcher: &MixedFeeds,
            completer: &model,
            pusher: &push,
            push_token: "tok",
        };

        assert_eq!(pipeline.run(today()).await, RunOutcome::DeliveryFailed);
        assert_eq!(push.calls.get(), 1);
    }
}
