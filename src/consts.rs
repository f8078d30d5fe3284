//! Feed registries per digest variant, remote endpoints and fixed limits.

/// Feed source definition with static lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    pub name: &'static str,
    pub url: &'static str,
}

impl Source {
    pub const fn new(name: &'static str, url: &'static str) -> Self {
        Self { name, url }
    }
}

/// Live market wires: macro, A-share telegraph, US/HK desk
pub static INSIDER_SOURCES: &[Source] = &[
    Source::new(
        "🌊 华尔街见闻 (全球宏观)",
        "https://rsshub.rssforever.com/wallstreetcn/live/global",
    ),
    Source::new(
        "🇨🇳 财联社 (A股电报)",
        "https://rsshub.rssforever.com/cls/telegraph",
    ),
    Source::new(
        "🇺🇸 格隆汇 (美股/港股)",
        "https://rsshub.rssforever.com/gelonghui/live",
    ),
];

/// Morning briefing: depth pieces over live ticks
pub static BRIEFING_SOURCES: &[Source] = &[
    Source::new(
        "📰 华尔街见闻 (要闻)",
        "https://rsshub.rssforever.com/wallstreetcn/news/global",
    ),
    Source::new(
        "📊 财联社 (深度)",
        "https://rsshub.rssforever.com/cls/depth/1000",
    ),
    Source::new(
        "🏦 第一财经 (头条)",
        "https://rsshub.rssforever.com/yicai/headline",
    ),
];

pub static GLOBAL_SOURCES: &[Source] = &[
    Source::new(
        "🌐 CNBC Markets",
        "https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=20910258",
    ),
    Source::new(
        "💹 MarketWatch",
        "https://feeds.content.dowjones.io/public/rss/mw_topstories",
    ),
    Source::new(
        "🏛 Federal Reserve",
        "https://www.federalreserve.gov/feeds/press_all.xml",
    ),
];

/// Remote endpoints (overridable through the environment, see `config`)
pub mod endpoints {
    pub const COMPLETION_URL: &str = "https://api.deepseek.com/chat/completions";
    pub const COMPLETION_MODEL: &str = "deepseek-chat";
    pub const PUSH_URL: &str = "http://www.pushplus.plus/send";
}

/// HTTP headers for feed requests
pub mod headers {
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    pub const ACCEPT_RSS: &str =
        "application/rss+xml,application/atom+xml,application/xml,text/xml;q=0.9,*/*;q=0.8";
    pub const ACCEPT_LANG: &str = "zh-CN,zh;q=0.9,en;q=0.8";
}

/// Limits and thresholds
pub mod limits {
    pub const SUMMARY_CHARS: usize = 100;
    /// Aggregated text must be longer than this to be worth a completion call
    pub const MIN_NEWS_CHARS: usize = 20;
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const FEED_TIMEOUT_SECS: u64 = 15;
    pub const COMPLETION_TIMEOUT_SECS: u64 = 120;
    pub const PUSH_TIMEOUT_SECS: u64 = 15;
    /// How much of an error body ends up in a log line
    pub const ERROR_BODY_CHARS: usize = 200;
}

pub const DISCLAIMER: &str =
    "⚠️ 免责声明：本报告由 AI 根据公开资讯自动生成，仅供参考，不构成任何投资建议。市场有风险，投资需谨慎。";
