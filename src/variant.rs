//! Digest variants. One pipeline, three profiles.

use crate::consts::{limits, Source, BRIEFING_SOURCES, GLOBAL_SOURCES, INSIDER_SOURCES};
use std::fmt;
use std::str::FromStr;

/// Which flavour of digest a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Hedge-fund style trading memo over live wires
    #[default]
    Insider,
    /// Calm morning briefing with summaries
    Briefing,
    /// International markets digest
    Global,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Insider => write!(f, "insider"),
            Variant::Briefing => write!(f, "briefing"),
            Variant::Global => write!(f, "global"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insider" => Ok(Variant::Insider),
            "briefing" => Ok(Variant::Briefing),
            "global" => Ok(Variant::Global),
            other => Err(other.to_string()),
        }
    }
}

/// Everything that differs between variants
#[derive(Debug, Clone, Copy)]
pub struct DigestProfile {
    pub sources: &'static [Source],
    pub max_entries: usize,
    pub include_summaries: bool,
    pub summary_chars: usize,
    pub append_disclaimer: bool,
    pub title_prefix: &'static str,
    /// Instruction text with `{date}` and `{news}` placeholders
    pub prompt_template: &'static str,
}

impl Variant {
    pub fn profile(self) -> DigestProfile {
        match self {
            Variant::Insider => DigestProfile {
                sources: INSIDER_SOURCES,
                max_entries: 4,
                include_summaries: false,
                summary_chars: limits::SUMMARY_CHARS,
                append_disclaimer: false,
                title_prefix: "📈 华尔街内参",
                prompt_template: prompts::INSIDER,
            },
            Variant::Briefing => DigestProfile {
                sources: BRIEFING_SOURCES,
                max_entries: 5,
                include_summaries: true,
                summary_chars: limits::SUMMARY_CHARS,
                append_disclaimer: true,
                title_prefix: "📰 财经早报",
                prompt_template: prompts::BRIEFING,
            },
            Variant::Global => DigestProfile {
                sources: GLOBAL_SOURCES,
                max_entries: 5,
                include_summaries: true,
                summary_chars: limits::SUMMARY_CHARS,
                append_disclaimer: true,
                title_prefix: "🌐 环球市场简报",
                prompt_template: prompts::GLOBAL,
            },
        }
    }
}

mod prompts {
    pub const INSIDER: &str = r#"你是一名拥有 20 年经验的华尔街对冲基金经理，擅长通过碎片化信息发现主力资金动向。
请阅读以下来自多个渠道的财经资讯：
{news}

请为你的 VIP 客户撰写一份《{date} 市场操盘内参》，严格遵守以下 Markdown 格式：

# 🦅 {date} 市场风向标

## 🚨 核心预警 (仅 1 条)
* **一句话说清当下最大的风险或机会。** (例如：美联储鹰派发言，成长股注意回调)

## 💰 资金暗流 (精选 3 个关键点)
* **[利好/利空/观望] 新闻标题**
  > **深度逻辑**：不要复述新闻！告诉我主力在干什么？这对散户意味着什么？(语气要毒舌、犀利)

## 🎯 操盘建议 (Actionable Advice)
* **A股**：(一句话策略，如：轻仓博弈/空仓看戏)
* **美股/加密**：(一句话策略)

**要求：**
1. 必须使用 Emoji 图标增加可读性。
2. 过滤掉无意义的通稿，只保留有交易价值的信息。
3. 语气要像在私募核心群里讲话，不要像新闻联播。"#;

    pub const BRIEFING: &str = r#"你是一名资深财经编辑，负责为上班族撰写每日财经早报。
以下是今天早上收集到的财经新闻标题与摘要：
{news}

请撰写一份《{date} 财经早报》，使用以下 Markdown 结构：

# ☕ {date} 财经早报

## 📌 今日要闻 (3-5 条)
* **新闻标题**：一句话说明发生了什么，以及为什么值得关注。

## 📊 市场影响
* 分别说明对 A股、港股、美股 可能的影响，每项一句话。

## 🔭 今日关注
* 列出今天值得留意的 1-2 个事件或数据发布。

**要求：**
1. 语气客观、简洁，避免情绪化表达。
2. 不编造新闻中没有的数据。
3. 全文控制在 600 字以内。"#;

    pub const GLOBAL: &str = r#"你是一名宏观策略分析师，关注全球市场的联动关系。
以下是来自海外财经媒体和央行的最新资讯（英文原文）：
{news}

请用中文撰写一份《{date} 环球市场简报》，使用以下 Markdown 结构：

# 🌐 {date} 环球市场简报

## 🏛 央行与宏观
* 提炼与利率、通胀、就业相关的关键信息。

## 💹 海外市场焦点 (3 条)
* **[利好/利空/中性] 事件**
  > 简述传导逻辑：这件事如何影响美元、美债、美股。

## 🇨🇳 对中国资产的启示
* 一到两句话说明对 A股/港股/人民币 的可能影响。

**要求：**
1. 英文专有名词保留原文并附中文解释。
2. 只保留对资产价格有影响的信息。
3. 使用 Emoji 增加可读性。"#;
}
