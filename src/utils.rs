use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static whitespace pattern"))
}

/// Line breaks and closing block tags; text on either side must stay apart.
fn block_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</(?:p|li|div|tr|td|th|h[1-6]|blockquote)\s*>")
            .expect("static block tag pattern")
    })
}

/// Trims and collapses whitespace. For text that is already plain, such as
/// feed titles, which feed-rs hands over with entities decoded.
pub fn collapse_whitespace(text: &str) -> String {
    whitespace_run().replace_all(text.trim(), " ").into_owned()
}

/// Strips markup and entities, collapses whitespace into single spaces.
pub fn clean_text(text: &str) -> String {
    if !text.contains('<') && !text.contains('&') {
        return collapse_whitespace(text);
    }
    let spaced = block_boundary().replace_all(text, "$0\n");
    let plain = Html::parse_fragment(&spaced)
        .root_element()
        .text()
        .collect::<String>();
    collapse_whitespace(&plain)
}

/// Cuts on char boundaries, never inside a multi-byte character.
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    s.chars().take(max_chars).collect::<String>() + "…"
}
