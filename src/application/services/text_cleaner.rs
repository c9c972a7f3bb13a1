use std::sync::LazyLock;

use regex::Regex;

static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n\t]").unwrap());
static DIGIT_TOKENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w*\d\w*\b").unwrap());
static NON_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z ]+").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub fn clean_text(raw: &str) -> String {
    let text = raw.to_lowercase();
    let text = URL.replace_all(&text, "");
    let text = LINE_BREAKS.replace_all(&text, " ");
    let text = DIGIT_TOKENS.replace_all(&text, " ");
    let text = NON_LETTERS.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}
