//! Protecting template placeholders from the translator, and deciding what is not prose.
use regex::{Captures, Regex};
use std::sync::LazyLock;

static TOKEN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"\{\{[^}]+\}\}", r"%[A-Za-z0-9_]+%", r"#[^#]+#"]
        .iter()
        .map(|p| Regex::new(p).expect("token pattern is valid"))
        .collect()
});

static PLACEHOLDER_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\[\[T\d+\]\])+$").expect("placeholder pattern is valid"));

static MOCK_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([A-Za-z]{2}(?:-[A-Za-z]{2})?)\]\s+").expect("mock prefix pattern is valid")
});

/// Placeholder keys (`[[T0]]`, `[[T1]]`, ...) and the tokens they stand for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders(Vec<(String, String)>);

impl Placeholders {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Puts the original tokens back in place of their keys.
    pub fn restore(&self, text: &str) -> String {
        self.0
            .iter()
            .fold(text.to_string(), |acc, (key, token)| acc.replace(key, token))
    }
}

/// Replaces `{{token}}`, `%TOKEN%` and `#token#` with numbered placeholders.
pub fn protect_tokens(text: &str) -> (String, Placeholders) {
    let mut placeholders = Vec::new();
    let mut sanitized = text.to_string();
    for pattern in TOKEN_PATTERNS.iter() {
        sanitized = pattern
            .replace_all(&sanitized, |caps: &Captures| {
                let key = format!("[[T{}]]", placeholders.len());
                placeholders.push((key.clone(), caps[0].to_string()));
                key
            })
            .into_owned();
    }
    (sanitized, Placeholders(placeholders))
}

pub fn looks_like_url_or_html(text: &str) -> bool {
    text.contains("http://")
        || text.contains("https://")
        || (text.contains('<') && text.contains('>'))
}

/// Blank text, or text made of nothing but placeholders and whitespace.
pub fn is_only_tokens_or_whitespace(text: &str) -> bool {
    if text.trim().is_empty() {
        return true;
    }
    let (sanitized, _) = protect_tokens(text);
    let leftover: String = sanitized.chars().filter(|c| *c != ' ' && *c != '\n').collect();
    PLACEHOLDER_ONLY.is_match(&leftover)
}

/// Drops a leading `[es] `-style prefix left by an earlier mock run, when it names `locale`.
pub fn strip_mock_prefix<'t>(text: &'t str, locale: &str) -> &'t str {
    match MOCK_PREFIX.captures(text) {
        Some(caps) if caps[1].eq_ignore_ascii_case(locale) => &text[caps[0].len()..],
        _ => text,
    }
}
