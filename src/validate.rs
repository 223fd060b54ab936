//! Field validators for interactive answers.
//!
//! Every validator is pure: it either accepts the raw input (possibly
//! returning a cleaned value) or returns a `Rejection` whose message is shown
//! before the same prompt is asked again.

use crate::util::title_to_slug;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

static HEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#?(?:[0-9a-f]{3}|[0-9a-f]{4}|[0-9a-f]{6}|[0-9a-f]{8})$")
        .expect("regex for hex colors")
});

static SECURE_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https://[^\s]*$").expect("regex for secure URLs"));

/// Why an answer was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Required,
    DuplicateTitle,
    InvalidHex,
    InsecureUrl,
    MalformedUrl(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Required => write!(f, "This field is required"),
            Rejection::DuplicateTitle => write!(f, "This brand title or slug already exists"),
            Rejection::InvalidHex => write!(f, "This should be a valid hex code"),
            Rejection::InsecureUrl => write!(f, "This should be a secure URL (https://...)"),
            Rejection::MalformedUrl(detail) => write!(f, "This URL is malformed: {detail}"),
        }
    }
}

pub type Verdict<T> = std::result::Result<T, Rejection>;

/// Exact titles and slugs already present in the dataset.
#[derive(Debug, Default)]
pub struct TitleIndex {
    titles: HashSet<String>,
    slugs: HashSet<String>,
}

impl TitleIndex {
    pub fn new<'a>(titles: impl IntoIterator<Item = &'a str>) -> Self {
        let mut index = TitleIndex::default();
        for title in titles {
            index.titles.insert(title.to_string());
            index.slugs.insert(title_to_slug(title));
        }
        index
    }

    /// True when `title` or its slug collides with an existing entry.
    pub fn collides(&self, title: &str) -> bool {
        self.titles.contains(title) || self.slugs.contains(&title_to_slug(title))
    }
}

pub fn validate_title(input: &str, index: &TitleIndex) -> Verdict<String> {
    if input.trim().is_empty() {
        return Err(Rejection::Required);
    }
    if index.collides(input) {
        return Err(Rejection::DuplicateTitle);
    }
    Ok(input.to_string())
}

/// Accept `#`-optional hex colors of 3, 4, 6 or 8 digits.
pub fn validate_hex(input: &str) -> Verdict<String> {
    let trimmed = input.trim();
    if HEX_PATTERN.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(Rejection::InvalidHex)
    }
}

/// Accept absolute `https://` URLs only; nothing is rewritten.
pub fn validate_url(input: &str) -> Verdict<String> {
    let trimmed = input.trim();
    if !trimmed.starts_with("https://") {
        return Err(Rejection::InsecureUrl);
    }
    if !SECURE_URL_PATTERN.is_match(trimmed) {
        return Err(Rejection::MalformedUrl("contains whitespace".to_string()));
    }
    let parsed =
        url::Url::parse(trimmed).map_err(|err| Rejection::MalformedUrl(err.to_string()))?;
    if !matches!(parsed.host_str(), Some(host) if !host.is_empty()) {
        return Err(Rejection::MalformedUrl("missing host".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Like `validate_url`, but blank input means "no URL".
pub fn validate_optional_url(input: &str) -> Verdict<Option<String>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    validate_url(input).map(Some)
}

/// Split comma-separated aliases into a trimmed, non-empty list.
pub fn validate_alias_list(input: &str) -> Verdict<Vec<String>> {
    let aliases: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
        .collect();
    if aliases.is_empty() {
        return Err(Rejection::Required);
    }
    Ok(aliases)
}
