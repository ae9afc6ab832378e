use regex::Regex;
use std::sync::LazyLock;

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

pub fn percent_decode(url: &str) -> String {
    percent_encoding::percent_decode_str(url)
        .decode_utf8_lossy()
        .to_string()
}

pub fn percent_encode(url: &str) -> String {
    percent_encoding::utf8_percent_encode(
        url,
        percent_encoding::NON_ALPHANUMERIC,
    )
    .to_string()
    .replace("%2F", "/") // Preserve / for document paths
    .replace("%2D", "-")
}

/// Slugify a title
///
/// - lower-cases
/// - strips non-word characters
/// - collapses whitespace runs into single hyphens
/// - trims leading and trailing hyphens
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RE.replace_all(stripped.trim(), "-");
    hyphenated.trim_matches('-').to_string()
}
