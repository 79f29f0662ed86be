//! Extraction of issue-tracker ticket references from request titles.

use std::sync::OnceLock;

use regex::Regex;

static TICKET_PATTERN: OnceLock<Regex> = OnceLock::new();

fn ticket_pattern() -> &'static Regex {
    // The pattern is a literal; compilation cannot fail.
    #[expect(clippy::expect_used, reason = "literal pattern compiles")]
    TICKET_PATTERN.get_or_init(|| Regex::new(r"#([A-Z]+-[0-9]+)").expect("valid ticket pattern"))
}

/// Extracts the first ticket reference (for example `JUM-271` from
/// `"feat: add login #JUM-271"`) from a request title.
///
/// Matching is case-sensitive: lowercase references are not tickets.
/// Returns `None` when the title carries no reference.
#[must_use]
pub fn extract_ticket(title: &str) -> Option<&str> {
    ticket_pattern()
        .captures(title)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str())
}
