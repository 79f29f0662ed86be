//! Plain-text shaping helpers shared by the view components.

/// Truncates `text` to at most `max_len` characters, appending an ellipsis
/// when anything was cut. Operates on character boundaries.
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    let effective = max_len.max(4);
    if text.chars().count() <= effective {
        return text.to_owned();
    }
    let kept: String = text.chars().take(effective.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Wraps `text` to fit within `max_width` columns, breaking at spaces where
/// possible. Line endings are normalised first; blank lines survive.
#[must_use]
pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    let width = if max_width == 0 { 80 } else { max_width };
    let normalised = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut result = Vec::new();
    for line in normalised.split('\n') {
        if line.is_empty() {
            result.push(String::new());
            continue;
        }
        wrap_line(line, width, &mut result);
    }
    result
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut rest: Vec<char> = line.chars().collect();
    while rest.len() > width {
        // Prefer breaking at a space in the back half of the window.
        let break_point = (width / 2..=width)
            .rev()
            .find(|&i| rest.get(i).copied() == Some(' '))
            .unwrap_or(width);
        let head: String = rest.drain(..break_point).collect();
        out.push(head);
        while rest.first().copied() == Some(' ') {
            rest.remove(0);
        }
    }
    if !rest.is_empty() {
        out.push(rest.into_iter().collect());
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{truncate, wrap};

    #[rstest]
    #[case("short", 10, "short")]
    #[case("exactly-ten", 11, "exactly-ten")]
    #[case("a rather long title that overflows", 12, "a rather ...")]
    fn truncate_respects_limit(#[case] text: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(truncate(text, max), expected);
    }

    #[test]
    fn wrap_breaks_at_spaces() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn wrap_preserves_blank_lines() {
        let lines = wrap("first\n\nsecond", 20);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn wrap_normalises_carriage_returns() {
        let lines = wrap("a\r\nb\rc", 20);
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn wrap_hard_breaks_unbroken_words() {
        let lines = wrap("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }
}
