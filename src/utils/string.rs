const QUOTE_DELIMITERS: [char; 3] = ['"', '\'', '`'];

pub fn unquote_string(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2
        && QUOTE_DELIMITERS
            .iter()
            .any(|&q| s.starts_with(q) && s.ends_with(q))
    {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

/// Unquotes a literal and drops any string delimiter left inside it, so the
/// result is always safe to use as a name segment.
pub fn strip_delimiters(s: &str) -> String {
    unquote_string(s)
        .chars()
        .filter(|c| *c != '"' && *c != '`')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_double_quotes() {
        assert_eq!(unquote_string("\"hello\""), "hello");
    }

    #[test]
    fn test_unquote_single_quotes() {
        assert_eq!(unquote_string("'h'"), "h");
    }

    #[test]
    fn test_unquote_backticks() {
        assert_eq!(unquote_string("`hello`"), "hello");
    }

    #[test]
    fn test_unquote_no_quotes() {
        assert_eq!(unquote_string("42"), "42");
    }

    #[test]
    fn test_unquote_lone_quote() {
        assert_eq!(unquote_string("\""), "\"");
    }

    #[test]
    fn test_strip_keeps_inner_spaces() {
        assert_eq!(strip_delimiters("\"Case A\""), "Case A");
    }

    #[test]
    fn test_strip_removes_escaped_quotes() {
        assert_eq!(strip_delimiters(r#""say \"hi\"""#), r"say \hi\");
    }
}
