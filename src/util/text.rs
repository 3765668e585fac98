/// Collapses every run of whitespace (spaces, tabs, line breaks, vertical
/// tabs, form feeds) into a single ASCII space.
///
/// Leading and trailing runs are collapsed too, not removed.
///
/// # Examples
///
/// ```
/// use syndfeed::util::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("a  bc"), "a bc");
/// assert_eq!(collapse_whitespace("a\t\r\n\x0B\x0Cbc"), "a bc");
/// ```
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Returns `Some(s)` unless `s` is empty or whitespace only.
pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_double_space() {
        assert_eq!(collapse_whitespace("a  bc"), "a bc");
    }

    #[test]
    fn test_collapse_mixed_control_whitespace() {
        assert_eq!(collapse_whitespace("a\t\r\n\x0B\x0Cbc"), "a bc");
    }

    #[test]
    fn test_collapse_keeps_single_spaces() {
        assert_eq!(collapse_whitespace("06 Jul 2017"), "06 Jul 2017");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_collapse_edges() {
        assert_eq!(collapse_whitespace("\t\tx\n"), " x ");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("x")), Some("x"));
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
    }
}
