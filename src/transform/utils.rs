//! Shared utilities for block transforms.

/// Remove one level of indentation (one tab or up to four spaces) from every
/// line.
pub(crate) fn outdent(text: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| {
            if let Some(rest) = line.strip_prefix('\t') {
                rest
            } else {
                let spaces = line.bytes().take_while(|&b| b == b' ').count().min(4);
                &line[spaces..]
            }
        })
        .collect()
}

/// Collapse every run of three or more newlines to a single blank line.
pub(crate) fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push(ch);
            }
        } else {
            newlines = 0;
            out.push(ch);
        }
    }
    out
}

/// Collapse two or more trailing newlines to exactly one.
pub(crate) fn collapse_trailing_newlines(text: &str) -> String {
    let trimmed = text.trim_end_matches('\n');
    if text.len() - trimmed.len() >= 2 {
        format!("{trimmed}\n")
    } else {
        text.to_string()
    }
}

/// Escape text for inclusion inside `<code>`.
pub(crate) fn encode_code(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outdent_strips_one_level() {
        assert_eq!(outdent("    a\n\tb\n  c\nd\n"), "a\nb\nc\nd\n");
        assert_eq!(outdent("        deep\n"), "    deep\n");
    }

    #[test]
    fn collapse_blank_runs_keeps_single_blank() {
        assert_eq!(collapse_blank_runs("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_runs("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_runs("a\nb"), "a\nb");
    }

    #[test]
    fn collapse_trailing_newlines_to_one() {
        assert_eq!(collapse_trailing_newlines("a\n\n\n"), "a\n");
        assert_eq!(collapse_trailing_newlines("a\n"), "a\n");
        assert_eq!(collapse_trailing_newlines("a"), "a");
    }

    #[test]
    fn encode_code_escapes_html() {
        assert_eq!(encode_code("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }
}
