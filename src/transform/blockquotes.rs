//! Blockquote transform (collaborator default).

use crate::config::Config;
use crate::context::Context;

pub fn transform(text: &str, config: &Config, ctx: &mut Context) -> String {
    let mut out = String::with_capacity(text.len());
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut i = 0;
    while i < lines.len() {
        if quote_tail(lines[i]).is_none() {
            out.push_str(lines[i]);
            i += 1;
            continue;
        }
        let mut inner = String::new();
        while i < lines.len()
            && let Some(tail) = quote_tail(lines[i])
        {
            inner.push_str(tail);
            i += 1;
        }
        let paragraphs = ctx.siblings.paragraphs;
        let inner = paragraphs(&inner, config, ctx);
        let html = format!("<blockquote>\n{inner}\n</blockquote>");
        out.push_str(&ctx.opaque.stash_block(html));
    }
    out
}

/// The content after a `>` marker indented at most three spaces, with one
/// optional space after the marker consumed.
fn quote_tail(line: &str) -> Option<&str> {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    if indent > 3 {
        return None;
    }
    let tail = line[indent..].strip_prefix('>')?;
    Some(tail.strip_prefix(' ').unwrap_or(tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markers_and_wraps() {
        let mut ctx = Context::new();
        let out = transform("> quoted\n> text\n", &Config::default(), &mut ctx);
        let resolved = ctx.opaque.resolve(&out);
        assert_eq!(
            resolved.trim_matches('\n'),
            "<blockquote>\n<p>quoted\ntext</p>\n</blockquote>"
        );
    }

    #[test]
    fn non_quote_lines_pass_through() {
        let mut ctx = Context::new();
        assert_eq!(
            transform("plain text\n", &Config::default(), &mut ctx),
            "plain text\n"
        );
    }
}
