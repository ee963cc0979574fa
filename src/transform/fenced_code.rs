//! Fenced code block transform (collaborator default).
//!
//! Runs before list recursion in the loose-item pipeline so fence contents
//! are stashed away before any marker lines inside them can be misread.

use crate::config::Config;
use crate::context::Context;
use crate::transform::utils::encode_code;

pub fn transform(text: &str, _config: &Config, ctx: &mut Context) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < lines.len() {
        if let Some((fence_char, fence_len, info)) = fence_open(lines[i]) {
            let mut j = i + 1;
            let mut code = String::new();
            let mut closed = false;
            while j < lines.len() {
                if fence_close(lines[j], fence_char, fence_len) {
                    closed = true;
                    break;
                }
                code.push_str(lines[j]);
                j += 1;
            }
            if closed {
                let class = if info.is_empty() {
                    String::new()
                } else {
                    format!(" class=\"{info} language-{info}\"")
                };
                let code = encode_code(code.trim_end_matches('\n'));
                let html = format!("<pre><code{class}>{code}\n</code></pre>");
                out.push_str(&ctx.opaque.stash_block(html));
                i = j + 1;
                continue;
            }
        }
        out.push_str(lines[i]);
        i += 1;
    }
    out
}

fn fence_open(line: &str) -> Option<(u8, usize, &str)> {
    let content = line.strip_suffix('\n').unwrap_or(line);
    let indent = content.bytes().take_while(|&b| b == b' ').count();
    if indent > 3 {
        return None;
    }
    let rest = &content[indent..];
    let fence_char = match rest.bytes().next()? {
        c @ (b'`' | b'~') => c,
        _ => return None,
    };
    let fence_len = rest.bytes().take_while(|&b| b == fence_char).count();
    if fence_len < 3 {
        return None;
    }
    let info = rest[fence_len..].trim();
    // An info string with backticks would be ambiguous with an inline span.
    if fence_char == b'`' && info.contains('`') {
        return None;
    }
    Some((fence_char, fence_len, info))
}

fn fence_close(line: &str, fence_char: u8, fence_len: usize) -> bool {
    let content = line.strip_suffix('\n').unwrap_or(line).trim_start_matches(' ');
    let run = content.bytes().take_while(|&b| b == fence_char).count();
    run >= fence_len && content[run..].trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stashes_fence_contents() {
        let mut ctx = Context::new();
        let out = transform("```\n- not a list\n```\n", &Config::default(), &mut ctx);
        assert!(!out.contains("not a list"));
        assert_eq!(
            ctx.opaque.resolve(&out).trim_matches('\n'),
            "<pre><code>- not a list\n</code></pre>"
        );
    }

    #[test]
    fn info_string_becomes_language_class() {
        let mut ctx = Context::new();
        let out = transform("```rust\nlet x = 1;\n```\n", &Config::default(), &mut ctx);
        assert!(
            ctx.opaque
                .resolve(&out)
                .contains("<code class=\"rust language-rust\">")
        );
    }

    #[test]
    fn unclosed_fence_passes_through() {
        let mut ctx = Context::new();
        let text = "```\ndangling\n";
        assert_eq!(transform(text, &Config::default(), &mut ctx), text);
    }

    #[test]
    fn code_is_escaped() {
        let mut ctx = Context::new();
        let out = transform("```\na < b\n```\n", &Config::default(), &mut ctx);
        assert!(ctx.opaque.resolve(&out).contains("a &lt; b"));
    }
}
