//! Raw HTML block protection (collaborator default).
//!
//! Runs of lines opening with a block-level tag are stashed verbatim so later
//! stages (blank-line collapsing, paragraph wrapping) leave them alone.
//! Inline elements such as `<input>` or `<em>` stay in the text.

use crate::config::Config;
use crate::context::Context;

const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "details",
    "div",
    "dl",
    "fieldset",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "ul",
];

pub fn transform(text: &str, _config: &Config, ctx: &mut Context) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < lines.len() {
        if !opens_block_tag(lines[i]) {
            out.push_str(lines[i]);
            i += 1;
            continue;
        }
        let mut block = String::new();
        while i < lines.len() && !lines[i].trim().is_empty() {
            block.push_str(lines[i]);
            i += 1;
        }
        let block = block.trim_end_matches('\n').to_string();
        out.push_str(&ctx.opaque.stash_block(block));
    }
    out
}

/// A line whose first token is an opening or closing block-level tag,
/// indented at most three spaces.
fn opens_block_tag(line: &str) -> bool {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    if indent > 3 {
        return false;
    }
    let Some(rest) = line[indent..].strip_prefix('<') else {
        return false;
    };
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let name_len = rest
        .bytes()
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    if name_len == 0 {
        return false;
    }
    let name = rest[..name_len].to_ascii_lowercase();
    let delimited = matches!(
        rest.as_bytes().get(name_len),
        None | Some(b'>' | b' ' | b'\t' | b'\n' | b'/')
    );
    delimited && BLOCK_TAGS.contains(&name.as_str())
}
