//! ATX heading transform (collaborator default).

use crate::config::Config;
use crate::context::Context;

pub fn transform(text: &str, config: &Config, ctx: &mut Context) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        if let Some((level, title)) = atx_heading(content) {
            let spans = ctx.siblings.spans;
            let title = spans(title, config, ctx);
            let html = format!("<h{level}>{title}</h{level}>");
            out.push_str(&ctx.opaque.stash_block(html));
        } else {
            out.push_str(line);
        }
    }
    out
}

/// `#` through `######` after at most three spaces of indentation, with
/// whitespace (or nothing) after the hashes. Trailing hash runs are stripped
/// from the title.
pub(crate) fn atx_heading(line: &str) -> Option<(usize, &str)> {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let hashes = rest.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let after = &rest[hashes..];
    if !(after.is_empty() || after.starts_with(' ') || after.starts_with('\t')) {
        return None;
    }
    let title = after.trim().trim_end_matches('#').trim_end();
    Some((hashes, title))
}
