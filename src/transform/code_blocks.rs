//! Indented code block transform (collaborator default).

use crate::config::Config;
use crate::context::Context;
use crate::transform::utils::encode_code;

pub fn transform(text: &str, _config: &Config, ctx: &mut Context) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    let mut at_boundary = true;
    while i < lines.len() {
        if at_boundary && is_indented(lines[i]) {
            let mut code = String::new();
            let mut j = i;
            while j < lines.len() && (is_indented(lines[j]) || is_blank(lines[j])) {
                code.push_str(outdent_code_line(lines[j]));
                j += 1;
            }
            let code = encode_code(code.trim_matches('\n'));
            let html = format!("<pre><code>{code}\n</code></pre>");
            out.push_str(&ctx.opaque.stash_block(html));
            i = j;
            at_boundary = true;
            continue;
        }
        at_boundary = is_blank(lines[i]);
        out.push_str(lines[i]);
        i += 1;
    }
    out
}

fn is_indented(line: &str) -> bool {
    (line.starts_with("    ") || line.starts_with('\t')) && !is_blank(line)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn outdent_code_line(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix('\t') {
        rest
    } else if let Some(rest) = line.strip_prefix("    ") {
        rest
    } else {
        line
    }
}
