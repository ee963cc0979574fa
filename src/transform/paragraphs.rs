//! Paragraph wrapping and placeholder resolution.
//!
//! Splits a fragment into paragraphs on blank lines, wraps each in `<p>`
//! (placeholder-only paragraphs pass through as the block they stand for)
//! and resolves every stashed block back into the output. This is the final
//! stage of the loose-item pipeline.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::context::Context;
use crate::opaque::OpaqueStore;

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid blank-run pattern"));

pub fn transform(text: &str, config: &Config, ctx: &mut Context) -> String {
    let trimmed = text.trim_matches('\n');
    let mut grafs = Vec::new();
    for graf in BLANK_RUN.split(trimmed) {
        if graf.trim().is_empty() {
            continue;
        }
        if OpaqueStore::contains_placeholder(graf) {
            grafs.push(graf.to_string());
        } else {
            let spans = ctx.siblings.spans;
            grafs.push(format!("<p>{}</p>", spans(graf, config, ctx)));
        }
    }
    ctx.opaque.resolve(&grafs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_each_paragraph() {
        let mut ctx = Context::new();
        let out = transform("a\n\nb\n\n\nc", &Config::default(), &mut ctx);
        assert_eq!(out, "<p>a</p>\n<p>b</p>\n<p>c</p>");
    }

    #[test]
    fn placeholder_paragraphs_resolve_to_their_block() {
        let mut ctx = Context::new();
        let stashed = ctx.opaque.stash_block("<h1>Title</h1>");
        let text = format!("before{stashed}after");
        let out = transform(&text, &Config::default(), &mut ctx);
        assert_eq!(out, "<p>before</p>\n<h1>Title</h1>\n<p>after</p>");
    }

    #[test]
    fn blank_input_produces_nothing() {
        let mut ctx = Context::new();
        assert_eq!(transform("\n\n  \n\n", &Config::default(), &mut ctx), "");
    }
}
