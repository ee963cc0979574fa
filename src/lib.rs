//! List-block transformer for Markdown-to-HTML pipelines.
//!
//! Takes a text fragment, finds blocks of consecutive list-marker lines and
//! rewrites each into `<ul>`/`<ol>` container markup, recursing into item
//! bodies for nested lists and other block content. Everything outside list
//! blocks passes through untouched, so the transformer can run standalone or
//! as one stage of a larger pipeline.
//!
//! The embedding pipeline integrates through [`Context`]: sibling block
//! transforms are swappable function pointers ([`Siblings`]), pre-rendered
//! fragments travel as opaque placeholders ([`OpaqueStore`]) and the three
//! hook stages ([`RunStage`], [`ItemStage`], [`CheckboxStage`]) observe or
//! override run, item and checkbox emission.
//!
//! ```
//! use enlist::transform_lists;
//!
//! let html = transform_lists("- milk\n- eggs", None);
//! assert_eq!(html, "<ul>\n<li>milk</li>\n<li>eggs</li>\n</ul>");
//! ```

pub mod attributes;
pub mod config;
pub mod context;
pub mod hooks;
pub mod opaque;
pub mod transform;

pub use attributes::{Attribute, AttributeList};
pub use config::{Config, ConfigBuilder};
pub use context::{Context, Siblings, Transform};
pub use hooks::{
    CheckboxCapture, CheckboxStage, HookSet, ItemCapture, ItemStage, RunCapture, RunStage,
};
pub use opaque::OpaqueStore;
pub use transform::lists::ListKind;

/// Initialize logging for tests and examples. Safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn detect_line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Transform every list block in `input` with default sibling transforms and
/// no hooks. `config` falls back to [`Config::default`] when `None`.
pub fn transform_lists(input: &str, config: Option<Config>) -> String {
    let config = config.unwrap_or_default();
    let mut ctx = Context::new();
    transform_lists_with(input, &config, &mut ctx)
}

/// Like [`transform_lists`], with caller-supplied configuration and context
/// (hooks, sibling transforms, stashed fragments).
///
/// CRLF input is normalized to LF for processing and restored on output.
pub fn transform_lists_with(input: &str, config: &Config, ctx: &mut Context) -> String {
    let crlf = detect_line_ending(input) == "\r\n";
    let normalized = if crlf {
        input.replace("\r\n", "\n")
    } else {
        input.to_string()
    };
    // Blank-line padding lets a list at the fragment's very edge satisfy the
    // top-level boundary rules.
    let padded = format!("\n\n{normalized}\n\n");
    let out = transform::lists::transform(&padded, config, ctx);
    let out = ctx.opaque.resolve(&out);
    let out = out.trim_matches('\n').to_string();
    if crlf { out.replace('\n', "\r\n") } else { out }
}
