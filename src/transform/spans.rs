//! Span-level rendering hook point.
//!
//! Inline markup (emphasis, links, code spans) belongs to the embedding
//! pipeline; the default keeps item text verbatim so the list transformer can
//! run standalone.

use crate::config::Config;
use crate::context::Context;

pub fn transform(text: &str, _config: &Config, _ctx: &mut Context) -> String {
    text.to_string()
}
