//! Out-of-band protection for already-rendered HTML fragments.
//!
//! Rendered blocks (headings, code blocks, raw HTML, ...) are stashed in an
//! [`OpaqueStore`] and replaced in the working text by a placeholder built
//! around an out-of-band control character. Placeholders survive paragraph
//! splitting and span rendering untouched and are resolved back into their
//! content at the end of paragraph wrapping.

use std::sync::LazyLock;

use regex::Regex;

/// Control character used for all out-of-band markers. U+001A never occurs in
/// well-formed document text, which is what makes the markers unambiguous.
pub(crate) const MARK: char = '\u{1A}';

/// End-of-input anchor appended to working text and stripped before return.
pub(crate) const SENTINEL: &str = "\u{1A}0";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{1A}K(\\d+)K").expect("valid placeholder pattern"));

// Blank-line padding added by `stash_block` is swallowed on resolution; the
// stored content supplies its own block separation.
static PLACEHOLDER_PADDED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?:\n\n)?\u{1A}K(\\d+)K(?:\n\n)?").expect("valid placeholder pattern")
});

/// Indexed store of pre-rendered blocks, addressed by placeholder.
#[derive(Debug, Default)]
pub struct OpaqueStore {
    blocks: Vec<String>,
}

impl OpaqueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stash `html` and return its placeholder token.
    pub fn stash(&mut self, html: impl Into<String>) -> String {
        self.blocks.push(html.into());
        format!("{MARK}K{}K", self.blocks.len() - 1)
    }

    /// Stash `html` as a block: the placeholder is padded with blank lines so
    /// it travels through blank-line splitting as its own paragraph.
    pub fn stash_block(&mut self, html: impl Into<String>) -> String {
        let placeholder = self.stash(html);
        format!("\n\n{placeholder}\n\n")
    }

    /// Whether `text` contains at least one placeholder.
    pub fn contains_placeholder(text: &str) -> bool {
        PLACEHOLDER.is_match(text)
    }

    /// Replace every placeholder in `text` with its stored content, together
    /// with any blank-line padding around it. Stored content may itself
    /// contain placeholders, so resolution repeats until the text is stable.
    /// Unknown indices are left in place.
    pub fn resolve(&self, text: &str) -> String {
        let mut out = text.to_string();
        loop {
            let next = PLACEHOLDER_PADDED
                .replace_all(&out, |caps: &regex::Captures| {
                    let index: usize = caps[1].parse().unwrap_or(usize::MAX);
                    match self.blocks.get(index) {
                        Some(block) => block.clone(),
                        None => caps[0].to_string(),
                    }
                })
                .into_owned();
            let stable = next == out;
            out = next;
            if stable || !PLACEHOLDER.is_match(&out) {
                return out;
            }
        }
    }
}
