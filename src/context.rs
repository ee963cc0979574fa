//! Per-conversion state threaded through every transform call.

use crate::config::Config;
use crate::hooks::HookSet;
use crate::opaque::OpaqueStore;
use crate::transform;

/// Signature shared by every block-level transform: text in, HTML-ish text
/// out. All collaborators are pure text-to-text over the current fragment.
pub type Transform = fn(&str, &Config, &mut Context) -> String;

/// The sibling block transforms the item renderer recurses into. Defaults
/// point at this crate's own implementations; embedding pipelines replace
/// entries with their real transforms.
#[derive(Clone, Copy)]
pub struct Siblings {
    pub fenced_code_blocks: Transform,
    pub blockquotes: Transform,
    pub headings: Transform,
    pub code_blocks: Transform,
    pub tables: Transform,
    pub html_blocks: Transform,
    pub paragraphs: Transform,
    pub spans: Transform,
}

impl Default for Siblings {
    fn default() -> Self {
        Self {
            fenced_code_blocks: transform::fenced_code::transform,
            blockquotes: transform::blockquotes::transform,
            headings: transform::headings::transform,
            code_blocks: transform::code_blocks::transform,
            tables: transform::tables::transform,
            html_blocks: transform::html_blocks::transform,
            paragraphs: transform::paragraphs::transform,
            spans: transform::spans::transform,
        }
    }
}

/// Process-scoped state for one top-level conversion.
///
/// The nesting-depth counter selects between the top-level and nested
/// boundary patterns and must return to its entry value on every exit path of
/// item segmentation; [`Context::with_nested`] brackets entry and exit so
/// early returns (hooks included) cannot leak an unbalanced depth.
pub struct Context {
    depth: usize,
    pub opaque: OpaqueStore,
    pub hooks: HookSet,
    pub siblings: Siblings,
}

impl Context {
    pub fn new() -> Self {
        Self {
            depth: 0,
            opaque: OpaqueStore::new(),
            hooks: HookSet::default(),
            siblings: Siblings::default(),
        }
    }

    /// Number of list transforms currently recursively active.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run `f` with the nesting depth incremented, restoring it afterwards.
    pub(crate) fn with_nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
