//! Extension hooks around the list transformer's stages.
//!
//! Each stage (run capture, item capture, checkbox capture) has a before/after
//! pair. Before-hooks receive the stage's intermediate capture and may either
//! return literal output that replaces the stage's default logic outright, or
//! mutate the capture in place for default logic to consume. After-hooks
//! receive the stage's final markup and may rewrite it.
//!
//! Hook-supplied output is honored only when non-empty; an empty return is
//! treated the same as `None` and default logic proceeds with the (possibly
//! mutated) capture.

use crate::attributes::AttributeList;
use crate::transform::lists::ListKind;

/// Intermediate state for one same-typed list run, before its container
/// markup is produced.
#[derive(Debug)]
pub struct RunCapture {
    /// Marker kind the container will be emitted under.
    pub kind: ListKind,
    /// Raw text of the run (item lines, still unsegmented).
    pub text: String,
    /// Attributes for the container's opening tag (e.g. `start`).
    pub attributes: AttributeList,
}

/// Intermediate state for one segmented list item, before default rendering.
#[derive(Debug)]
pub struct ItemCapture {
    /// Outdented item body. Task-list checkbox replacement (when enabled) has
    /// already been applied.
    pub body: String,
    /// A blank line preceded this item in its run.
    pub leading_blank: bool,
    /// Attributes for the `<li>` opening tag.
    pub attributes: AttributeList,
}

/// Intermediate state for one task-list checkbox, before the input element is
/// produced.
#[derive(Debug)]
pub struct CheckboxCapture {
    pub checked: bool,
    /// Attributes for the `<input>` opening tag, in output order.
    pub attributes: AttributeList,
}

/// Hooks raised around run-container emission.
pub trait RunStage {
    fn before(&mut self, capture: &mut RunCapture) -> Option<String> {
        let _ = capture;
        None
    }
    fn after(&mut self, html: &str) -> Option<String> {
        let _ = html;
        None
    }
}

/// Hooks raised around item emission.
pub trait ItemStage {
    fn before(&mut self, capture: &mut ItemCapture) -> Option<String> {
        let _ = capture;
        None
    }
    fn after(&mut self, html: &str) -> Option<String> {
        let _ = html;
        None
    }
}

/// Hooks raised around checkbox emission.
pub trait CheckboxStage {
    fn before(&mut self, capture: &mut CheckboxCapture) -> Option<String> {
        let _ = capture;
        None
    }
    fn after(&mut self, html: &str) -> Option<String> {
        let _ = html;
        None
    }
}

/// Per-stage hook registries, invoked in registration order.
#[derive(Default)]
pub struct HookSet {
    run: Vec<Box<dyn RunStage>>,
    item: Vec<Box<dyn ItemStage>>,
    checkbox: Vec<Box<dyn CheckboxStage>>,
}

impl HookSet {
    pub fn register_run(&mut self, hook: Box<dyn RunStage>) {
        self.run.push(hook);
    }

    pub fn register_item(&mut self, hook: Box<dyn ItemStage>) {
        self.item.push(hook);
    }

    pub fn register_checkbox(&mut self, hook: Box<dyn CheckboxStage>) {
        self.checkbox.push(hook);
    }

    pub(crate) fn before_run(&mut self, capture: &mut RunCapture) -> Option<String> {
        for hook in &mut self.run {
            if let Some(out) = hook.before(capture)
                && !out.is_empty()
            {
                return Some(out);
            }
        }
        None
    }

    pub(crate) fn after_run(&mut self, mut html: String) -> String {
        for hook in &mut self.run {
            if let Some(out) = hook.after(&html)
                && !out.is_empty()
            {
                html = out;
            }
        }
        html
    }

    pub(crate) fn before_item(&mut self, capture: &mut ItemCapture) -> Option<String> {
        for hook in &mut self.item {
            if let Some(out) = hook.before(capture)
                && !out.is_empty()
            {
                return Some(out);
            }
        }
        None
    }

    pub(crate) fn after_item(&mut self, mut html: String) -> String {
        for hook in &mut self.item {
            if let Some(out) = hook.after(&html)
                && !out.is_empty()
            {
                html = out;
            }
        }
        html
    }

    pub(crate) fn before_checkbox(&mut self, capture: &mut CheckboxCapture) -> Option<String> {
        for hook in &mut self.checkbox {
            if let Some(out) = hook.before(capture)
                && !out.is_empty()
            {
                return Some(out);
            }
        }
        None
    }

    pub(crate) fn after_checkbox(&mut self, mut html: String) -> String {
        for hook in &mut self.checkbox {
            if let Some(out) = hook.after(&html)
                && !out.is_empty()
            {
                html = out;
            }
        }
        html
    }
}
