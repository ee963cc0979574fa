//! Task-list checkbox rendering.
//!
//! Replaces the leading `[ ]` / `[x]` token of a task item body with a
//! disabled checkbox input. Attribute order is fixed (`type`, `disabled`,
//! `style`, `checked`) so output is stable for downstream styling and tests;
//! checkbox hooks may mutate the attributes or supply the element outright.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::attributes::AttributeList;
use crate::config::Config;
use crate::context::Context;
use crate::hooks::CheckboxCapture;

static CHECKBOX_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\[[xX ]?\]").expect("valid checkbox pattern"));

const CHECKBOX_STYLE: &str = "margin: 0px 0.35em 0.25em -1.6em; vertical-align: middle;";

/// Replace the first checkbox token in `body` with an `<input>` element.
pub fn transform(body: &str, checked: bool, _config: &Config, ctx: &mut Context) -> String {
    let mut attributes = AttributeList::new();
    attributes.set("type", "checkbox");
    attributes.set_flag("disabled");
    attributes.set("style", CHECKBOX_STYLE);
    if checked {
        attributes.set_flag("checked");
    }

    let mut capture = CheckboxCapture {
        checked,
        attributes,
    };
    let input = match ctx.hooks.before_checkbox(&mut capture) {
        Some(literal) => literal,
        None => format!("<input{}>", capture.attributes.render()),
    };
    let input = ctx.hooks.after_checkbox(input);
    CHECKBOX_TOKEN.replace(body, NoExpand(&input)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_unchecked_token() {
        let mut ctx = Context::new();
        let out = transform("[ ] write docs\n", false, &Config::default(), &mut ctx);
        assert_eq!(
            out,
            format!("<input type=\"checkbox\" disabled style=\"{CHECKBOX_STYLE}\"> write docs\n")
        );
    }

    #[test]
    fn checked_token_gets_checked_flag() {
        let mut ctx = Context::new();
        let out = transform("[x] ship\n", true, &Config::default(), &mut ctx);
        assert_eq!(
            out,
            format!(
                "<input type=\"checkbox\" disabled style=\"{CHECKBOX_STYLE}\" checked> ship\n"
            )
        );
    }

    #[test]
    fn only_the_first_token_is_replaced() {
        let mut ctx = Context::new();
        let out = transform("[ ] a [ ] b\n", false, &Config::default(), &mut ctx);
        assert_eq!(out.matches("<input").count(), 1);
        assert!(out.ends_with("a [ ] b\n"));
    }
}
