//! Block content inside list items flowing through the sibling transforms.

use enlist::{init_logger, transform_lists, transform_lists_with, Config, Context};
use similar_asserts::assert_eq;

#[test]
fn blockquote_inside_a_loose_item() {
    init_logger();
    assert_eq!(
        transform_lists("- > quoted\n\n- next", None),
        "<ul>\n<li><blockquote>\n<p>quoted</p>\n</blockquote></li>\n<li><p>next</p></li>\n</ul>"
    );
}

#[test]
fn fenced_code_inside_an_item() {
    init_logger();
    let html = transform_lists("- intro\n\n  ```\n  let x;\n  ```", None);
    assert!(html.contains("<p>intro</p>"), "missing paragraph in {html}");
    assert!(
        html.contains("<pre><code>let x;\n</code></pre>"),
        "missing code block in {html}"
    );
}

#[test]
fn stashed_fragments_pass_through_item_bodies() {
    init_logger();
    let mut ctx = Context::new();
    let placeholder = ctx.opaque.stash("<pre><code>- not a list\n</code></pre>");
    let input = format!("- intro\n\n  {placeholder}");
    let html = transform_lists_with(&input, &Config::default(), &mut ctx);
    assert_eq!(html.matches("<ul>").count(), 1);
    assert!(html.contains("<pre><code>- not a list\n</code></pre>"));
}

#[test]
fn indented_code_inside_an_item() {
    init_logger();
    let html = transform_lists("- intro\n\n        code", None);
    assert!(
        html.contains("<pre><code>code\n</code></pre>"),
        "missing code block in {html}"
    );
}

#[test]
fn table_inside_an_item() {
    init_logger();
    let html = transform_lists("- intro\n\n  | a | b |\n  |---|---|\n  | 1 | 2 |", None);
    assert!(html.contains("<table>"), "missing table in {html}");
    assert!(html.contains("<th>a</th>"));
    assert!(html.contains("<td>2</td>"));
}

#[test]
fn raw_html_block_inside_an_item_is_preserved() {
    init_logger();
    let html = transform_lists("- intro\n\n  <div>\n  x\n  </div>", None);
    assert!(html.contains("<div>\nx\n</div>"), "mangled html in {html}");
}

#[test]
fn sibling_transforms_are_replaceable() {
    init_logger();
    let mut ctx = Context::new();
    ctx.siblings.spans = |text, _config, _ctx| text.to_uppercase();
    assert_eq!(
        transform_lists_with("- a\n- b", &Config::default(), &mut ctx),
        "<ul>\n<li>A</li>\n<li>B</li>\n</ul>"
    );
}

#[test]
fn deeply_nested_lists() {
    init_logger();
    let mut ctx = Context::new();
    let html = transform_lists_with("- a\n    - b\n        - c", &Config::default(), &mut ctx);
    assert_eq!(html.matches("<ul").count(), 3);
    assert_eq!(html.matches("</ul>").count(), 3);
    assert!(html.contains("<li>c</li>"));
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn nested_ordered_inside_bullet() {
    init_logger();
    assert_eq!(
        transform_lists("- a\n    1. b", None),
        "<ul>\n<li>a<ol>\n<li>b</li></ol></li>\n</ul>"
    );
}
