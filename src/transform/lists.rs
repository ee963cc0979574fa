//! The list transformer.
//!
//! Scans a text fragment for blocks of consecutive list-marker lines, splits
//! each block into same-typed runs, segments runs into items and renders each
//! item body through the sibling transforms. The scanner is line-oriented:
//! block and item boundaries are decided by classifying physical lines rather
//! than by one large pattern, which keeps the boundary rules (top-level vs
//! nested, strict vs legacy sub-list indentation) explicit.
//!
//! Working text is suffixed with an end-of-input sentinel so every boundary
//! decision sees "next line or end" uniformly; all sentinels are stripped
//! before returning.

use crate::attributes::AttributeList;
use crate::config::Config;
use crate::context::Context;
use crate::hooks::{ItemCapture, RunCapture};
use crate::opaque::SENTINEL;
use crate::transform::headings::atx_heading;
use crate::transform::task_lists;
use crate::transform::utils::{collapse_blank_runs, collapse_trailing_newlines, outdent};

/// Guard prefix protecting an item body's own leading marker token from being
/// re-read as a nested list of empty items. Removed after recursion.
const ESCAPE_MARK: &str = "\u{1A}A";

/// The two marker families a list run can be typed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `*`, `+` or `-` markers, rendered as `<ul>`.
    Bullet,
    /// `<digits>.` markers, rendered as `<ol>`.
    Ordinal,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Ordinal => "ol",
        }
    }

    pub fn flip(self) -> Self {
        match self {
            ListKind::Bullet => ListKind::Ordinal,
            ListKind::Ordinal => ListKind::Bullet,
        }
    }
}

/// A line that opens a list item: optional indentation, a marker token, then
/// at least one space or tab before the body.
struct MarkerLine<'a> {
    indent: &'a str,
    kind: ListKind,
    /// Offset within the line of the first body character, past the marker
    /// and the whole run of whitespace after it.
    content_offset: usize,
}

fn marker_line(line: &str) -> Option<MarkerLine<'_>> {
    let indent_len = line.bytes().take_while(|&b| b == b' ').count();
    let rest = &line[indent_len..];
    let (marker_len, kind) = match rest.bytes().next()? {
        b'*' | b'+' | b'-' => (1, ListKind::Bullet),
        b'0'..=b'9' => {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if !rest[digits..].starts_with('.') {
                return None;
            }
            (digits + 1, ListKind::Ordinal)
        }
        _ => return None,
    };
    let after = &rest[marker_len..];
    let spaces = after
        .bytes()
        .take_while(|&b| b == b' ' || b == b'\t')
        .count();
    if spaces == 0 {
        return None;
    }
    Some(MarkerLine {
        indent: &line[..indent_len],
        kind,
        content_offset: indent_len + marker_len + spaces,
    })
}

fn line_end(s: &str, from: usize) -> usize {
    s[from..].find('\n').map_or(s.len(), |k| from + k)
}

/// Transform every list block in `text` into container markup, leaving
/// non-list text untouched.
///
/// At depth zero a block must sit at the start of the fragment or after a
/// blank line; inside an item (depth above zero) any marker line opens a
/// block.
pub fn transform(text: &str, config: &Config, ctx: &mut Context) -> String {
    let nested = ctx.depth() > 0;
    let mut work = String::with_capacity(text.len() + SENTINEL.len());
    work.push_str(text);
    work.push_str(SENTINEL);

    let mut out = String::with_capacity(work.len());
    let mut pos = 0;
    while pos < work.len() {
        let Some((prefix_start, start, kind)) = find_block_start(&work, pos, nested) else {
            out.push_str(&work[pos..]);
            break;
        };
        out.push_str(&work[pos..prefix_start]);
        let end = scan_block_end(&work, start);
        log::debug!(
            "list block ({:?}) at {start}..{end}, depth {}",
            kind,
            ctx.depth()
        );
        out.push_str(&render_consecutive(&work[start..end], kind, nested, config, ctx));
        pos = end;
    }
    out.replace(SENTINEL, "")
}

/// Locate the next eligible marker line at or after `pos`. Returns the offset
/// where copying of preceding text stops (blank-line prefixes are consumed at
/// top level), the block start, and the marker kind of its first line.
fn find_block_start(work: &str, pos: usize, nested: bool) -> Option<(usize, usize, ListKind)> {
    let mut p = pos;
    loop {
        let end = line_end(work, p);
        if let Some(ml) = marker_line(&work[p..end])
            && ml.indent.len() <= 3
        {
            if nested {
                return Some((p, p, ml.kind));
            }
            if p == 0 {
                return Some((0, 0, ml.kind));
            }
            // Byte comparison: two bytes back may land inside a multibyte
            // character, where slicing the str would panic.
            if p >= 2 && &work.as_bytes()[p - 2..p] == b"\n\n" {
                return Some((p - 2, p, ml.kind));
            }
            if p == 1 && work.starts_with('\n') {
                return Some((0, p, ml.kind));
            }
        }
        if end >= work.len() {
            return None;
        }
        p = end + 1;
    }
}

/// Walk lines from `start` until the block's end: the sentinel or end of
/// input, or a run of two or more newlines followed by flush non-whitespace
/// text that is not itself a marker line. The trailing newline run belongs to
/// the block.
fn scan_block_end(work: &str, start: usize) -> usize {
    let mut p = start;
    loop {
        let end = line_end(work, p);
        if end >= work.len() {
            return work.len();
        }
        let mut j = end;
        while work.as_bytes().get(j) == Some(&b'\n') {
            j += 1;
        }
        if work[j..].starts_with(SENTINEL) || j >= work.len() {
            return j;
        }
        if j - end >= 2 {
            let next = &work[j..line_end(work, j)];
            let flush = next
                .chars()
                .next()
                .is_some_and(|c| c != ' ' && c != '\t');
            if flush && marker_line(next).is_none() {
                return j;
            }
        }
        p = j;
    }
}

/// Split a block into same-typed runs at each opposite-kind marker line and
/// render each run as its own container.
fn render_consecutive(
    block: &str,
    kind: ListKind,
    trim_trailing: bool,
    config: &Config,
    ctx: &mut Context,
) -> String {
    let mut out = String::new();
    let mut kind = kind;
    let mut rest = block;
    loop {
        match find_opposite(rest, kind, config.legacy_sublist_indentation) {
            Some(split) => {
                log::debug!("consecutive {:?} list splits at offset {split}", kind);
                out.push_str(&render_run(&rest[..split], kind, trim_trailing, config, ctx));
                kind = kind.flip();
                rest = &rest[split..];
            }
            None => {
                out.push_str(&render_run(rest, kind, trim_trailing, config, ctx));
                return out;
            }
        }
    }
}

/// Offset of the first line in `block` opening an item of the opposite kind.
/// Under the legacy indentation policy only flush (at most one space) marker
/// lines count; otherwise up to three spaces of indentation do.
fn find_opposite(block: &str, kind: ListKind, legacy: bool) -> Option<usize> {
    let max_indent = if legacy { 1 } else { 3 };
    let mut p = 0;
    loop {
        let end = line_end(block, p);
        if let Some(ml) = marker_line(&block[p..end])
            && ml.indent.len() <= max_indent
            && ml.kind != kind
        {
            return Some(p);
        }
        if end >= block.len() {
            return None;
        }
        p = end + 1;
    }
}

fn render_run(
    run: &str,
    kind: ListKind,
    trim_trailing: bool,
    config: &Config,
    ctx: &mut Context,
) -> String {
    let mut attributes = AttributeList::new();
    if kind == ListKind::Ordinal
        && let Some(start) = start_number(run)
        && start != "1"
    {
        attributes.set("start", start);
    }

    let mut capture = RunCapture {
        kind,
        text: run.to_string(),
        attributes,
    };
    if let Some(literal) = ctx.hooks.before_run(&mut capture) {
        return ctx.hooks.after_run(literal);
    }

    let items = process_list_items(&capture.text, trim_trailing, config, ctx);
    let tag = capture.kind.tag();
    let html = format!("\n\n<{tag}{}>\n{items}</{tag}>\n", capture.attributes.render());
    ctx.hooks.after_run(html)
}

/// The first ordinal marker's digits, when the run opens with one.
fn start_number(run: &str) -> Option<&str> {
    let trimmed = run.trim_start_matches(' ');
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    (digits > 0 && trimmed[digits..].starts_with('.')).then(|| &trimmed[..digits])
}

/// Segment one same-typed run into items and render each.
///
/// `trim_trailing` is set for nested runs, whose container markup supplies
/// its own separation from the surrounding item body.
fn process_list_items(run: &str, trim_trailing: bool, config: &Config, ctx: &mut Context) -> String {
    ctx.with_nested(|ctx| {
        let mut work = collapse_trailing_newlines(run);
        work.push_str(SENTINEL);
        let is_paragraphed = has_internal_blank(&work);
        log::debug!(
            "segmenting run at depth {}, paragraphed: {is_paragraphed}",
            ctx.depth()
        );

        let mut out = String::new();
        for segment in segment_items(&work, config.legacy_sublist_indentation) {
            match segment {
                Segment::Gap(text) => out.push_str(text),
                Segment::Item(span) => {
                    out.push_str(&render_item(&span, is_paragraphed, config, ctx));
                }
            }
        }

        let mut out = out.replace(SENTINEL, "");
        if trim_trailing {
            out.truncate(out.trim_end().len());
        }
        out
    })
}

/// A blank line (possibly whitespace-only) between two content lines, not
/// counting the one just before the sentinel.
fn has_internal_blank(work: &str) -> bool {
    let bytes = work.as_bytes();
    let mut i = 0;
    while let Some(k) = work[i..].find('\n') {
        let at = i + k;
        let mut j = at + 1;
        while bytes.get(j).is_some_and(|&b| b == b' ' || b == b'\t') {
            j += 1;
        }
        if bytes.get(j) == Some(&b'\n') && !work[j + 1..].starts_with(SENTINEL) {
            return true;
        }
        i = at + 1;
    }
    false
}

enum Segment<'a> {
    Item(ItemSpan<'a>),
    Gap(&'a str),
}

struct ItemSpan<'a> {
    /// An unconsumed newline sat right before this item's marker line.
    leading_blank: bool,
    /// Raw body: everything past the marker and its trailing whitespace, up
    /// to and including the consumed newline run.
    body: &'a str,
}

fn segment_items(work: &str, legacy: bool) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut pos = 0;
    while pos < work.len() {
        let Some((start, ml)) = next_item_start(work, pos) else {
            segments.push(Segment::Gap(&work[pos..]));
            break;
        };
        // One newline before the marker is consumed as the blank-line signal;
        // anything earlier passes through untouched.
        let leading_blank = start > pos;
        if start > pos + 1 {
            segments.push(Segment::Gap(&work[pos..start - 1]));
        }
        let body_start = start + ml.content_offset;
        let body_end = scan_item_end(work, body_start, ml.indent, legacy);
        segments.push(Segment::Item(ItemSpan {
            leading_blank,
            body: &work[body_start..body_end],
        }));
        pos = body_end;
    }
    segments
}

fn next_item_start(work: &str, pos: usize) -> Option<(usize, MarkerLine<'_>)> {
    let mut p = pos;
    loop {
        let end = line_end(work, p);
        if let Some(ml) = marker_line(&work[p..end])
            && ml.indent.len() <= 3
        {
            return Some((p, ml));
        }
        if end >= work.len() {
            return None;
        }
        p = end + 1;
    }
}

/// Extend an item body line by line until a boundary: a newline run after
/// which the sentinel or another item's marker line follows. One or two of
/// the run's newlines are consumed into the body (up to three when the body
/// would otherwise be empty); unconsumed newlines stay for the next item's
/// blank-line signal.
fn scan_item_end(work: &str, body_start: usize, indent: &str, legacy: bool) -> usize {
    let mut cursor = body_start;
    loop {
        let end = line_end(work, cursor);
        if end >= work.len() {
            return work.len();
        }
        let mut nl = 0;
        while work.as_bytes().get(end + nl) == Some(&b'\n') {
            nl += 1;
        }
        let next_pos = end + nl;
        if item_boundary_at(work, next_pos, indent, legacy) {
            let take = if end > body_start {
                nl.min(2)
            } else if nl >= 2 {
                nl.min(3)
            } else {
                0
            };
            if take > 0 {
                return end + take;
            }
        }
        if next_pos >= work.len() {
            return work.len();
        }
        cursor = next_pos;
    }
}

fn item_boundary_at(work: &str, pos: usize, indent: &str, legacy: bool) -> bool {
    if pos >= work.len() || work[pos..].starts_with(SENTINEL) {
        return true;
    }
    let line = &work[pos..line_end(work, pos)];
    if legacy {
        // The next marker's leading whitespace must exactly reproduce the
        // current item's indentation; a deeper marker stays inside the body.
        match line.strip_prefix(indent) {
            Some(tail) => matches!(marker_line(tail), Some(ml) if ml.indent.is_empty()),
            None => false,
        }
    } else {
        matches!(marker_line(line), Some(ml) if ml.indent.len() <= 3)
    }
}

fn render_item(
    span: &ItemSpan<'_>,
    is_paragraphed: bool,
    config: &Config,
    ctx: &mut Context,
) -> String {
    let mut body = outdent(span.body);
    let mut attributes = AttributeList::new();

    if config.task_lists
        && let Some(checked) = leading_checkbox(span.body)
    {
        let mut class = String::from("task-list-item");
        if config.enhanced_styling && checked {
            class.push_str(" task-list-item-complete");
        }
        attributes.set("class", class);
        attributes.set("style", "list-style-type: none;");
        body = task_lists::transform(&body, checked, config, ctx);
    }

    let mut capture = ItemCapture {
        body,
        leading_blank: span.leading_blank,
        attributes,
    };
    let html = match ctx.hooks.before_item(&mut capture) {
        Some(literal) => literal,
        None => {
            let mut item = capture.body;
            if starts_with_marker_token(&item) {
                item.insert_str(0, ESCAPE_MARK);
            }
            // A heading line directly followed by content needs a blank line
            // so both end up as blocks of their own.
            if heading_needs_break(&item)
                && let Some(nl) = item.find('\n')
            {
                item.insert(nl, '\n');
            }
            let loose = capture.leading_blank || item.contains("\n\n");
            let mut item = if loose {
                render_loose(item, config, ctx)
            } else {
                render_tight(item, is_paragraphed, config, ctx)
            };
            if let Some(at) = item.find(ESCAPE_MARK) {
                item.replace_range(at..at + ESCAPE_MARK.len(), "");
            }
            format!("<li{}>{item}</li>\n", capture.attributes.render())
        }
    };
    ctx.hooks.after_item(html)
}

/// A loose item holds block content: the full sibling pipeline runs over it
/// and paragraph wrapping closes it out.
fn render_loose(body: String, config: &Config, ctx: &mut Context) -> String {
    let siblings = ctx.siblings;
    let mut item = (siblings.fenced_code_blocks)(&body, config, ctx);
    item = (siblings.blockquotes)(&item, config, ctx);
    item = (siblings.headings)(&item, config, ctx);
    item = transform(&item, config, ctx);
    item = (siblings.code_blocks)(&item, config, ctx);
    item = (siblings.tables)(&item, config, ctx);
    item = (siblings.html_blocks)(&item, config, ctx);
    (siblings.paragraphs)(&item, config, ctx)
}

/// A tight item only recurses into sub-lists; its text is span-rendered,
/// unless a blank line elsewhere in the run forces paragraph wrapping.
fn render_tight(body: String, is_paragraphed: bool, config: &Config, ctx: &mut Context) -> String {
    let siblings = ctx.siblings;
    let mut item = transform(&body, config, ctx);
    if item.ends_with('\n') {
        item.pop();
    }
    item = (siblings.html_blocks)(&item, config, ctx);
    item = collapse_blank_runs(&item);
    if is_paragraphed {
        (siblings.paragraphs)(&item, config, ctx)
    } else {
        (siblings.spans)(&item, config, ctx)
    }
}

/// A checkbox token (`[ ]`, `[x]`, `[X]` or bare `[]`) at the very start of a
/// raw item body.
fn leading_checkbox(body: &str) -> Option<bool> {
    let rest = body.strip_prefix('[')?;
    match rest.bytes().next()? {
        b']' => Some(false),
        b' ' => rest[1..].starts_with(']').then_some(false),
        b'x' | b'X' => rest[1..].starts_with(']').then_some(true),
        _ => None,
    }
}

fn starts_with_marker_token(item: &str) -> bool {
    let rest = match item.as_bytes().first() {
        Some(b'*' | b'+' | b'-') => &item[1..],
        Some(b) if b.is_ascii_digit() && item[1..].starts_with('.') => &item[2..],
        _ => return false,
    };
    rest.starts_with(' ') || rest.starts_with('\t')
}

fn heading_needs_break(item: &str) -> bool {
    let Some(nl) = item.find('\n') else {
        return false;
    };
    atx_heading(&item[..nl]).is_some_and(|(_, title)| !title.is_empty())
        && item[nl + 1..].starts_with(|c: char| c != '\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_line_recognizes_both_kinds() {
        assert_eq!(marker_line("- a").map(|m| m.kind), Some(ListKind::Bullet));
        assert_eq!(marker_line("* a").map(|m| m.kind), Some(ListKind::Bullet));
        assert_eq!(marker_line("+ a").map(|m| m.kind), Some(ListKind::Bullet));
        assert_eq!(marker_line("12. a").map(|m| m.kind), Some(ListKind::Ordinal));
        assert!(marker_line("-a").is_none());
        assert!(marker_line("1) a").is_none());
        assert!(marker_line("text").is_none());
    }

    #[test]
    fn marker_line_consumes_all_whitespace_after_marker() {
        let ml = marker_line("  -   body").unwrap();
        assert_eq!(ml.indent, "  ");
        assert_eq!(ml.content_offset, 6);
    }

    #[test]
    fn start_number_reads_first_ordinal() {
        assert_eq!(start_number("5. five\n6. six\n"), Some("5"));
        assert_eq!(start_number("  1. one\n"), Some("1"));
        assert_eq!(start_number("01. one\n"), Some("01"));
        assert_eq!(start_number("- a\n"), None);
    }

    #[test]
    fn find_opposite_respects_policy() {
        let block = "- a\n  1. b\n1. c\n";
        assert_eq!(find_opposite(block, ListKind::Bullet, false), Some(4));
        assert_eq!(find_opposite(block, ListKind::Bullet, true), Some(11));
        assert_eq!(find_opposite(block, ListKind::Ordinal, true), Some(0));
    }

    fn bodies(work: &str, legacy: bool) -> Vec<(bool, String)> {
        segment_items(work, legacy)
            .into_iter()
            .filter_map(|s| match s {
                Segment::Item(span) => Some((span.leading_blank, span.body.to_string())),
                Segment::Gap(_) => None,
            })
            .collect()
    }

    #[test]
    fn segments_tight_items() {
        let items = bodies("- a\n- b\n\u{1A}0", false);
        assert_eq!(items, vec![(false, "a\n".into()), (false, "b\n".into())]);
    }

    #[test]
    fn blank_separated_items_absorb_their_newlines() {
        let items = bodies("- a\n\n- b\n\u{1A}0", false);
        assert_eq!(items, vec![(false, "a\n\n".into()), (false, "b\n".into())]);
    }

    #[test]
    fn extra_blank_line_marks_the_next_item() {
        let items = bodies("- a\n\n\n- b\n\u{1A}0", false);
        assert_eq!(items, vec![(false, "a\n\n".into()), (true, "b\n".into())]);
    }

    #[test]
    fn shallow_indent_starts_sibling_under_strict_policy() {
        let items = bodies("- a\n  - b\n\u{1A}0", false);
        assert_eq!(items, vec![(false, "a\n".into()), (false, "b\n".into())]);
    }

    #[test]
    fn shallow_indent_stays_in_body_under_legacy_policy() {
        let items = bodies("- a\n  - b\n\u{1A}0", true);
        assert_eq!(items, vec![(false, "a\n  - b\n".into())]);
    }

    #[test]
    fn four_space_indent_stays_in_body_under_strict_policy() {
        let items = bodies("- a\n    - b\n\u{1A}0", false);
        assert_eq!(items, vec![(false, "a\n    - b\n".into())]);
    }

    #[test]
    fn continuation_lines_join_the_body() {
        let items = bodies("- a\n  more\n- b\n\u{1A}0", false);
        assert_eq!(
            items,
            vec![(false, "a\n  more\n".into()), (false, "b\n".into())]
        );
    }

    #[test]
    fn leading_checkbox_tokens() {
        assert_eq!(leading_checkbox("[ ] open\n"), Some(false));
        assert_eq!(leading_checkbox("[x] done\n"), Some(true));
        assert_eq!(leading_checkbox("[X] done\n"), Some(true));
        assert_eq!(leading_checkbox("[] open\n"), Some(false));
        assert_eq!(leading_checkbox("[y] nope\n"), None);
        assert_eq!(leading_checkbox("plain\n"), None);
    }

    #[test]
    fn marker_token_guard_detection() {
        assert!(starts_with_marker_token("- - a\n"));
        assert!(starts_with_marker_token("1. x\n"));
        assert!(!starts_with_marker_token("-a\n"));
        assert!(!starts_with_marker_token("12. x\n"));
        assert!(!starts_with_marker_token("plain\n"));
    }

    #[test]
    fn heading_break_detection() {
        assert!(heading_needs_break("# Head\ntext\n"));
        assert!(!heading_needs_break("# Head\n"));
        assert!(!heading_needs_break("# Head\n\ntext\n"));
        assert!(!heading_needs_break("plain\ntext\n"));
    }

    #[test]
    fn heading_break_only_for_recognized_headings() {
        assert!(!heading_needs_break("#tag\ntext\n"));
        assert!(!heading_needs_break("####### deep\ntext\n"));
        assert!(!heading_needs_break("#\ntext\n"));
    }

    #[test]
    fn internal_blank_detection() {
        assert!(has_internal_blank("a\n\nb\n\u{1A}0"));
        assert!(has_internal_blank("a\n \t\nb\n\u{1A}0"));
        assert!(!has_internal_blank("a\nb\n\u{1A}0"));
        assert!(!has_internal_blank("a\n\n\u{1A}0"));
    }

    #[test]
    fn block_scan_stops_at_flush_text_after_blank() {
        let work = "- a\n\ntext\n\u{1A}0";
        assert_eq!(scan_block_end(work, 0), 5);
        assert_eq!(&work[0..5], "- a\n\n");
    }

    #[test]
    fn block_scan_continues_over_marker_after_blank() {
        let work = "- a\n\n- b\n\u{1A}0";
        assert_eq!(scan_block_end(work, 0), work.len() - 2);
    }

    #[test]
    fn top_level_block_requires_preceding_blank() {
        assert!(find_block_start("text\n- a\n\u{1A}0", 0, false).is_none());
        let (prefix, start, _) = find_block_start("text\n\n- a\n\u{1A}0", 0, false).unwrap();
        assert_eq!((prefix, start), (4, 6));
    }

    #[test]
    fn multibyte_line_before_a_marker_does_not_panic() {
        assert!(find_block_start("é\n- a\n\u{1A}0", 0, false).is_none());
        let (prefix, start, _) = find_block_start("é\n\n- a\n\u{1A}0", 0, false).unwrap();
        assert_eq!((prefix, start), (2, 4));
    }

    #[test]
    fn nested_block_starts_at_any_marker_line() {
        let (prefix, start, _) = find_block_start("text\n- a\n\u{1A}0", 0, true).unwrap();
        assert_eq!((prefix, start), (5, 5));
    }
}
