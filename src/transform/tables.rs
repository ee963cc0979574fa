//! Pipe table transform (collaborator default).

use crate::config::Config;
use crate::context::Context;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    None,
    Left,
    Center,
    Right,
}

impl Align {
    fn style(self) -> &'static str {
        match self {
            Align::None => "",
            Align::Left => " style=\"text-align:left;\"",
            Align::Center => " style=\"text-align:center;\"",
            Align::Right => " style=\"text-align:right;\"",
        }
    }
}

pub fn transform(text: &str, config: &Config, ctx: &mut Context) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < lines.len() {
        if i + 1 < lines.len()
            && lines[i].contains('|')
            && let Some(aligns) = separator_row(lines[i + 1])
        {
            let header = split_row(lines[i]);
            if header.len() == aligns.len() {
                let mut rows = Vec::new();
                let mut j = i + 2;
                while j < lines.len() && lines[j].contains('|') {
                    rows.push(split_row(lines[j]));
                    j += 1;
                }
                let html = render_table(&header, &aligns, &rows, config, ctx);
                out.push_str(&ctx.opaque.stash_block(html));
                i = j;
                continue;
            }
        }
        out.push_str(lines[i]);
        i += 1;
    }
    out
}

fn render_table(
    header: &[&str],
    aligns: &[Align],
    rows: &[Vec<&str>],
    config: &Config,
    ctx: &mut Context,
) -> String {
    let spans = ctx.siblings.spans;
    let mut html = String::from("<table>\n<thead>\n<tr>\n");
    for (cell, align) in header.iter().zip(aligns) {
        let cell = spans(cell, config, ctx);
        html.push_str(&format!("<th{}>{cell}</th>\n", align.style()));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in rows {
        html.push_str("<tr>\n");
        for (k, align) in aligns.iter().enumerate() {
            let cell = row.get(k).copied().unwrap_or("");
            let cell = spans(cell, config, ctx);
            html.push_str(&format!("<td{}>{cell}</td>\n", align.style()));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

/// Split a row on pipes, dropping the empty edge cells produced by leading
/// and trailing pipes.
fn split_row(line: &str) -> Vec<&str> {
    let content = line.trim().trim_start_matches('|').trim_end_matches('|');
    content.split('|').map(str::trim).collect()
}

/// A separator row: every cell is dashes with optional alignment colons.
fn separator_row(line: &str) -> Option<Vec<Align>> {
    if !line.contains('|') || !line.contains('-') {
        return None;
    }
    split_row(line)
        .into_iter()
        .map(|cell| {
            let left = cell.starts_with(':');
            let right = cell.ends_with(':') && cell.len() > 1;
            let dashes = cell.trim_matches(':');
            if dashes.is_empty() || dashes.bytes().any(|b| b != b'-') {
                return None;
            }
            Some(match (left, right) {
                (true, true) => Align::Center,
                (true, false) => Align::Left,
                (false, true) => Align::Right,
                (false, false) => Align::None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_simple_table() {
        let mut ctx = Context::new();
        let out = transform("| a | b |\n|---|---|\n| 1 | 2 |\n", &Config::default(), &mut ctx);
        let resolved = ctx.opaque.resolve(&out);
        assert!(resolved.contains("<th>a</th>"));
        assert!(resolved.contains("<td>2</td>"));
    }

    #[test]
    fn alignment_becomes_style() {
        let mut ctx = Context::new();
        let out = transform("| a | b |\n|:--|--:|\n| 1 | 2 |\n", &Config::default(), &mut ctx);
        let resolved = ctx.opaque.resolve(&out);
        assert!(resolved.contains("<th style=\"text-align:left;\">a</th>"));
        assert!(resolved.contains("<td style=\"text-align:right;\">2</td>"));
    }

    #[test]
    fn pipe_text_without_separator_is_untouched() {
        let mut ctx = Context::new();
        let text = "a | b\nc | d\n";
        assert_eq!(transform(text, &Config::default(), &mut ctx), text);
    }
}
