//! Markdown subset renderer for generated text.
//!
//! Supports exactly what the model is asked to produce: `#` headings,
//! `-`/`*` bullets and `**bold**` spans. Text is parsed into blocks first and
//! escaped on output, so model text can never inject markup.

use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    ListItem(Vec<Span>),
    Paragraph(Vec<Span>),
}

/// Parses text line by line. Blank lines separate nothing and are dropped.
pub fn parse(text: &str) -> Vec<Block> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Block {
    if line.starts_with('#') {
        let hashes = line.chars().take_while(|c| *c == '#').count();
        let level = hashes.min(6) as u8;
        return Block::Heading {
            level,
            spans: parse_spans(line[hashes..].trim_start()),
        };
    }
    if let Some(item) = strip_bullet(line) {
        return Block::ListItem(parse_spans(item));
    }
    Block::Paragraph(parse_spans(line))
}

fn strip_bullet(line: &str) -> Option<&str> {
    ["- ", "* ", "• "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim_start)
}

/// Splits a line into text and `**bold**` spans. An unterminated `**` is literal.
pub fn parse_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut text = String::new();
    let mut rest = line;

    while let Some(open) = rest.find("**") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("**") else {
            break;
        };
        text.push_str(&rest[..open]);
        if !text.is_empty() {
            spans.push(Span::Text(std::mem::take(&mut text)));
        }
        spans.push(Span::Bold(after[..close].to_string()));
        rest = &after[close + 2..];
    }

    text.push_str(rest);
    if !text.is_empty() {
        spans.push(Span::Text(text));
    }
    spans
}

/// Renders blocks as HTML. Consecutive list items share one `<ul>`.
pub fn render_html(blocks: &[Block]) -> String {
    let mut html = String::new();
    let mut in_list = false;

    for block in blocks {
        let is_item = matches!(block, Block::ListItem(_));
        if in_list && !is_item {
            html.push_str("</ul>");
        }
        if is_item && !in_list {
            html.push_str("<ul>");
        }
        in_list = is_item;

        match block {
            // every heading level renders the same way in the result panels
            Block::Heading { spans, .. } => {
                let _ = write!(html, "<h3>{}</h3>", render_spans(spans));
            }
            Block::ListItem(spans) => {
                let _ = write!(html, "<li>{}</li>", render_spans(spans));
            }
            Block::Paragraph(spans) => {
                let _ = write!(html, "<p>{}</p>", render_spans(spans));
            }
        }
    }

    if in_list {
        html.push_str("</ul>");
    }
    html
}

pub fn markdown_to_html(text: &str) -> String {
    render_html(&parse(text))
}

/// Bold spans only, with line breaks kept as `<br/>`. Used for emails and rubric cells.
pub fn render_inline_html(text: &str) -> String {
    text.lines()
        .map(|line| render_spans(&parse_spans(line)))
        .collect::<Vec<_>>()
        .join("<br/>")
}

/// One HTML fragment per non-blank line with any bullet marker removed.
pub fn render_list_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| render_spans(&parse_spans(strip_bullet(line).unwrap_or(line))))
        .collect()
}

fn render_spans(spans: &[Span]) -> String {
    let mut html = String::new();
    for span in spans {
        match span {
            Span::Text(text) => html.push_str(&escape(text)),
            Span::Bold(text) => {
                let _ = write!(html, "<strong>{}</strong>", escape(text));
            }
        }
    }
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_document() {
        let blocks = parse("## What You'll Do\n\n- Edit **fast** videos\nPlain line");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 2,
                    spans: vec![Span::Text("What You'll Do".to_string())]
                },
                Block::ListItem(vec![
                    Span::Text("Edit ".to_string()),
                    Span::Bold("fast".to_string()),
                    Span::Text(" videos".to_string()),
                ]),
                Block::Paragraph(vec![Span::Text("Plain line".to_string())]),
            ]
        );
    }

    #[test]
    fn test_unterminated_bold_is_literal() {
        assert_eq!(
            parse_spans("a **b"),
            vec![Span::Text("a **b".to_string())]
        );
        assert_eq!(
            parse_spans("**x** and **y"),
            vec![
                Span::Bold("x".to_string()),
                Span::Text(" and **y".to_string())
            ]
        );
    }

    #[test]
    fn test_bold_line_is_not_a_bullet() {
        assert_eq!(
            parse("**Salary:** competitive"),
            vec![Block::Paragraph(vec![
                Span::Bold("Salary:".to_string()),
                Span::Text(" competitive".to_string())
            ])]
        );
    }

    #[test]
    fn test_render_groups_list_items() {
        let html = markdown_to_html("# Title\n- one\n- two\nafter\n- three");
        assert_eq!(
            html,
            "<h3>Title</h3><ul><li>one</li><li>two</li></ul><p>after</p><ul><li>three</li></ul>"
        );
    }

    #[test]
    fn test_render_escapes_markup() {
        let html = markdown_to_html("- <script>alert('x')</script> & **<b>**");
        assert_eq!(
            html,
            "<ul><li>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; <strong>&lt;b&gt;</strong></li></ul>"
        );
    }

    #[test]
    fn test_hyphenated_words_are_not_bullets() {
        assert_eq!(markdown_to_html("Mid-Level role"), "<p>Mid-Level role</p>");
    }

    #[test]
    fn test_inline_html_keeps_line_breaks() {
        assert_eq!(
            render_inline_html("Hi **Asha**,\nThanks\n\nTeam"),
            "Hi <strong>Asha</strong>,<br/>Thanks<br/><br/>Team"
        );
    }

    #[test]
    fn test_list_items_strip_markers_and_blanks() {
        assert_eq!(
            render_list_items("- **Week 1:** meet the team\n\n  - Shadow a shoot\nNo marker"),
            vec![
                "<strong>Week 1:</strong> meet the team",
                "Shadow a shoot",
                "No marker"
            ]
        );
    }
}
