//! HTML to Markdown conversion.
//!
//! Parses the post body as an HTML fragment and renders the common block and
//! inline elements as Markdown. Elements without a Markdown equivalent are
//! passed through as HTML, keeping their attributes and converted children.

use crate::error::ConversionError;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Deepest element nesting accepted before giving up on a document
pub const MAX_DEPTH: usize = 256;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Contents are copied byte for byte; the parser does not decode entities in them
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "xmp", "iframe", "noembed", "noframes"];

/// Contents are plain text with entities decoded, so `&` and `<` are re-escaped
const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

const NBSP: char = '\u{a0}';

lazy_static! {
    static ref BLANK_LINES: Regex = Regex::new(r"\n(?:[ \t]*\n){2,}").expect("valid blank line pattern");
    static ref EMPTY_LINES: Regex = Regex::new(r"\n(?:[ \t]*\n)+").expect("valid empty line pattern");
}

/// Convert an HTML fragment to Markdown.
///
/// ```ignore
/// assert_eq!(html_to_markdown("<b>Hi</b>").unwrap(), "**Hi**\n");
/// ```
pub fn html_to_markdown(html: &str) -> Result<String, ConversionError> {
    let fragment = Html::parse_fragment(html);
    let raw = MarkdownWriter.children(fragment.root_element(), 0)?;
    let collapsed = BLANK_LINES.replace_all(&raw, "\n\n");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() { Ok(String::new()) } else { Ok(format!("{}\n", trimmed)) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Ordered(usize),
}

struct MarkdownWriter;

impl MarkdownWriter {
    fn children(&self, element: ElementRef<'_>, depth: usize) -> Result<String, ConversionError> {
        let mut out = String::new();
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(&escape_text(&collapse_whitespace(text))),
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        out.push_str(&self.element(el, depth + 1)?);
                    }
                }
                _ => {}
            }
        }
        Ok(out)
    }

    fn element(&self, el: ElementRef<'_>, depth: usize) -> Result<String, ConversionError> {
        if depth > MAX_DEPTH {
            return Err(ConversionError::TooDeep { limit: MAX_DEPTH });
        }

        let tag = el.value().name();
        let rendered = match tag {
            "html" | "body" | "span" | "thead" | "tbody" | "tfoot" => self.children(el, depth)?,
            "p" | "div" | "section" | "article" | "header" | "footer" | "main" | "figure" => {
                format!("\n\n{}\n\n", self.children(el, depth)?.trim())
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = tag[1..].parse::<usize>().unwrap_or(1);
                let text = self.children(el, depth)?;
                format!("\n\n{} {}\n\n", "#".repeat(level), text.trim())
            }
            "br" => "  \n".to_string(),
            "hr" => "\n\n* * *\n\n".to_string(),
            "strong" | "b" => wrap_inline(&self.children(el, depth)?, "**"),
            "em" | "i" => wrap_inline(&self.children(el, depth)?, "_"),
            "del" | "s" | "strike" => wrap_inline(&self.children(el, depth)?, "~~"),
            "code" => {
                let code: String = el.text().collect();
                if code.contains('`') { format!("`` {} ``", code) } else { format!("`{}`", code) }
            }
            "pre" => self.preformatted(el),
            "a" => self.link(el, depth)?,
            "img" => image(el),
            "ul" => self.list(el, ListKind::Bullet, depth)?,
            "ol" => {
                let start = el.value().attr("start").and_then(|s| s.trim().parse().ok()).unwrap_or(1);
                self.list(el, ListKind::Ordered(start), depth)?
            }
            "blockquote" => {
                let inner = self.children(el, depth)?;
                let quoted: Vec<String> = inner
                    .trim()
                    .lines()
                    .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {}", line) })
                    .collect();
                format!("\n\n{}\n\n", quoted.join("\n"))
            }
            "table" => self.table(el, depth)?,
            _ => self.passthrough(el, depth)?,
        };
        Ok(rendered)
    }

    fn preformatted(&self, el: ElementRef<'_>) -> String {
        let language = el
            .value()
            .classes()
            .chain(el.children().filter_map(ElementRef::wrap).flat_map(|c| c.value().classes()))
            .find_map(|class| class.strip_prefix("language-").or_else(|| class.strip_prefix("lang-")))
            .unwrap_or("")
            .to_string();
        let code: String = el.text().collect();
        format!("\n\n```{}\n{}\n```\n\n", language, code.trim_end_matches('\n'))
    }

    fn link(&self, el: ElementRef<'_>, depth: usize) -> Result<String, ConversionError> {
        let text = self.children(el, depth)?;
        let Some(href) = el.value().attr("href").map(str::trim).filter(|h| !h.is_empty()) else {
            return Ok(text);
        };
        let title = el.value().attr("title").map(|t| format!(" \"{}\"", t.replace('"', "\\\""))).unwrap_or_default();
        Ok(format!("[{}]({}{})", text.trim(), href, title))
    }

    fn list(&self, el: ElementRef<'_>, kind: ListKind, depth: usize) -> Result<String, ConversionError> {
        let mut lines = Vec::new();
        let mut number = match kind {
            ListKind::Ordered(start) => start,
            ListKind::Bullet => 0,
        };
        for item in el.children().filter_map(ElementRef::wrap) {
            if item.value().name() != "li" {
                lines.push(self.element(item, depth + 1)?.trim().to_string());
                continue;
            }
            let marker = match kind {
                ListKind::Bullet => "- ".to_string(),
                ListKind::Ordered(_) => {
                    let m = format!("{}. ", number);
                    number += 1;
                    m
                }
            };
            let content = EMPTY_LINES.replace_all(self.children(item, depth + 1)?.trim(), "\n").into_owned();
            let indent = " ".repeat(marker.len());
            let mut rendered = String::new();
            for (i, line) in content.lines().enumerate() {
                if i == 0 {
                    rendered.push_str(&marker);
                    rendered.push_str(line);
                } else {
                    rendered.push('\n');
                    if !line.is_empty() {
                        rendered.push_str(&indent);
                        rendered.push_str(line);
                    }
                }
            }
            if rendered.is_empty() {
                rendered.push_str(marker.trim_end());
            }
            lines.push(rendered);
        }
        Ok(format!("\n\n{}\n\n", lines.join("\n")))
    }

    fn table(&self, el: ElementRef<'_>, depth: usize) -> Result<String, ConversionError> {
        let mut rows: Vec<Vec<String>> = Vec::new();
        for child in el.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "tr" => rows.push(self.table_row(child, depth + 1)?),
                "thead" | "tbody" | "tfoot" => {
                    for tr in child.children().filter_map(ElementRef::wrap).filter(|c| c.value().name() == "tr") {
                        rows.push(self.table_row(tr, depth + 2)?);
                    }
                }
                _ => {}
            }
        }
        if rows.is_empty() {
            return Ok(String::new());
        }

        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0).max(1);
        let mut out = String::from("\n\n");
        for (i, row) in rows.iter().enumerate() {
            let mut cells = row.clone();
            cells.resize(width, String::new());
            out.push_str(&format!("| {} |\n", cells.join(" | ")));
            if i == 0 {
                out.push_str(&format!("|{}\n", " --- |".repeat(width)));
            }
        }
        out.push('\n');
        Ok(out)
    }

    fn table_row(&self, tr: ElementRef<'_>, depth: usize) -> Result<Vec<String>, ConversionError> {
        let mut cells = Vec::new();
        for cell in tr.children().filter_map(ElementRef::wrap) {
            if matches!(cell.value().name(), "td" | "th") {
                let text = self.children(cell, depth + 1)?;
                let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
                cells.push(flat.replace('|', "\\|"));
            }
        }
        Ok(cells)
    }

    /// Unknown element: keep the tag, convert what is inside it
    fn passthrough(&self, el: ElementRef<'_>, depth: usize) -> Result<String, ConversionError> {
        let name = el.value().name();
        let mut open = format!("<{}", name);
        for (attr, value) in el.value().attrs() {
            open.push_str(&format!(" {}=\"{}\"", attr, value.replace('&', "&amp;").replace('"', "&quot;")));
        }
        open.push('>');
        if VOID_ELEMENTS.contains(&name) {
            return Ok(open);
        }
        let inner = if RAW_TEXT_ELEMENTS.contains(&name) {
            el.text().collect::<String>()
        } else if ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&name) {
            el.text().collect::<String>().replace('&', "&amp;").replace('<', "&lt;")
        } else {
            self.children(el, depth)?
        };
        Ok(format!("{}{}</{}>", open, inner, name))
    }
}

fn image(el: ElementRef<'_>) -> String {
    let src = el.value().attr("src").unwrap_or("");
    let alt = el.value().attr("alt").unwrap_or("");
    let title = el.value().attr("title").map(|t| format!(" \"{}\"", t.replace('"', "\\\""))).unwrap_or_default();
    format!("![{}]({}{})", alt, src, title)
}

/// `**text**` with surrounding whitespace moved outside the markers
fn wrap_inline(inner: &str, marker: &str) -> String {
    let content = inner.trim();
    if content.is_empty() {
        return inner.to_string();
    }
    let leading = if inner.starts_with(char::is_whitespace) { " " } else { "" };
    let trailing = if inner.ends_with(char::is_whitespace) { " " } else { "" };
    format!("{}{}{}{}{}", leading, marker, content, marker, trailing)
}

/// Whitespace runs become one space; non-breaking spaces are kept as they are
fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() && ch != NBSP {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(ch);
            last_space = false;
        }
    }
    out
}

/// Escape decoded text so it reads back as the same characters, never as markup
fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '*' | '_' => {
                out.push('\\');
                out.push(ch);
            }
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            NBSP => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;
