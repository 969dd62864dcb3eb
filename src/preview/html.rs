//! HTML Emission
//!
//! Turns classified lines into escaped, class-annotated HTML fragments.

use std::borrow::Cow;
use std::fmt::Write;

use regex::Regex;

use super::classify::{ClassifiedLine, MarkedLine};
use crate::theme::Classes;

/// Escape angle brackets in text content
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape a value placed inside a double-quoted attribute
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

fn span(out: &mut String, class: &str, text: &str) {
    let _ = write!(
        out,
        r#"<span class="{}">{}</span>"#,
        escape_attr(class),
        escape_text(text)
    );
}

fn marked(out: &mut String, line: &MarkedLine<'_>, marker_class: &str, text_class: &str) {
    out.push_str(line.indent);
    span(out, marker_class, line.marker);
    out.push_str(line.separator);
    if !line.text.is_empty() {
        span(out, text_class, line.text);
    }
}

/// Wrap every backtick-delimited span in the inline code class
pub fn inline_code(out: &mut String, text: &str, pattern: &Regex, class: &str) {
    let mut last = 0;
    for m in pattern.find_iter(text) {
        out.push_str(&escape_text(&text[last..m.start()]));
        span(out, class, m.as_str());
        last = m.end();
    }
    out.push_str(&escape_text(&text[last..]));
}

/// Render the content of one classified line
pub fn render_line(line: &ClassifiedLine<'_>, classes: &Classes, inline: &Regex) -> String {
    let mut out = String::new();

    match line {
        ClassifiedLine::Heading(m) => {
            marked(&mut out, m, &classes.heading_marker, &classes.heading_text)
        }
        ClassifiedLine::UnorderedItem(m) | ClassifiedLine::OrderedItem(m) => {
            marked(&mut out, m, &classes.list_marker, &classes.list_text)
        }
        ClassifiedLine::Quote(m) => marked(&mut out, m, &classes.quote_marker, &classes.quote_text),
        ClassifiedLine::Fence(text) => span(&mut out, &classes.fence, text),
        ClassifiedLine::Plain(text) => inline_code(&mut out, text, inline, &classes.inline_code),
        ClassifiedLine::Unstyled(text) => out.push_str(&escape_text(text)),
    }

    out
}

/// Wrap a rendered line with its number marker
pub fn wrap_line(out: &mut String, number: usize, content: &str, classes: &Classes) {
    let _ = write!(
        out,
        r#"<div class="{}" data-line="{number}"><span class="{}">{number}</span><span class="{}">{content}</span></div>"#,
        escape_attr(&classes.line),
        escape_attr(&classes.line_number),
        escape_attr(&classes.content),
    );
}

/// Open the container element
pub fn open_container(out: &mut String, classes: &Classes) {
    let _ = write!(out, r#"<div class="{}">"#, escape_attr(&classes.container));
}

pub fn close_container(out: &mut String) {
    out.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::classify::Patterns;

    fn classes() -> Classes {
        Classes::minimal()
    }

    fn render(raw: &str) -> String {
        let p = Patterns::new().unwrap();
        render_line(&p.classify(raw), &classes(), p.inline_code())
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b > c"), "a &lt; b &gt; c");
        assert!(matches!(escape_text("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"a" onclick="x"#), "a&quot; onclick=&quot;x");
    }

    #[test]
    fn test_heading_markup() {
        assert_eq!(
            render("# Title"),
            r#"<span class="heading">#</span> <span class="heading">Title</span>"#
        );
    }

    #[test]
    fn test_list_markup_keeps_indent() {
        assert_eq!(
            render("  - item"),
            r#"  <span class="list-marker">-</span> <span class="list-item">item</span>"#
        );
    }

    #[test]
    fn test_quote_escapes_marker() {
        assert_eq!(
            render("> said <b>"),
            r#"<span class="quote">&gt;</span> <span class="quote">said &lt;b&gt;</span>"#
        );
    }

    #[test]
    fn test_inline_code_spans() {
        assert_eq!(
            render("run `cargo <x>` now"),
            r#"run <span class="inline-code">`cargo &lt;x&gt;`</span> now"#
        );
    }

    #[test]
    fn test_unmatched_backtick_is_plain() {
        assert_eq!(render("a ` b"), "a ` b");
        assert_eq!(render("empty `` pair"), "empty `` pair");
    }

    #[test]
    fn test_unstyled_only_escapes() {
        let out = render_line(
            &ClassifiedLine::Unstyled("`x` <y>"),
            &classes(),
            Patterns::new().unwrap().inline_code(),
        );
        assert_eq!(out, "`x` &lt;y&gt;");
    }

    #[test]
    fn test_wrap_line() {
        let mut out = String::new();
        wrap_line(&mut out, 3, "hi", &classes());
        assert_eq!(
            out,
            r#"<div class="editor-line" data-line="3"><span class="line-number">3</span><span class="line-content">hi</span></div>"#
        );
    }
}
