//! Line Classification
//!
//! Decides the kind of a raw (unescaped) line from its leading characters.
//! Precedence is fixed: heading, unordered item, ordered item, quote,
//! code fence, plain.

use regex::Regex;
use serde::Serialize;

/// Line kinds recognised by the preview formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Heading,
    UnorderedItem,
    OrderedItem,
    Quote,
    Fence,
    Plain,
}

/// Marker-bearing line split into its pieces
///
/// Concatenating `indent`, `marker`, `separator` and `text` gives back the
/// original line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedLine<'a> {
    pub indent: &'a str,
    pub marker: &'a str,
    pub separator: &'a str,
    pub text: &'a str,
}

/// A classified line borrowing from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifiedLine<'a> {
    Heading(MarkedLine<'a>),
    UnorderedItem(MarkedLine<'a>),
    OrderedItem(MarkedLine<'a>),
    Quote(MarkedLine<'a>),
    Fence(&'a str),
    /// Plain text with inline code highlighting
    Plain(&'a str),
    /// Plain text emitted with no styling at all
    Unstyled(&'a str),
}

impl ClassifiedLine<'_> {
    pub fn kind(&self) -> LineKind {
        match self {
            ClassifiedLine::Heading(_) => LineKind::Heading,
            ClassifiedLine::UnorderedItem(_) => LineKind::UnorderedItem,
            ClassifiedLine::OrderedItem(_) => LineKind::OrderedItem,
            ClassifiedLine::Quote(_) => LineKind::Quote,
            ClassifiedLine::Fence(_) => LineKind::Fence,
            ClassifiedLine::Plain(_) | ClassifiedLine::Unstyled(_) => LineKind::Plain,
        }
    }
}

const FENCE: &str = "```";

/// Compiled classification patterns
#[derive(Debug, Clone)]
pub struct Patterns {
    heading: Regex,
    unordered: Regex,
    ordered: Regex,
    quote: Regex,
    inline_code: Regex,
}

impl Patterns {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            heading: Regex::new(r"^(\s*)(#{1,6})(\s+)(.*)$")?,
            unordered: Regex::new(r"^(\s*)([-*+])(\s+)(.*)$")?,
            ordered: Regex::new(r"^(\s*)([0-9]+\.)(\s+)(.*)$")?,
            quote: Regex::new(r"^()(>)(\s*)(.*)$")?,
            inline_code: Regex::new(r"`([^`]+)`")?,
        })
    }

    /// Pattern matching a backtick-delimited span; group 1 is the code
    pub fn inline_code(&self) -> &Regex {
        &self.inline_code
    }

    /// Classify one raw line
    pub fn classify<'a>(&self, line: &'a str) -> ClassifiedLine<'a> {
        if self.heading.is_match(line) {
            return split_marked(&self.heading, line)
                .map(ClassifiedLine::Heading)
                .unwrap_or_else(|| degrade(line, LineKind::Heading));
        }

        if self.unordered.is_match(line) {
            return split_marked(&self.unordered, line)
                .map(ClassifiedLine::UnorderedItem)
                .unwrap_or_else(|| degrade(line, LineKind::UnorderedItem));
        }

        if self.ordered.is_match(line) {
            return split_marked(&self.ordered, line)
                .map(ClassifiedLine::OrderedItem)
                .unwrap_or_else(|| degrade(line, LineKind::OrderedItem));
        }

        if line.starts_with('>') {
            return split_marked(&self.quote, line)
                .map(ClassifiedLine::Quote)
                .unwrap_or_else(|| degrade(line, LineKind::Quote));
        }

        if line.starts_with(FENCE) {
            return ClassifiedLine::Fence(line);
        }

        ClassifiedLine::Plain(line)
    }
}

/// Extract the four marker groups after a guard check passed
fn split_marked<'a>(pattern: &Regex, line: &'a str) -> Option<MarkedLine<'a>> {
    let caps = pattern.captures(line)?;

    Some(MarkedLine {
        indent: caps.get(1)?.as_str(),
        marker: caps.get(2)?.as_str(),
        separator: caps.get(3)?.as_str(),
        text: caps.get(4)?.as_str(),
    })
}

fn degrade(line: &str, attempted: LineKind) -> ClassifiedLine<'_> {
    log::debug!("Could not split {:?} line, rendering unstyled", attempted);
    ClassifiedLine::Unstyled(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> Patterns {
        Patterns::new().expect("patterns compile")
    }

    #[test]
    fn test_heading_split() {
        let line = patterns().classify("## Section two");
        assert_eq!(
            line,
            ClassifiedLine::Heading(MarkedLine {
                indent: "",
                marker: "##",
                separator: " ",
                text: "Section two",
            })
        );
    }

    #[test]
    fn test_indented_heading_uses_trimmed_start() {
        let line = patterns().classify("   # Title");
        if let ClassifiedLine::Heading(marked) = line {
            assert_eq!(marked.indent, "   ");
            assert_eq!(marked.marker, "#");
            assert_eq!(marked.text, "Title");
        } else {
            panic!("Expected heading, got {:?}", line);
        }
    }

    #[test]
    fn test_heading_needs_whitespace_and_at_most_six_hashes() {
        let p = patterns();
        assert_eq!(p.classify("#hashtag").kind(), LineKind::Plain);
        assert_eq!(p.classify("####### seven").kind(), LineKind::Plain);
        assert_eq!(p.classify("###### six").kind(), LineKind::Heading);
    }

    #[test]
    fn test_heading_wins_over_list() {
        assert_eq!(patterns().classify("# - item").kind(), LineKind::Heading);
    }

    #[test]
    fn test_list_markers() {
        let p = patterns();
        for line in ["- a", "* a", "+ a", "  - nested"] {
            assert_eq!(p.classify(line).kind(), LineKind::UnorderedItem, "{line}");
        }
        assert_eq!(p.classify("-no-space").kind(), LineKind::Plain);
        assert_eq!(p.classify("**bold**").kind(), LineKind::Plain);
    }

    #[test]
    fn test_ordered_item() {
        let line = patterns().classify(" 12. twelfth");
        if let ClassifiedLine::OrderedItem(marked) = line {
            assert_eq!(marked.indent, " ");
            assert_eq!(marked.marker, "12.");
            assert_eq!(marked.text, "twelfth");
        } else {
            panic!("Expected ordered item, got {:?}", line);
        }
        assert_eq!(patterns().classify("3.14 is pi").kind(), LineKind::Plain);
    }

    #[test]
    fn test_quote_with_and_without_space() {
        let p = patterns();
        if let ClassifiedLine::Quote(marked) = p.classify(">  quoted") {
            assert_eq!(marked.marker, ">");
            assert_eq!(marked.separator, "  ");
            assert_eq!(marked.text, "quoted");
        } else {
            panic!("Expected quote");
        }
        assert_eq!(p.classify(">").kind(), LineKind::Quote);
        assert_eq!(p.classify(" > indented").kind(), LineKind::Plain);
    }

    #[test]
    fn test_fence() {
        let p = patterns();
        assert_eq!(p.classify("```rust"), ClassifiedLine::Fence("```rust"));
        assert_eq!(p.classify("``not").kind(), LineKind::Plain);
    }

    #[test]
    fn test_empty_line_is_plain() {
        assert_eq!(patterns().classify(""), ClassifiedLine::Plain(""));
    }
}
