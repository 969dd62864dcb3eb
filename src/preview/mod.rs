//! Preview Formatter
//!
//! Converts raw document text into a line-numbered, lightly highlighted
//! HTML fragment for a read-only viewer.
//!
//! Formatting is a pure function of the input text, the document title
//! and the theme. A failure anywhere in the pipeline never reaches the
//! caller: [`PreviewFormatter::render`] falls back to the raw text.

pub mod classify;
pub mod html;
pub mod preprocess;

use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

use serde::Serialize;

pub use classify::{ClassifiedLine, LineKind, MarkedLine, Patterns};

use crate::theme::Theme;

/// Errors that abort a whole render
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("input of {size} bytes exceeds the {limit} byte preview limit")]
    InputTooLarge { size: usize, limit: usize },
    #[error("failed to compile preview pattern")]
    Pattern(#[from] regex::Error),
    #[error("formatter panicked: {0}")]
    Panicked(String),
}

/// One rendered line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedLine {
    /// 1-based line number
    pub number: usize,
    pub kind: LineKind,
    /// Escaped, styled content without the line wrapper
    pub html: String,
}

/// Result of a render call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Formatted HTML fragment
    Html(String),
    /// Raw input to show as plain text, used when formatting failed
    PlainText(String),
}

impl Preview {
    pub fn as_str(&self) -> &str {
        match self {
            Preview::Html(s) | Preview::PlainText(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Preview::Html(s) | Preview::PlainText(s) => s,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Preview::PlainText(_))
    }
}

/// Whether a document title gets Markdown-aware styling
pub fn is_markdown(title: &str) -> bool {
    title.to_lowercase().ends_with(".md")
}

/// Line-oriented preview formatter
#[derive(Debug, Clone)]
pub struct PreviewFormatter {
    patterns: Patterns,
    theme: Theme,
    max_input_bytes: Option<usize>,
}

impl PreviewFormatter {
    pub fn new(theme: Theme) -> Result<Self, PreviewError> {
        Ok(Self {
            patterns: Patterns::new()?,
            theme,
            max_input_bytes: None,
        })
    }

    /// Reject inputs longer than `limit` bytes
    pub fn with_max_input_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_input_bytes = limit;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Normalise, split and format every line of `raw`
    pub fn format_lines(&self, raw: &str, title: &str) -> Result<Vec<FormattedLine>, PreviewError> {
        if let Some(limit) = self.max_input_bytes
            && raw.len() > limit
        {
            return Err(PreviewError::InputTooLarge {
                size: raw.len(),
                limit,
            });
        }

        let text = preprocess::preprocess(raw);
        let markdown = is_markdown(title);
        let classes = &self.theme.classes;
        let inline = self.patterns.inline_code();

        let lines = preprocess::split_lines(&text)
            .into_iter()
            .enumerate()
            .map(|(idx, line)| {
                let classified = if markdown {
                    self.patterns.classify(line)
                } else {
                    ClassifiedLine::Unstyled(line)
                };

                FormattedLine {
                    number: idx + 1,
                    kind: classified.kind(),
                    html: html::render_line(&classified, classes, inline),
                }
            })
            .collect();

        Ok(lines)
    }

    /// Format `raw` into a complete HTML fragment
    pub fn format(&self, raw: &str, title: &str) -> Result<String, PreviewError> {
        let lines = self.format_lines(raw, title)?;
        Ok(self.assemble(&lines))
    }

    /// Wrap formatted lines in the container element
    pub fn assemble(&self, lines: &[FormattedLine]) -> String {
        let classes = &self.theme.classes;
        let mut out = String::new();

        html::open_container(&mut out, classes);
        for line in lines {
            html::wrap_line(&mut out, line.number, &line.html, classes);
        }
        html::close_container(&mut out);

        out
    }

    /// Render `raw`, falling back to the raw text on any failure
    pub fn render(&self, raw: &str, title: &str) -> Preview {
        self.render_with_lines(raw, title).0
    }

    /// Render `raw` and keep the formatted lines
    ///
    /// On failure the preview is the raw text and no lines are returned.
    pub fn render_with_lines(&self, raw: &str, title: &str) -> (Preview, Vec<FormattedLine>) {
        let result = guarded(|| {
            let lines = self.format_lines(raw, title)?;
            Ok((self.assemble(&lines), lines))
        });

        match result {
            Ok((html, lines)) => (Preview::Html(html), lines),
            Err(e) => {
                log::warn!("Preview of '{}' failed, showing plain text: {}", title, e);
                (Preview::PlainText(raw.to_string()), Vec::new())
            }
        }
    }
}

/// Run `f`, turning a panic into `PreviewError::Panicked`
fn guarded<T>(f: impl FnOnce() -> Result<T, PreviewError>) -> Result<T, PreviewError> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(PreviewError::Panicked(panic_message(&*payload))))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

static DEFAULT_FORMATTER: LazyLock<Result<PreviewFormatter, PreviewError>> =
    LazyLock::new(|| PreviewFormatter::new(Theme::default()));

/// Render a preview with the default theme
///
/// Never fails: if formatting is impossible the raw text comes back as is.
pub fn render_preview(raw: &str, title: &str) -> String {
    match &*DEFAULT_FORMATTER {
        Ok(formatter) => formatter.render(raw, title).into_string(),
        Err(e) => {
            log::warn!("Default preview formatter unavailable: {}", e);
            raw.to_string()
        }
    }
}
