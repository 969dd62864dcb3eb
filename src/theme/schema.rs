//! Theme Schema Types
//!
//! TOML file layout for themes and the runtime type the formatter reads.

use serde::{Deserialize, Serialize};

/// Root theme file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ThemeFile {
    pub theme: ThemeMeta,
    #[serde(default)]
    pub classes: ClassOverrides,
}

/// Theme metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ThemeMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Class names as written in a theme file; missing entries inherit a base theme
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ClassOverrides {
    pub container: Option<String>,
    pub line: Option<String>,
    pub line_number: Option<String>,
    pub content: Option<String>,
    pub heading_marker: Option<String>,
    pub heading_text: Option<String>,
    pub list_marker: Option<String>,
    pub list_text: Option<String>,
    pub quote_marker: Option<String>,
    pub quote_text: Option<String>,
    pub fence: Option<String>,
    pub inline_code: Option<String>,
}

/// Fully resolved class names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classes {
    pub container: String,
    pub line: String,
    pub line_number: String,
    pub content: String,
    pub heading_marker: String,
    pub heading_text: String,
    pub list_marker: String,
    pub list_text: String,
    pub quote_marker: String,
    pub quote_text: String,
    pub fence: String,
    pub inline_code: String,
}

/// Runtime theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub classes: Classes,
}

impl Classes {
    /// Minimal class set used when the embedded theme cannot be parsed
    pub fn minimal() -> Self {
        Self {
            container: "editor-content".to_string(),
            line: "editor-line".to_string(),
            line_number: "line-number".to_string(),
            content: "line-content".to_string(),
            heading_marker: "heading".to_string(),
            heading_text: "heading".to_string(),
            list_marker: "list-marker".to_string(),
            list_text: "list-item".to_string(),
            quote_marker: "quote".to_string(),
            quote_text: "quote".to_string(),
            fence: "code-fence".to_string(),
            inline_code: "inline-code".to_string(),
        }
    }

    /// Apply overrides on top of `self`
    pub fn merged(&self, overrides: ClassOverrides) -> Self {
        let pick = |value: Option<String>, base: &String| value.unwrap_or_else(|| base.clone());

        Self {
            container: pick(overrides.container, &self.container),
            line: pick(overrides.line, &self.line),
            line_number: pick(overrides.line_number, &self.line_number),
            content: pick(overrides.content, &self.content),
            heading_marker: pick(overrides.heading_marker, &self.heading_marker),
            heading_text: pick(overrides.heading_text, &self.heading_text),
            list_marker: pick(overrides.list_marker, &self.list_marker),
            list_text: pick(overrides.list_text, &self.list_text),
            quote_marker: pick(overrides.quote_marker, &self.quote_marker),
            quote_text: pick(overrides.quote_text, &self.quote_text),
            fence: pick(overrides.fence, &self.fence),
            inline_code: pick(overrides.inline_code, &self.inline_code),
        }
    }
}

impl Theme {
    /// Build a theme from a parsed file, filling gaps from `base`
    pub fn from_file(file: ThemeFile, base: &Classes) -> Self {
        Self {
            name: file.theme.name,
            version: file.theme.version,
            description: file.theme.description,
            classes: base.merged(file.classes),
        }
    }

    /// Minimal fallback theme named "default"
    pub fn minimal() -> Self {
        Self {
            name: "default".to_string(),
            version: Some("minimal-fallback".to_string()),
            description: Some("Minimal fallback theme".to_string()),
            classes: Classes::minimal(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        super::embedded_default()
    }
}
