//! Preview Themes
//!
//! CSS class names used by the formatter, loaded from TOML theme files.

pub mod registry;
pub mod schema;

pub use registry::ThemeRegistry;
pub use schema::{Classes, Theme, ThemeFile};

use std::path::PathBuf;

/// Embedded default theme source
pub const DEFAULT_THEME_TOML: &str = include_str!("../../resources/themes/default.toml");

/// Errors raised while loading theme files
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("failed to read theme file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse theme file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parse the embedded default theme, falling back to a minimal theme
pub fn embedded_default() -> Theme {
    match toml::from_str::<ThemeFile>(DEFAULT_THEME_TOML) {
        Ok(file) => Theme::from_file(file, &Classes::minimal()),
        Err(e) => {
            log::warn!(
                "Failed to parse embedded default theme: {}. Using minimal fallback.",
                e
            );
            Theme::minimal()
        }
    }
}
