//! docpreview
//!
//! Line-numbered, lightly highlighted HTML previews of document text.
//!
//! This library provides:
//! - The preview formatter (normalisation, line classification, HTML)
//! - TOML themes for the emitted class names
//! - A directory-backed document store
//! - File watching for live previews

pub mod cli;
pub mod config;
pub mod document;
pub mod preview;
pub mod theme;
pub mod watch;

// Re-exports for clean public API
pub use config::Config;
pub use document::{Document, DocumentStore};
pub use preview::{FormattedLine, LineKind, Preview, PreviewFormatter, render_preview};
pub use theme::{Theme, ThemeRegistry};
