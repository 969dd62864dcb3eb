//! Theme Registry
//!
//! In-memory registry seeded with the embedded default theme.

use super::schema::{Classes, Theme, ThemeFile};
use super::ThemeError;
use std::collections::HashMap;
use std::path::Path;

/// In-memory theme registry
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: HashMap<String, Theme>,
    active_theme: String,
    /// Classes that theme files inherit for entries they leave out
    base: Classes,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry {
    /// Registry holding only the embedded default theme, which is active
    pub fn new() -> Self {
        let default = super::embedded_default();
        let active_theme = default.name.clone();
        let base = default.classes.clone();
        let mut themes = HashMap::new();
        themes.insert(default.name.clone(), default);

        Self {
            themes,
            active_theme,
            base,
        }
    }

    /// Add a theme, replacing any theme with the same name
    pub fn add_theme(&mut self, theme: Theme) {
        self.themes.insert(theme.name.clone(), theme);
    }

    /// Set the active theme
    pub fn set_active_theme(&mut self, name: &str) -> bool {
        if self.themes.contains_key(name) {
            self.active_theme = name.to_string();
            true
        } else {
            false
        }
    }

    /// Get the currently active theme
    pub fn active_theme(&self) -> &Theme {
        // the active name always refers to a registered theme
        &self.themes[&self.active_theme]
    }

    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// List all available themes, sorted by name
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Parse and register a single theme file
    pub fn load_theme_file(&mut self, path: &Path) -> Result<&Theme, ThemeError> {
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ThemeFile = toml::from_str(&content).map_err(|source| ThemeError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let theme = Theme::from_file(file, &self.base);
        let name = theme.name.clone();
        log::debug!("Loaded theme '{}' from {}", name, path.display());
        self.add_theme(theme);

        Ok(&self.themes[&name])
    }

    /// Load every `*.toml` file in `dir`
    ///
    /// A missing directory is not an error. Files that fail to load are
    /// logged and skipped. Returns the number of themes loaded.
    pub fn load_dir(&mut self, dir: &Path) -> usize {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("toml"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_theme_file(&path) {
                Ok(_) => loaded += 1,
                Err(e) => log::warn!("{}", e),
            }
        }

        loaded
    }
}
