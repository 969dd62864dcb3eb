//! Configuration management for docpreview.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project configuration (`.docpreview.toml`)
//! - Theme directory configuration

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::preview::PreviewFormatter;
use crate::theme::ThemeRegistry;

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".docpreview.toml";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "docpreview")]
#[command(about = "Line-numbered HTML previews of document text")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Theme to use for class names
    #[arg(long, global = true, help = "Theme name (e.g., 'default')")]
    pub theme: Option<String>,

    /// Extra directory searched for theme files
    #[arg(long, global = true, help = "Directory containing theme TOML files")]
    pub theme_dir: Option<PathBuf>,

    /// Inputs larger than this are shown as plain text
    #[arg(long, global = true, help = "Maximum input size in bytes")]
    pub max_bytes: Option<usize>,

    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Render a file (or stdin) once
    Render {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
        /// Title deciding Markdown styling; defaults to the file name
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },
    /// List documents in a directory
    List { dir: PathBuf },
    /// Re-render a file whenever it changes
    Watch {
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
}

/// Contents of `.docpreview.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProjectConfig {
    pub theme: Option<String>,
    pub theme_dir: Option<PathBuf>,
    pub max_input_bytes: Option<usize>,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    /// Theme from the command line
    pub cli_theme: Option<String>,
    /// Theme from the project file
    pub project_theme: Option<String>,
    /// Theme directories, later entries override earlier ones
    pub theme_dirs: Vec<PathBuf>,
    pub max_input_bytes: Option<usize>,
    pub log_level: String,
    pub project_config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments and the current directory
    pub fn from_args_and_env() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::from_args_in(Args::parse(), &cwd)
    }

    /// Create configuration from explicit arguments, looking for the
    /// project file in `project_dir`
    pub fn from_args_in(args: Args, project_dir: &Path) -> Result<Self> {
        let project_path = project_dir.join(PROJECT_CONFIG_FILE);
        let (project, project_config_path) = if project_path.is_file() {
            (load_project_config(&project_path)?, Some(project_path))
        } else {
            (ProjectConfig::default(), None)
        };

        let mut theme_dirs = Vec::new();

        // User config directory first so project and CLI themes override it
        if let Some(config_dir) = dirs::config_dir() {
            theme_dirs.push(config_dir.join("docpreview").join("themes"));
        }
        if let Some(dir) = project.theme_dir {
            theme_dirs.push(project_dir.join(dir));
        }
        if let Some(dir) = args.theme_dir {
            theme_dirs.push(dir);
        }

        Ok(Config {
            command: args.command,
            cli_theme: args.theme,
            project_theme: project.theme,
            theme_dirs,
            max_input_bytes: args.max_bytes.or(project.max_input_bytes),
            log_level: args.log_level,
            project_config_path,
        })
    }

    pub fn has_project_config(&self) -> bool {
        self.project_config_path.is_some()
    }

    /// Theme name to activate: CLI, then project file
    pub fn get_effective_theme(&self) -> Option<&str> {
        self.cli_theme.as_deref().or(self.project_theme.as_deref())
    }

    /// Load all theme directories and activate the effective theme
    pub fn theme_registry(&self) -> Result<ThemeRegistry> {
        let mut registry = ThemeRegistry::new();
        for dir in &self.theme_dirs {
            let loaded = registry.load_dir(dir);
            if loaded > 0 {
                log::debug!("Loaded {} theme(s) from {}", loaded, dir.display());
            }
        }

        if let Some(name) = self.get_effective_theme()
            && !registry.set_active_theme(name)
        {
            bail!(
                "Unknown theme '{}' (available: {})",
                name,
                registry.list_themes().join(", ")
            );
        }

        Ok(registry)
    }

    /// Build the formatter described by this configuration
    pub fn formatter(&self) -> Result<PreviewFormatter> {
        let registry = self.theme_registry()?;
        let formatter = PreviewFormatter::new(registry.active_theme().clone())?
            .with_max_input_bytes(self.max_input_bytes);
        Ok(formatter)
    }
}

fn load_project_config(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
