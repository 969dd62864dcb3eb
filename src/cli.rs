//! Command-line front end.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::config::{Command, Config, OutputFormat};
use crate::document::DocumentStore;
use crate::preview::{FormattedLine, PreviewFormatter};
use crate::watch::PreviewWatcher;

const WATCH_DEBOUNCE: Duration = Duration::from_millis(100);

/// JSON output of a render
#[derive(Debug, Serialize)]
pub struct PreviewDocument<'a> {
    pub title: &'a str,
    /// False when the raw text is shown because formatting failed
    pub formatted: bool,
    pub lines: Vec<FormattedLine>,
    pub html: String,
}

/// Parse configuration and run the selected command
pub async fn run() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    if let Some(path) = &config.project_config_path {
        log::debug!("Using project config {}", path.display());
    }

    execute(&config).await
}

/// Run the command described by `config`
pub async fn execute(config: &Config) -> Result<()> {
    match &config.command {
        Command::Render {
            file,
            title,
            format,
        } => {
            let formatter = config.formatter()?;
            let (raw, default_title) = match file {
                Some(path) => (read_file(path).await?, file_title(path)),
                None => (read_stdin().await?, "stdin".to_string()),
            };
            let title = title.clone().unwrap_or(default_title);
            let output = render_output(&formatter, &raw, &title, *format)?;
            write_stdout(&output).await
        }
        Command::List { dir } => {
            let store = DocumentStore::open(dir.clone())?;
            let mut listing = String::new();
            for document in store.list()? {
                listing.push_str(&document.name);
                listing.push('\n');
            }
            write_stdout(&listing).await
        }
        Command::Watch {
            file,
            title,
            format,
        } => {
            let formatter = config.formatter()?;
            let title = title.clone().unwrap_or_else(|| file_title(file));
            let mut watcher = PreviewWatcher::new(file)?;

            loop {
                if let Some(output) =
                    render_watched(&formatter, watcher.target(), &title, *format).await?
                {
                    write_stdout(&output).await?;
                }

                if watcher.next_change(WATCH_DEBOUNCE).await.is_none() {
                    log::info!("Watcher stopped");
                    return Ok(());
                }
                log::info!("{} changed, re-rendering", watcher.target().display());
            }
        }
    }
}

/// Render `raw` in the requested output format
pub fn render_output(
    formatter: &PreviewFormatter,
    raw: &str,
    title: &str,
    format: OutputFormat,
) -> Result<String> {
    let mut output = match format {
        OutputFormat::Html => formatter.render(raw, title).into_string(),
        OutputFormat::Json => {
            let (preview, lines) = formatter.render_with_lines(raw, title);
            let document = PreviewDocument {
                title,
                formatted: !preview.is_fallback(),
                lines,
                html: preview.into_string(),
            };
            serde_json::to_string_pretty(&document).context("Failed to serialize preview")?
        }
    };
    output.push('\n');
    Ok(output)
}

/// Read and render a watched file
///
/// A failed read is logged and yields `None`; editors that save by
/// renaming briefly leave no file behind.
pub async fn render_watched(
    formatter: &PreviewFormatter,
    path: &Path,
    title: &str,
    format: OutputFormat,
) -> Result<Option<String>> {
    match read_file(path).await {
        Ok(raw) => render_output(formatter, &raw, title, format).map(Some),
        Err(e) => {
            log::warn!("{:#}, waiting for the next change", e);
            Ok(None)
        }
    }
}

fn file_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn read_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn read_stdin() -> Result<String> {
    let mut bytes = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut bytes)
        .await
        .context("Failed to read stdin")?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn formatter() -> PreviewFormatter {
        PreviewFormatter::new(Theme::minimal()).unwrap()
    }

    #[test]
    fn test_json_output_lists_lines() {
        let out = render_output(&formatter(), "# A\nb", "a.md", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["title"], "a.md");
        assert_eq!(value["formatted"], true);
        assert_eq!(value["lines"].as_array().unwrap().len(), 2);
        assert_eq!(value["lines"][0]["kind"], "heading");
        assert_eq!(value["lines"][1]["number"], 2);
    }

    #[test]
    fn test_json_output_on_fallback() {
        let f = formatter().with_max_input_bytes(Some(1));
        let out = render_output(&f, "<b>", "a.md", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["formatted"], false);
        assert_eq!(value["html"], "<b>");
        assert!(value["lines"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_watched_read_failure_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");

        let missing = render_watched(&formatter(), &path, "notes.md", OutputFormat::Html)
            .await
            .unwrap();
        assert_eq!(missing, None);

        std::fs::write(&path, "# back").unwrap();
        let output = render_watched(&formatter(), &path, "notes.md", OutputFormat::Html)
            .await
            .unwrap()
            .expect("rendered");
        assert!(output.contains(r#"<span class="heading">#</span>"#));
    }

    #[test]
    fn test_file_title() {
        assert_eq!(file_title(Path::new("docs/Notes.MD")), "Notes.MD");
    }
}
