//! timeline CLI: view and render event timelines in the terminal

mod logging;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use thiserror::Error;
use timeline_engine::{load_items, ConfigError, TimelineConfig, TimelineItem};
use timeline_tui::{headless, App, Theme};
use tracing::info;

use crate::logging::LoggingError;

/// Scrollable event timeline for the terminal
#[derive(Parser)]
#[command(name = "timeline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer
    View {
        #[command(flatten)]
        source: Source,

        /// Write logs to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Render once and print the screen to stdout
    Render {
        #[command(flatten)]
        source: Source,

        /// Terminal width in columns
        #[arg(long, default_value_t = headless::DEFAULT_WIDTH)]
        width: u16,

        /// Terminal height in lines
        #[arg(long, default_value_t = headless::DEFAULT_HEIGHT)]
        height: u16,

        /// Lines to scroll down before rendering
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

#[derive(clap::Args)]
struct Source {
    /// JSON array of timeline items
    #[arg(long)]
    data: PathBuf,

    /// JSON timeline configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color theme (mocha, latte, high-contrast)
    #[arg(long, default_value = "mocha")]
    theme: String,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to load {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("render failed: {0}")]
    Render(#[from] std::io::Error),

    #[error("{0}")]
    Tui(String),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::View { source, log_file } => {
            if let Some(path) = &log_file {
                logging::init_file(path)?;
            }
            let app = build_app(&source)?;
            timeline_tui::run_tui(app).map_err(|e| CliError::Tui(e.to_string()))
        }
        Commands::Render {
            source,
            width,
            height,
            offset,
        } => {
            logging::init_stderr()?;
            let mut app = build_app(&source)?;
            let screen = headless::render_at_offset(&mut app, width, height, offset)?;
            println!("{screen}");
            Ok(())
        }
    }
}

fn build_app(source: &Source) -> Result<App, CliError> {
    let theme =
        Theme::by_name(&source.theme).ok_or_else(|| CliError::UnknownTheme(source.theme.clone()))?;
    let items = read_items(&source.data)?;
    let config = match &source.config {
        Some(path) => read_config(path)?,
        None => TimelineConfig::default(),
    };
    info!(
        items = items.len(),
        format = ?config.column_format,
        "loaded timeline"
    );
    Ok(App::new(items, config, theme))
}

fn read_items(path: &Path) -> Result<Vec<TimelineItem>, CliError> {
    load_items(path).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })
}

fn read_config(path: &Path) -> Result<TimelineConfig, CliError> {
    TimelineConfig::load(path).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;
    use timeline_engine::ColumnFormat;

    fn source(data: PathBuf, config: Option<PathBuf>) -> Source {
        Source {
            data,
            config,
            theme: "mocha".to_string(),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_defaults() {
        let cli = Cli::parse_from(["timeline", "render", "--data", "events.json"]);
        let Commands::Render {
            width,
            height,
            offset,
            source,
        } = cli.command
        else {
            panic!("expected render command");
        };
        assert_eq!((width, height, offset), (80, 24, 0));
        assert_eq!(source.theme, "mocha");
        assert!(source.config.is_none());
    }

    #[test]
    fn test_build_app_reads_data_and_config() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("events.json");
        std::fs::write(
            &data,
            r#"[{"time": "09:00", "title": "Standup"}, {"time": "10:00", "title": "Review"}]"#,
        )
        .unwrap();
        let config = temp.path().join("config.json");
        std::fs::write(&config, r#"{"columnFormat": "two-column"}"#).unwrap();

        let app = build_app(&source(data, Some(config))).unwrap();
        assert_eq!(app.state.len(), 2);
        assert_eq!(
            app.state.timeline().config().column_format,
            ColumnFormat::TwoColumn
        );
    }

    #[test]
    fn test_missing_data_reports_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.json");
        let err = build_app(&source(missing, None)).unwrap_err();
        assert!(matches!(err, CliError::Load { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_demo_files_render() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        let mut app = build_app(&source(
            demos.join("events.json"),
            Some(demos.join("config.json")),
        ))
        .unwrap();
        assert_eq!(app.state.len(), 7);

        let screen = headless::render_at_offset(&mut app, 80, 24, 0).unwrap();
        assert!(screen.contains("Standup"));
        assert!(screen.contains('◉'));
    }

    #[test]
    fn test_unknown_theme() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("events.json");
        std::fs::write(&data, "[]").unwrap();
        let mut src = source(data, None);
        src.theme = "solarized".to_string();
        assert!(matches!(build_app(&src), Err(CliError::UnknownTheme(_))));
    }
}
