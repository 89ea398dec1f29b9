mod app;
mod cover;
mod format;
mod headless;
mod keyboard;
mod screen;
mod style;
mod theme;
mod widgets;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use kensaku_api::MediaKind;
use kensaku_core::config::AppConfig;

use crate::screen::Page;

const DEFAULT_FILTER: &str = "kensaku=info,kensaku_core=info,kensaku_api=info";
const VERBOSE_FILTER: &str = "kensaku=debug,kensaku_core=debug,kensaku_api=debug";

#[derive(Debug, Parser)]
#[command(name = "kensaku", version, about = "Look up anime and manga by MyAnimeList ID")]
struct Cli {
    /// Read queries from stdin and print results instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Look up manga instead of anime
    #[arg(long)]
    manga: bool,

    /// Quiet period after the last keystroke before a lookup is sent
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Config file to use instead of the per-user one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write logs to a daily rotated file in this directory
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Debug-level logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load config");
            eprintln!("kensaku: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(ms) = cli.debounce_ms {
        config.search.debounce_ms = ms;
    }

    let kind = if cli.manga {
        MediaKind::Manga
    } else {
        MediaKind::Anime
    };

    if cli.headless {
        return match headless::run(&config, kind) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "headless run failed");
                ExitCode::FAILURE
            }
        };
    }

    let start = if cli.manga {
        Page::Lookup(MediaKind::Manga)
    } else {
        Page::Landing
    };
    let boot = app::Boot { config, start };

    let win = iced::window::Settings {
        size: iced::Size::new(960.0, 720.0),
        min_size: Some(iced::Size::new(560.0, 480.0)),
        position: iced::window::Position::Centered,
        ..Default::default()
    };

    let result = iced::application(
        move || app::Kensaku::new(boot.clone()),
        app::Kensaku::update,
        app::Kensaku::view,
    )
    .title(app::Kensaku::title)
    .subscription(app::Kensaku::subscription)
    .theme(app::Kensaku::theme)
    .font(lucide_icons::LUCIDE_FONT_BYTES)
    .window(win)
    .run();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "window closed with an error");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, kensaku_core::KensakuError> {
    match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

/// stderr always; a daily rolling file too when `log_dir` is given. The
/// returned guard flushes the file writer and must outlive the app.
fn init_tracing(verbose: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "kensaku.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "kensaku",
            "--headless",
            "--manga",
            "--debounce-ms",
            "250",
            "-v",
        ])
        .unwrap();
        assert!(cli.headless && cli.manga && cli.verbose);
        assert_eq!(cli.debounce_ms, Some(250));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_rejects_bad_debounce() {
        assert!(Cli::try_parse_from(["kensaku", "--debounce-ms", "soon"]).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\ndebounce_ms = 400\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.search.debounce_ms, 400);
        assert!(!config.search.discard_stale_responses);
    }
}
