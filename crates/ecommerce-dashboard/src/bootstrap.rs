use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use chrono::NaiveDate;
use dashboard_core::models::DateRange;
use dashboard_core::settings::APP_DIR_NAME;
use dashboard_core::DashboardError;
use dashboard_ui::components::logo::Logo;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name looked up next to the dataset when `--logo` is not given.
pub const DEFAULT_LOGO: &str = "logo.png";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.ecommerce-dashboard/` and its `logs/` subdirectory exist.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    ensure_directories_in(&home)
}

/// Create the state directory hierarchy under `home`; returns the app
/// directory.
pub fn ensure_directories_in(home: &Path) -> anyhow::Result<PathBuf> {
    let app_dir = home.join(APP_DIR_NAME);
    std::fs::create_dir_all(app_dir.join("logs"))
        .with_context(|| format!("creating {}", app_dir.display()))?;
    Ok(app_dir)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to an [`EnvFilter`] directive.
pub fn filter_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber, appending to `log_file`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout or
/// stderr. `RUST_LOG`, when set, takes precedence over `log_level`.
pub fn setup_logging(log_level: &str, log_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("opening log file {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(log_level)));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Locations searched for a dataset when `--data` is not given, relative to
/// `base`: `dashboard/`, `data/`, then `base` itself.
pub fn data_path_candidates(base: &Path) -> [PathBuf; 3] {
    [
        base.join("dashboard"),
        base.join("data"),
        base.to_path_buf(),
    ]
}

/// First candidate under the working directory that holds a dataset file.
pub fn discover_data_path() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    discover_data_path_in(&cwd)
}

pub fn discover_data_path_in(base: &Path) -> Option<PathBuf> {
    data_path_candidates(base)
        .into_iter()
        .filter(|p| p.is_dir())
        .find(|p| !dashboard_data::reader::find_dataset_files(p).is_empty())
}

// ── Initial date range ─────────────────────────────────────────────────────────

/// Combine `--start-date` / `--end-date` with the dataset's bounds. A missing
/// bound falls back to the dataset's; `None` when neither is given or the
/// dataset is empty.
pub fn initial_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    bounds: Option<DateRange>,
) -> Option<DateRange> {
    let bounds = bounds?;
    if start.is_none() && end.is_none() {
        return None;
    }
    Some(DateRange::new(
        start.unwrap_or(bounds.start),
        end.unwrap_or(bounds.end),
    ))
}

// ── Logo ───────────────────────────────────────────────────────────────────────

/// The logo path: `--logo` if given, otherwise [`DEFAULT_LOGO`] in the
/// dataset's directory.
pub fn resolve_logo_path(explicit: Option<&Path>, dataset: &Path) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => dataset
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(DEFAULT_LOGO),
    }
}

/// Read the logo; a missing file is an [`DashboardError::AssetNotFound`].
pub fn load_logo(path: &Path) -> dashboard_core::Result<Logo> {
    if !path.is_file() {
        return Err(DashboardError::AssetNotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Logo::from_bytes(path, &bytes))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
