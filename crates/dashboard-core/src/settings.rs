use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-user state directory under `$HOME`.
pub const APP_DIR_NAME: &str = ".ecommerce-dashboard";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive e-commerce analytics dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ecommerce-dashboard",
    about = "Interactive analytics dashboard over an e-commerce order dataset",
    version
)]
pub struct Settings {
    /// Dataset file (.csv.gz or .csv) or a directory containing one
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Logo file shown in the sidebar (defaults to logo.png next to the dataset)
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// First purchase date to include (YYYY-MM-DD, defaults to the dataset start)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last purchase date to include (YYYY-MM-DD, defaults to the dataset end)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Section shown at startup
    #[arg(long, default_value = "orders", value_parser = ["orders", "products", "customers", "rfm", "delivery"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (defaults to ~/.ecommerce-dashboard/logs/dashboard.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved display preferences
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Display preferences persisted to `~/.ecommerce-dashboard/last_used.json`.
///
/// The date filter is deliberately absent: every run starts from the
/// dataset's full range or the explicit `--start-date` / `--end-date`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,
}

impl LastUsedParams {
    /// Default location of the preferences file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Preferences file rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(APP_DIR_NAME).join("last_used.json")
    }

    /// Load from an explicit path; `Default` when absent or unreadable.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(params) => params,
            Err(e) => {
                tracing::warn!("ignoring unreadable preferences {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write to an explicit path via a temp file and rename.
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the preferences file at `path` if it exists.
    pub fn clear_at(path: &Path) -> crate::Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, fill unset display preferences from the last run
    /// and persist the merged result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Testable core of [`Settings::load_with_last_used`].
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("could not clear preferences: {}", e);
            }
            return settings.apply_debug_flag();
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins over persisted values.
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if settings.data.is_none() {
            settings.data = last.data_path;
        }
        if settings.logo.is_none() {
            settings.logo = last.logo_path;
        }

        settings = settings.apply_debug_flag();

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!("could not persist preferences: {}", e);
        }

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug_flag(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            view: Some(s.view.clone()),
            data_path: s.data.clone(),
            logo_path: s.logo.clone(),
        }
    }
}

/// `true` when `name` was given on the command line rather than defaulted.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
