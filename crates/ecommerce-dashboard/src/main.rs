mod bootstrap;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_data::reader::{load_dataset, resolve_dataset_path};
use dashboard_runtime::data_manager::DataManager;
use dashboard_ui::app::{App, Section};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    let app_dir = bootstrap::ensure_directories()?;
    let log_file = settings
        .log_file
        .clone()
        .unwrap_or_else(|| app_dir.join("logs").join("dashboard.log"));
    bootstrap::setup_logging(&settings.log_level, &log_file)?;

    tracing::info!("E-commerce dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    let data_arg = match settings.data.clone() {
        Some(path) => path,
        None => bootstrap::discover_data_path().context(
            "no dataset found in ./dashboard, ./data or the working directory; pass --data",
        )?,
    };
    let dataset_path = resolve_dataset_path(&data_arg)
        .with_context(|| format!("locating dataset from {}", data_arg.display()))?;

    let logo_path = bootstrap::resolve_logo_path(settings.logo.as_deref(), &dataset_path);
    let logo = bootstrap::load_logo(&logo_path)?;

    let dataset = load_dataset(&dataset_path)
        .with_context(|| format!("loading {}", dataset_path.display()))?;
    tracing::info!(
        rows = dataset.len(),
        path = %dataset_path.display(),
        "dataset loaded"
    );

    let initial = bootstrap::initial_range(
        settings.start_date,
        settings.end_date,
        dataset.date_bounds(),
    );
    let manager = DataManager::new(dataset, initial);

    let section = Section::from_name(&settings.view).unwrap_or(Section::Orders);
    let app = App::new(&settings.theme, section, logo, manager);

    // The loop exits on 'q' / Ctrl+C inside the TUI. The OS-level handler
    // covers signals delivered outside raw mode.
    tokio::select! {
        result = app.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down");
        }
    }

    Ok(())
}
