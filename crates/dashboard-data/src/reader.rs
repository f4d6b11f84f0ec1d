//! Dataset discovery and loading.
//!
//! Reads the order-line export (gzip-compressed CSV, or plain CSV) into a
//! sorted [`Dataset`]. Any unreadable or malformed input is fatal: the
//! dashboard has nothing to show without its data.

use std::io::Read;
use std::path::{Path, PathBuf};

use dashboard_core::models::OrderLine;
use dashboard_core::{DashboardError, Result};
use flate2::read::GzDecoder;
use tracing::{debug, info, warn};

use crate::dataset::Dataset;

/// First two bytes of every gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find dataset files under `dir`, gzip exports first, each group sorted by
/// path.
pub fn find_dataset_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Data path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut gz: Vec<PathBuf> = Vec::new();
    let mut plain: Vec<PathBuf> = Vec::new();

    for entry in walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.ends_with(".csv.gz") {
            gz.push(entry.into_path());
        } else if name.ends_with(".csv") {
            plain.push(entry.into_path());
        }
    }

    gz.sort();
    plain.sort();
    gz.extend(plain);
    gz
}

/// Resolve `path` to a single dataset file.
///
/// A file is returned as-is; a directory is searched with
/// [`find_dataset_files`] and its first match returned.
pub fn resolve_dataset_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(DashboardError::DataPathNotFound(path.to_path_buf()));
    }
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    find_dataset_files(path)
        .into_iter()
        .next()
        .ok_or_else(|| DashboardError::NoDataFiles(path.to_path_buf()))
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load the dataset at `path` (file or directory) and sort it by purchase
/// timestamp.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file_path = resolve_dataset_path(path)?;
    let load_start = std::time::Instant::now();

    let bytes = std::fs::read(&file_path).map_err(|source| DashboardError::FileRead {
        path: file_path.clone(),
        source,
    })?;
    let csv_bytes = decompress_if_gzip(&file_path, bytes)?;
    let rows = parse_order_lines(&file_path, &csv_bytes)?;

    let dataset = Dataset::new(rows);
    info!(
        "Loaded {} order lines from {} in {:.2}s",
        dataset.len(),
        file_path.display(),
        load_start.elapsed().as_secs_f64()
    );
    Ok(dataset)
}

/// Inflate `bytes` when they start with the gzip magic number.
fn decompress_if_gzip(path: &Path, bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        debug!("{} is not gzip-compressed, reading as CSV", path.display());
        return Ok(bytes);
    }

    let mut decoder = GzDecoder::new(bytes.as_slice());
    let mut out = Vec::with_capacity(bytes.len() * 4);
    decoder
        .read_to_end(&mut out)
        .map_err(|source| DashboardError::Decompress {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(out)
}

/// Deserialise every CSV record into an [`OrderLine`].
///
/// Columns not part of the order-line model are ignored. The first bad
/// record aborts the load with its line number.
pub fn parse_order_lines(path: &Path, data: &[u8]) -> Result<Vec<OrderLine>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut rows = Vec::new();
    let mut delivered_before_purchase = 0usize;

    for result in reader.deserialize::<OrderLine>() {
        let line = result.map_err(|source| DashboardError::Csv {
            path: path.to_path_buf(),
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;

        validate(&line)?;
        if line
            .order_delivered_customer_date
            .is_some_and(|delivered| delivered < line.order_purchase_timestamp)
        {
            delivered_before_purchase += 1;
        }
        rows.push(line);
    }

    if delivered_before_purchase > 0 {
        warn!(
            "{} lines in {} were delivered before they were purchased",
            delivered_before_purchase,
            path.display()
        );
    }

    Ok(rows)
}

/// Reject records that no aggregation can use meaningfully.
fn validate(line: &OrderLine) -> Result<()> {
    if !line.price.is_finite() || line.price < 0.0 {
        return Err(DashboardError::InvalidRecord {
            order_id: line.order_id.clone(),
            reason: format!("price must be a non-negative amount, got {}", line.price),
        });
    }
    if let Some(score) = line.review_score {
        if !(1..=5).contains(&score) {
            return Err(DashboardError::InvalidRecord {
                order_id: line.order_id.clone(),
                reason: format!("review score must be between 1 and 5, got {}", score),
            });
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
