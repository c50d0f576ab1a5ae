//! Results directory persistence
//!
//! A benchmarked system owns one directory holding:
//! - `raw_results.json`: aggregated run-sets per domain ([`RawResults`])
//! - `normalized_results.json`: scores derived from them ([`NormalizedResults`])
//! - `benchmark_report.txt`: the human-readable report of both
//!
//! Both files are pretty-printed JSON. The directory name doubles as the
//! system name unless the caller supplies one.

use crate::error::ResultsError;
use crate::models::{NormalizedResults, RawResults, RunRecord, SystemRecord};
use crate::performance::Normalizer;
use crate::report;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

pub const RAW_RESULTS_FILE: &str = "raw_results.json";
pub const NORMALIZED_RESULTS_FILE: &str = "normalized_results.json";
pub const BENCHMARK_REPORT_FILE: &str = "benchmark_report.txt";

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ResultsError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ResultsError::MissingFile(path.to_path_buf())
        } else {
            ResultsError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|source| ResultsError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ResultsError> {
    let content = serde_json::to_string_pretty(value).map_err(|source| ResultsError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, content)?;
    log::debug!("[Results] Wrote {}", path.display());
    Ok(())
}

pub fn load_raw_results(dir: &Path) -> Result<RawResults, ResultsError> {
    read_json(&dir.join(RAW_RESULTS_FILE))
}

pub fn save_raw_results(dir: &Path, raw: &RawResults) -> Result<(), ResultsError> {
    fs::create_dir_all(dir)?;
    write_json(&dir.join(RAW_RESULTS_FILE), raw)
}

pub fn load_normalized_results(dir: &Path) -> Result<NormalizedResults, ResultsError> {
    read_json(&dir.join(NORMALIZED_RESULTS_FILE))
}

pub fn save_normalized_results(dir: &Path, normalized: &NormalizedResults) -> Result<(), ResultsError> {
    fs::create_dir_all(dir)?;
    write_json(&dir.join(NORMALIZED_RESULTS_FILE), normalized)
}

/// Read a JSON array of individual run records (the input of `aggregate`).
pub fn load_run_records(path: &Path) -> Result<Vec<RunRecord>, ResultsError> {
    read_json(path)
}

/// Directory name of `dir`, falling back to the path as given.
fn system_name_from_dir(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Load a system's normalized results as a comparison record.
///
/// `name` defaults to the directory name.
pub fn load_system(dir: &Path, name: Option<&str>, cost: Option<f64>) -> Result<SystemRecord, ResultsError> {
    let normalized = load_normalized_results(dir)?;
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| system_name_from_dir(dir));

    log::info!(
        "[Results] Loaded system '{}' from {} (overall {:.2})",
        name,
        dir.display(),
        normalized.overall_score
    );
    Ok(SystemRecord::new(name, normalized, cost))
}

/// Render and write `benchmark_report.txt`.
pub fn save_benchmark_report(
    dir: &Path,
    raw: &RawResults,
    normalized: &NormalizedResults,
) -> Result<(), ResultsError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(BENCHMARK_REPORT_FILE);
    fs::write(&path, report::render_benchmark_report(raw, normalized))?;
    log::debug!("[Results] Wrote {}", path.display());
    Ok(())
}

/// Normalize `raw_results.json` in place, writing `normalized_results.json`
/// and `benchmark_report.txt`.
pub fn normalize_directory(dir: &Path, normalizer: &Normalizer) -> Result<NormalizedResults, ResultsError> {
    let raw = load_raw_results(dir)?;
    if raw.is_empty() {
        log::warn!("[Results] {} has no benchmark domains", dir.display());
    }

    let normalized = normalizer.normalize(&raw);
    save_normalized_results(dir, &normalized)?;
    save_benchmark_report(dir, &raw, &normalized)?;

    log::info!(
        "[Results] Normalized {} (overall score {:.2})",
        dir.display(),
        normalized.overall_score
    );
    Ok(normalized)
}
