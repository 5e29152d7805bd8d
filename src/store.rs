//! Flat-file store for the manifest and per-year film lists
//!
//! Every write is pretty-printed with 2-space indentation so the data
//! files stay hand-diffable in the dataset checkout. Nothing is cached;
//! each request re-reads from disk.
//!
//! The manifest is handled as an opaque JSON object and mutated
//! field-wise, so fields the editor adds out-of-band (e.g.
//! `nominationsAnnounced`) survive a rewrite untouched.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Path of a year's film list: `oscars<year>.json` under the data dir.
pub fn film_file(data_dir: &Path, year: &str) -> PathBuf {
    data_dir.join(format!("oscars{year}.json"))
}

/// Path of the manifest document.
pub fn manifest_file(data_dir: &Path) -> PathBuf {
    data_dir.join("manifest.json")
}

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a JSON document pretty-printed (2-space indent).
pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Apply the bookkeeping a film save performs on the manifest: bump the
/// patch version, refresh `lastUpdated`, optionally replace the
/// changelog, and sync the matching year entry's `filmCount`.
///
/// A year with no entry in `manifest.years` is silently skipped; the
/// manifest is never auto-extended. Returns the new version string.
pub fn update_manifest_for_save(
    manifest: &mut Value,
    year: &str,
    film_count: usize,
    changelog: Option<&str>,
) -> Result<String> {
    let version = manifest
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::Internal("manifest has no version string".to_string()))?;
    let bumped = bump_patch(version)?;

    manifest["version"] = Value::String(bumped.clone());
    manifest["lastUpdated"] = Value::String(now_timestamp());

    // An empty changelog note is treated as absent
    if let Some(note) = changelog.filter(|note| !note.is_empty()) {
        manifest["changelog"] = Value::String(note.to_string());
    }

    if let Some(years) = manifest.get_mut("years").and_then(Value::as_array_mut) {
        if let Some(entry) = years.iter_mut().find(|y| year_id_matches(y, year)) {
            entry["filmCount"] = Value::from(film_count);
        }
    }

    Ok(bumped)
}

/// Increment the patch component of a `MAJOR.MINOR.PATCH` string.
///
/// No carry into minor/major; components beyond the third are kept
/// as-is.
fn bump_patch(version: &str) -> Result<String> {
    let mut parts: Vec<String> = version.split('.').map(str::to_string).collect();
    let patch = parts
        .get(2)
        .ok_or_else(|| ApiError::Internal(format!("malformed manifest version: {version}")))?
        .parse::<u64>()
        .map_err(|e| ApiError::Internal(format!("malformed manifest version {version}: {e}")))?;
    parts[2] = (patch + 1).to_string();
    Ok(parts.join("."))
}

/// Current time as RFC 3339 with millisecond precision and `Z` suffix,
/// the format the editor already stores in `lastUpdated`.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Strict string match on the entry's `id`. A numeric `id` never
/// matches the path segment and is skipped like any unknown year.
fn year_id_matches(entry: &Value, year: &str) -> bool {
    entry.get("id").and_then(Value::as_str) == Some(year)
}
