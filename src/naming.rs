//! Output paths for intermediate capture files.

use std::fmt::{Display, Write};
use std::path::PathBuf;

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, warn};

use crate::clients::models::SearchModel;
use crate::config::FileNamingConfig;
use crate::error::PersistenceError;

const FINGERPRINT_LEN: usize = 8;
const FALLBACK_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// First 8 hex digits of the query's MD5 digest, or `"default"` for an empty query.
pub fn query_fingerprint(query: &str) -> String {
    if query.is_empty() {
        return "default".to_string();
    }
    let digest = format!("{:x}", md5::compute(query.as_bytes()));
    digest[..FINGERPRINT_LEN].to_string()
}

/// Query shortened to `max_len` characters for log output.
pub fn query_preview(query: &str, max_len: usize) -> String {
    match query.char_indices().nth(max_len) {
        Some((idx, _)) => format!("{}...", &query[..idx]),
        None => query.to_string(),
    }
}

fn format_timestamp<Tz>(timestamp: &DateTime<Tz>, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut stamp = String::new();
    if write!(stamp, "{}", timestamp.format(format)).is_err() {
        warn!(format, "invalid timestamp format, falling back to default");
        stamp.clear();
        let _ = write!(stamp, "{}", timestamp.format(FALLBACK_TIMESTAMP_FORMAT));
    }
    stamp
}

/// Build the capture path for `model_id` and `query` at `timestamp`,
/// creating the output directory if needed.
pub fn generate_path<Tz>(
    config: &FileNamingConfig,
    model_id: &str,
    query: &str,
    timestamp: &DateTime<Tz>,
) -> Result<PathBuf, PersistenceError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let model = SearchModel::from_id(model_id);
    let fingerprint = query_fingerprint(query);

    let filename = config
        .filename_format
        .replace("{model}", model.id())
        .replace("{timestamp}", &format_timestamp(timestamp, &config.timestamp_format))
        .replace("{query_hash}", &fingerprint);

    if !config.output_dir.exists() {
        std::fs::create_dir_all(&config.output_dir).map_err(|source| PersistenceError::CreateDir {
            path: config.output_dir.clone(),
            source,
        })?;
    }

    let path = config.output_dir.join(filename);
    debug!(
        path = %path.display(),
        model = %model.display_name(),
        query = %query_preview(query, config.max_query_length),
        "Generated capture path"
    );
    Ok(path)
}

/// [`generate_path`] at the current local time.
pub fn output_path(config: &FileNamingConfig, model_id: &str, query: &str) -> Result<PathBuf, PersistenceError> {
    generate_path(config, model_id, query, &Local::now())
}
