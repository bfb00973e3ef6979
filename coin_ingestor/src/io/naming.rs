use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use snafu::ResultExt;

use crate::io::sink::{IoSnafu, OutputTarget, SinkError};

/// Default export filename: `<coin_id>_<kind>_<YYYYMMDD_HHMMSS>.<ext>`.
///
/// Second resolution only, so two exports of the same kind within one second
/// collide; the later one overwrites the earlier.
pub fn default_filename(coin_id: &str, kind: &str, ext: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}_{}.{}", coin_id, kind, at.format("%Y%m%d_%H%M%S"), ext)
}

/// Turns an [`OutputTarget`] into a concrete path, creating parent directories as needed.
pub fn resolve_target(
    target: &OutputTarget,
    coin_id: &str,
    kind: &str,
    ext: &str,
    at: DateTime<Utc>,
) -> Result<PathBuf, SinkError> {
    let path = match target {
        OutputTarget::File(p) => p.clone(),
        OutputTarget::Dir(dir) => dir.join(default_filename(coin_id, kind, ext, at)),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).context(IoSnafu { path: parent })?;
        }
    }

    Ok(path)
}
