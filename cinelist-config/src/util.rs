use std::time::Duration;

use crate::loader::error::ConfigLoadError;

/// Treats blank values the same as missing ones.
pub fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Parses a humantime duration (`"30s"`, `"5m"`, `"1h 30m"`). A bare
/// integer is read as seconds.
pub fn parse_duration(key: &str, raw: &str) -> Result<Duration, ConfigLoadError> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(raw)
        .map_err(|e| ConfigLoadError::invalid(key, e.to_string()))
}
