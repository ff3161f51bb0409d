use chrono::{DateTime, Utc};

/// Fixed timestamp format used for every rendered timestamp and for the
/// `updated:` range sent to the search API.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Human-readable form of the format accepted by `--since` (RFC 3339).
pub const SINCE_FORMAT_HINT: &str = "YYYY-MM-DDTHH:MM:SS+HH:MM (RFC 3339, e.g. 2023-01-01T00:00:00Z)";

/// Format a timestamp with [`TIME_FORMAT`].
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(TIME_FORMAT).to_string()
}
