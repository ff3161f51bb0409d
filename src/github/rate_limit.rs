//! Classification of GitHub REST failures.
//!
//! GitHub signals rate limits through:
//! - HTTP 403 with "API rate limit exceeded" in the body
//! - HTTP 429 (secondary rate limit)

use http::StatusCode;

/// Status code and message of a GitHub error response, if `error` is one.
fn github_status(error: &octocrab::Error) -> Option<(StatusCode, &str)> {
    match error {
        octocrab::Error::GitHub { source, .. } => {
            Some((source.status_code, source.message.as_str()))
        }
        _ => None,
    }
}

pub(crate) fn is_not_found(error: &octocrab::Error) -> bool {
    github_status(error).is_some_and(|(status, _)| status == StatusCode::NOT_FOUND)
}

/// Check whether a GitHub response indicates a rate limit.
pub(crate) fn is_rate_limited(status: StatusCode, message: &str) -> bool {
    let msg = message.to_lowercase();
    status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && msg.contains("rate limit"))
}

/// Format a user-friendly message for a rate-limit error.
pub(crate) fn format_rate_limit_message(message: &str) -> String {
    if message.to_lowercase().contains("secondary rate limit") {
        "secondary rate limit hit; wait a moment and run again".to_owned()
    } else {
        "API rate limit exceeded; run again once the limit resets".to_owned()
    }
}

/// One-line description of a failed request.
pub(crate) fn describe(error: &octocrab::Error) -> String {
    match github_status(error) {
        Some((status, message)) if is_rate_limited(status, message) => {
            format_rate_limit_message(message)
        }
        Some((status, message)) => format!("GitHub responded with {status}: {message}"),
        None => error.to_string(),
    }
}
