//! Plain-text rendering of list and detail reports.
//!
//! Both renderers are pure: they return the whole report as one `String`
//! that the caller hands to the local sink and, optionally, the relay.

use std::fmt;

use crate::types::{AggregatedReport, IssueDetail, RepoOutcome};
use crate::util::format_timestamp;

/// Render a list report.
///
/// Buckets are emitted in order; a bucket with no items emits nothing, not
/// even its header. Each item is `<timestamp> <url> <title>`.
pub fn render_list(report: &AggregatedReport) -> String {
    report.to_string()
}

/// Render a single issue or pull request with its comments.
pub fn render_detail(detail: &IssueDetail) -> String {
    detail.to_string()
}

impl fmt::Display for AggregatedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bucket in &self.buckets {
            match &bucket.outcome {
                RepoOutcome::Items(items) if items.is_empty() => {}
                RepoOutcome::Items(items) => {
                    writeln!(f, "{}", bucket.repo)?;
                    for item in items {
                        writeln!(
                            f,
                            "{} {} {}",
                            format_timestamp(&item.updated_at),
                            item.url,
                            item.title
                        )?;
                    }
                }
                RepoOutcome::Failed(message) => {
                    writeln!(f, "{}", bucket.repo)?;
                    writeln!(f, "error: {message}")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for IssueDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Created at {}", format_timestamp(&self.created_at))?;
        writeln!(f, "Message:\n {}", self.body)?;
        for comment in &self.comments {
            writeln!(f, "Comment:\n {}", comment.body)?;
        }
        Ok(())
    }
}
