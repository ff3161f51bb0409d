use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Records returned by the forge collaborator
// ---------------------------------------------------------------------------

/// An issue or pull request as returned by the forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeIssue {
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub html_url: String,
    pub title: String,
    pub body: String,
}

/// A single conversation comment on an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeComment {
    pub body: String,
}

// ---------------------------------------------------------------------------
// Report domain types
// ---------------------------------------------------------------------------

/// One line of the list report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportItem {
    pub updated_at: DateTime<Utc>,
    pub url: String,
    pub title: String,
}

impl From<ForgeIssue> for ReportItem {
    fn from(issue: ForgeIssue) -> Self {
        Self {
            updated_at: issue.updated_at,
            url: issue.html_url,
            title: issue.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub body: String,
}

/// A single issue or pull request with the head of its comment thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDetail {
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub body: String,
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn report_item_keeps_url_title_and_update_time() {
        let updated_at = Utc.with_ymd_and_hms(2024, 3, 10, 10, 30, 0).unwrap();
        let issue = ForgeIssue {
            updated_at,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            html_url: "https://github.com/acme/api/issues/1".to_owned(),
            title: "First bug".to_owned(),
            body: "ignored".to_owned(),
        };

        assert_eq!(
            ReportItem::from(issue),
            ReportItem {
                updated_at,
                url: "https://github.com/acme/api/issues/1".to_owned(),
                title: "First bug".to_owned(),
            }
        );
    }
}
