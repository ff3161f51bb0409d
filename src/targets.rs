//! Expansion of user-supplied repository arguments into concrete targets.

use crate::error::ReportError;
use crate::types::RepoRef;

/// Resolve repository arguments into an ordered list of targets.
///
/// Each argument is `owner/name` (its owner wins for that entry only), a
/// GitHub URL, or a bare `name` combined with `owner`. With no arguments the
/// configured defaults are used.
///
/// Order is preserved and duplicates are passed through untouched: naming a
/// repository twice reports it twice.
pub fn resolve_targets(
    owner: &str,
    args: &[String],
    defaults: &[RepoRef],
) -> Result<Vec<RepoRef>, ReportError> {
    if args.is_empty() {
        if defaults.is_empty() {
            return Err(ReportError::NoRepositoriesSpecified);
        }
        return Ok(defaults.to_vec());
    }

    args.iter().map(|arg| resolve_target(owner, arg)).collect()
}

/// Resolve a single repository argument against `owner`.
pub fn resolve_target(owner: &str, arg: &str) -> Result<RepoRef, ReportError> {
    let arg = arg.trim();
    if let Some(repo) = repo_from_url(arg) {
        return Ok(repo);
    }
    if arg.contains('/') {
        return RepoRef::from_full_name(arg).ok_or_else(|| ReportError::InvalidRepository {
            value: arg.to_owned(),
        });
    }
    if arg.is_empty() {
        return Err(ReportError::InvalidRepository {
            value: arg.to_owned(),
        });
    }
    let owner = owner.trim();
    if owner.is_empty() {
        return Err(ReportError::MissingOwner {
            repo: arg.to_owned(),
        });
    }
    Ok(RepoRef::new(owner, arg))
}

/// Resolve the repository of a single-item command.
///
/// Same rules as [`resolve_target`], except that a bare name with no owner
/// falls back to the first configured default repository of that name.
pub fn resolve_detail_target(
    owner: &str,
    arg: &str,
    defaults: &[RepoRef],
) -> Result<RepoRef, ReportError> {
    match resolve_target(owner, arg) {
        Err(ReportError::MissingOwner { repo }) => defaults
            .iter()
            .find(|d| d.name == repo)
            .cloned()
            .ok_or(ReportError::MissingOwner { repo }),
        other => other,
    }
}

/// Extract `owner/name` from `https://<host>/<owner>/<name>[/...]`.
fn repo_from_url(url: &str) -> Option<RepoRef> {
    let after_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let after_host = after_scheme.split_once('/')?.1;
    let mut parts = after_host.splitn(3, '/');
    let owner = parts.next().filter(|s| !s.is_empty())?;
    let name = parts.next().filter(|s| !s.is_empty())?;
    let name = name.strip_suffix(".git").unwrap_or(name);
    Some(RepoRef::new(owner, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn preserves_argument_order() {
        let targets = resolve_targets("acme", &args(&["repo1", "other/repo2"]), &[]).unwrap();
        assert_eq!(
            targets,
            vec![RepoRef::new("acme", "repo1"), RepoRef::new("other", "repo2")]
        );
    }

    #[test]
    fn duplicates_are_passed_through() {
        let targets = resolve_targets("acme", &args(&["repo1", "repo1"]), &[]).unwrap();
        assert_eq!(
            targets,
            vec![RepoRef::new("acme", "repo1"), RepoRef::new("acme", "repo1")]
        );
    }

    #[test]
    fn bare_name_without_owner_fails() {
        let err = resolve_targets("", &args(&["repo1"]), &[]).unwrap_err();
        assert!(matches!(err, ReportError::MissingOwner { repo } if repo == "repo1"));
    }

    #[test]
    fn qualified_name_needs_no_owner() {
        let targets = resolve_targets("", &args(&["acme/api"]), &[]).unwrap();
        assert_eq!(targets, vec![RepoRef::new("acme", "api")]);
    }

    #[test]
    fn falls_back_to_defaults() {
        let defaults = vec![RepoRef::new("acme", "api"), RepoRef::new("acme", "web")];
        let targets = resolve_targets("ignored", &[], &defaults).unwrap();
        assert_eq!(targets, defaults);
    }

    #[test]
    fn nothing_to_resolve_fails() {
        let err = resolve_targets("acme", &[], &[]).unwrap_err();
        assert!(matches!(err, ReportError::NoRepositoriesSpecified));
    }

    #[test]
    fn malformed_qualified_name_fails() {
        let err = resolve_targets("acme", &args(&["/api"]), &[]).unwrap_err();
        assert!(matches!(err, ReportError::InvalidRepository { .. }));
    }

    #[test]
    fn accepts_repository_urls() {
        let targets = resolve_targets(
            "",
            &args(&["https://github.com/acme/api.git", "https://ghe.corp/acme/web/issues"]),
            &[],
        )
        .unwrap();
        assert_eq!(
            targets,
            vec![RepoRef::new("acme", "api"), RepoRef::new("acme", "web")]
        );
    }

    #[test]
    fn detail_target_uses_default_with_matching_name() {
        let defaults = vec![RepoRef::new("acme", "api"), RepoRef::new("other", "web")];
        let repo = resolve_detail_target("", "web", &defaults).unwrap();
        assert_eq!(repo, RepoRef::new("other", "web"));
    }

    #[test]
    fn detail_target_prefers_owner_over_defaults() {
        let defaults = vec![RepoRef::new("other", "web")];
        let repo = resolve_detail_target("acme", "web", &defaults).unwrap();
        assert_eq!(repo, RepoRef::new("acme", "web"));
    }

    #[test]
    fn detail_target_without_any_owner_fails() {
        let err = resolve_detail_target("", "web", &[]).unwrap_err();
        assert!(matches!(err, ReportError::MissingOwner { .. }));
    }
}
