use std::fmt;

/// Identity of a target repository: `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Parse `"owner/name"` into a `RepoRef`.
    ///
    /// Both components must be non-empty and the name may not contain a
    /// further `/`.
    pub fn from_full_name(s: &str) -> Option<Self> {
        let (owner, name) = s.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name))
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_round_trip() {
        let repo = RepoRef::from_full_name("acme/api").unwrap();
        assert_eq!(repo, RepoRef::new("acme", "api"));
        assert_eq!(repo.to_string(), "acme/api");
    }

    #[test]
    fn rejects_empty_components() {
        assert!(RepoRef::from_full_name("/api").is_none());
        assert!(RepoRef::from_full_name("acme/").is_none());
        assert!(RepoRef::from_full_name("acme").is_none());
        assert!(RepoRef::from_full_name("acme/api/extra").is_none());
    }
}
