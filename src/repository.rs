use std::fmt::Display;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    Git,
    Svn,
}

/// How a version pin is interpreted by a repository kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinKind {
    /// Tag, branch or commit hash.
    Tag,
    Revision,
}

/// URL suffixes that select a kind. Anything not listed here is `DEFAULT_KIND`.
const SUFFIXES: &[(&str, RepositoryKind)] = &[(".git", RepositoryKind::Git)];

const DEFAULT_KIND: RepositoryKind = RepositoryKind::Svn;

impl RepositoryKind {
    /// Classifies a repository by the tail of its url.
    ///
    /// This is a suffix match only: no normalization of trailing slashes or
    /// query strings, and no check that the url is well formed. Short and
    /// empty urls fall to the default kind.
    pub fn infer(url: &str) -> RepositoryKind {
        SUFFIXES
            .iter()
            .find(|(suffix, _)| url.as_bytes().ends_with(suffix.as_bytes()))
            .map(|(_, kind)| *kind)
            .unwrap_or(DEFAULT_KIND)
    }

    pub fn pin_kind(&self) -> PinKind {
        match self {
            RepositoryKind::Git => PinKind::Tag,
            RepositoryKind::Svn => PinKind::Revision,
        }
    }
}

impl Display for RepositoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryKind::Git => f.write_str("git"),
            RepositoryKind::Svn => f.write_str("svn"),
        }
    }
}

impl Display for PinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinKind::Tag => f.write_str("tag"),
            PinKind::Revision => f.write_str("revision"),
        }
    }
}
