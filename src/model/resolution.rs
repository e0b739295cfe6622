use std::{fmt::Display, path::PathBuf};

use serde::Serialize;

use super::DependencyName;

/// Which tier satisfied a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    System,
    SystemFallback,
    Fetched,
}

impl Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::System => f.write_str("system"),
            Origin::SystemFallback => f.write_str("system fallback"),
            Origin::Fetched => f.write_str("fetched"),
        }
    }
}

/// A source tree materialized by the remote fetch tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedSource {
    pub path: PathBuf,
    /// Commit hash for git checkouts, the requested revision for svn.
    pub revision: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    /// The name to link or build against. For a fallback hit this is the
    /// fallback's name, not the requested one.
    pub name: DependencyName,
    pub origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<FetchedSource>,
}

impl ResolutionResult {
    pub fn system(name: DependencyName) -> Self {
        ResolutionResult {
            name,
            origin: Origin::System,
            source: None,
        }
    }

    pub fn fallback(name: DependencyName) -> Self {
        ResolutionResult {
            name,
            origin: Origin::SystemFallback,
            source: None,
        }
    }

    pub fn fetched(name: DependencyName, source: FetchedSource) -> Self {
        ResolutionResult {
            name,
            origin: Origin::Fetched,
            source: Some(source),
        }
    }
}
