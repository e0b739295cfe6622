use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Clone, Hash, Deserialize, Serialize, Debug, PartialEq, Eq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct DependencyName(String);

impl DependencyName {
    pub fn new(s: String) -> Self {
        DependencyName(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DependencyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DependencyName {
    fn from(s: String) -> Self {
        DependencyName(s)
    }
}

impl From<&str> for DependencyName {
    fn from(s: &str) -> Self {
        DependencyName(s.to_string())
    }
}

/// The unvalidated argument bundle of a single resolution call, as it comes
/// from the command line or from a manifest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyArguments {
    pub names: Vec<String>,
    pub repository_url: Option<String>,
    pub version_pin: Option<String>,
    pub components: Vec<String>,
    pub fallback: Option<String>,
    pub fallback_components: Vec<String>,
    pub remote_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackSpec {
    pub name: DependencyName,
    pub components: Vec<String>,
}

/// A dependency that passed argument validation.
///
/// `components` and `fallback` are kept even when `remote_only` is set, but
/// the resolver never looks at them in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    pub name: DependencyName,
    pub repository_url: String,
    pub version_pin: String,
    pub components: Vec<String>,
    pub remote_only: bool,
    pub fallback: Option<FallbackSpec>,
}
