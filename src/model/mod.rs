use thiserror::Error;

pub mod dependency;
pub mod manifest;
pub mod resolution;

pub use dependency::{DependencyArguments, DependencyName, DependencySpec, FallbackSpec};
pub use manifest::Manifest;
pub use resolution::{FetchedSource, Origin, ResolutionResult};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading manifest toml: {0}")]
    IO(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Dependency `{0}` must be a table")]
    NotATable(String),
    #[error("Invalid value for `{key}` in dependency `{dependency}`: {source}")]
    InvalidField {
        dependency: String,
        key: String,
        source: toml::de::Error,
    },
}
