use thiserror::Error;

use crate::model::{DependencyArguments, DependencyName, DependencySpec, FallbackSpec};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("No dependency name given, exactly one is required")]
    MissingName,
    #[error("Exactly one dependency name is required, got {}: {}", .0.len(), .0.join(", "))]
    MultipleNames(Vec<String>),
    #[error("Dependency name must not be empty")]
    EmptyName,
    #[error("Dependency {name}: repository url is required")]
    MissingRepositoryUrl { name: String },
    #[error("Dependency {name}: version pin is required")]
    MissingVersionPin { name: String },
    #[error("Dependency {name}: fallback components {components:?} given without a fallback name")]
    FallbackComponentsWithoutFallback {
        name: String,
        components: Vec<String>,
    },
}

/// Checks the shape of a resolution call.
///
/// Rules are checked in a fixed order and the first violation is returned:
/// exactly one name, a repository url, a version pin, and fallback components
/// only together with a fallback name. The last rule holds even for
/// `remote_only` calls, where fallback and components are otherwise unused.
pub fn validate(arguments: DependencyArguments) -> Result<DependencySpec, ArgumentError> {
    let DependencyArguments {
        mut names,
        repository_url,
        version_pin,
        components,
        fallback,
        fallback_components,
        remote_only,
    } = arguments;

    let name = match names.len() {
        0 => return Err(ArgumentError::MissingName),
        1 => names.remove(0),
        _ => return Err(ArgumentError::MultipleNames(names)),
    };
    if name.trim().is_empty() {
        return Err(ArgumentError::EmptyName);
    }

    let Some(repository_url) = repository_url else {
        return Err(ArgumentError::MissingRepositoryUrl { name });
    };
    let Some(version_pin) = version_pin else {
        return Err(ArgumentError::MissingVersionPin { name });
    };

    let fallback = match (fallback, fallback_components) {
        (Some(fallback), components) => Some(FallbackSpec {
            name: DependencyName::new(fallback),
            components,
        }),
        (None, components) if components.is_empty() => None,
        (None, components) => {
            return Err(ArgumentError::FallbackComponentsWithoutFallback { name, components })
        }
    };

    Ok(DependencySpec {
        name: DependencyName::new(name),
        repository_url,
        version_pin,
        components,
        remote_only,
        fallback,
    })
}
