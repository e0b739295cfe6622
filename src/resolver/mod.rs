use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    model::{DependencyArguments, DependencyName, DependencySpec, FetchedSource, ResolutionResult},
    repository::{PinKind, RepositoryKind},
    validate::{validate, ArgumentError},
};

/// Lookup of already installed packages.
pub trait PackageRegistry {
    /// Returns whether `name` is installed with all of `components`.
    /// An empty component list does not constrain the search.
    fn find(&self, name: &DependencyName, components: &[String]) -> anyhow::Result<bool>;
}

impl<T: PackageRegistry + ?Sized> PackageRegistry for &T {
    fn find(&self, name: &DependencyName, components: &[String]) -> anyhow::Result<bool> {
        (**self).find(name, components)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub name: DependencyName,
    pub kind: RepositoryKind,
    pub url: String,
    pub pin_kind: PinKind,
    pub pin: String,
}

/// Declares a pinned source dependency and makes its sources available.
pub trait SourceFetcher {
    fn declare_and_materialize(&self, request: &FetchRequest) -> anyhow::Result<FetchedSource>;
}

impl<T: SourceFetcher + ?Sized> SourceFetcher for &T {
    fn declare_and_materialize(&self, request: &FetchRequest) -> anyhow::Result<FetchedSource> {
        (**self).declare_and_materialize(request)
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Arguments(#[from] ArgumentError),
    #[error("Dependency {name}: failed to fetch {kind} repository {url} at {pin}: {source:#}")]
    Fetch {
        name: DependencyName,
        kind: RepositoryKind,
        url: String,
        pin: String,
        source: anyhow::Error,
    },
}

pub struct DependencyResolver<R, F> {
    registry: R,
    fetcher: F,
}

impl<R, F> DependencyResolver<R, F>
where
    R: PackageRegistry,
    F: SourceFetcher,
{
    pub fn new(registry: R, fetcher: F) -> Self {
        Self { registry, fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Validates `arguments` and resolves the dependency they describe.
    pub fn resolve_arguments(
        &self,
        arguments: DependencyArguments,
    ) -> Result<ResolutionResult, ResolveError> {
        let dependency = validate(arguments)?;
        self.resolve(&dependency)
    }

    /// Resolves a dependency from the system, then from its fallback, then
    /// from its pinned repository. `remote_only` skips the first two.
    pub fn resolve(&self, dependency: &DependencySpec) -> Result<ResolutionResult, ResolveError> {
        if dependency.remote_only {
            debug!(
                "Dependency {} is remote only, skipping system search",
                dependency.name
            );
            return self.fetch_remote(dependency);
        }

        if self.search(&dependency.name, &dependency.components) {
            info!("Found {} on the system", dependency.name);
            return Ok(ResolutionResult::system(dependency.name.clone()));
        }

        if let Some(fallback) = &dependency.fallback {
            if self.search(&fallback.name, &fallback.components) {
                info!(
                    "Found fallback {} on the system for {}",
                    fallback.name, dependency.name
                );
                return Ok(ResolutionResult::fallback(fallback.name.clone()));
            }
        }

        self.fetch_remote(dependency)
    }

    fn search(&self, name: &DependencyName, components: &[String]) -> bool {
        if components.is_empty() {
            info!("Looking for {} on the system", name);
        } else {
            info!(
                "Looking for {} on the system with components {}",
                name,
                components.join(", ")
            );
        }
        match self.registry.find(name, components) {
            Ok(found) => found,
            Err(error) => {
                warn!("System lookup of {} failed, treating it as not found: {error:#}", name);
                false
            }
        }
    }

    fn fetch_remote(&self, dependency: &DependencySpec) -> Result<ResolutionResult, ResolveError> {
        let kind = RepositoryKind::infer(&dependency.repository_url);
        let request = FetchRequest {
            name: dependency.name.clone(),
            kind,
            url: dependency.repository_url.clone(),
            pin_kind: kind.pin_kind(),
            pin: dependency.version_pin.clone(),
        };
        info!(
            "Fetching {} from {} repository {} at {} {}",
            request.name, request.kind, request.url, request.pin_kind, request.pin
        );

        let source = self
            .fetcher
            .declare_and_materialize(&request)
            .map_err(|source| ResolveError::Fetch {
                name: request.name.clone(),
                kind: request.kind,
                url: request.url.clone(),
                pin: request.pin.clone(),
                source,
            })?;

        info!(
            "Fetched {} at {} into {}",
            request.name,
            source.revision,
            source.path.display()
        );
        Ok(ResolutionResult::fetched(request.name, source))
    }
}
