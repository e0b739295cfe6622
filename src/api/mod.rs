use std::{error::Error, path::PathBuf};

use crate::{
    cli::command_handlers::{do_clear_cache, do_resolve, do_resolve_manifest},
    fetch::RemoteFetcher,
    model::{DependencyArguments, ResolutionResult},
    registry::PkgConfigRegistry,
    resolver::{DependencyResolver, ResolveError},
};

mod builder;

pub use builder::FetchdepBuilder;

pub struct Fetchdep {
    resolver: DependencyResolver<PkgConfigRegistry, RemoteFetcher>,
    root: PathBuf,
    manifest_file_name: PathBuf,
}

impl Fetchdep {
    pub fn builder() -> FetchdepBuilder {
        FetchdepBuilder::default()
    }

    /// Validates the arguments and resolves one dependency
    pub fn resolve(&self, arguments: DependencyArguments) -> Result<ResolutionResult, ResolveError> {
        do_resolve(&self.resolver, arguments)
    }

    /// Resolves every dependency listed in the manifest, in file order
    pub fn resolve_manifest(&self) -> Result<Vec<ResolutionResult>, Box<dyn Error>> {
        do_resolve_manifest(&self.resolver, &self.root.join(&self.manifest_file_name))
    }

    /// Deletes the git object cache
    pub fn clear_cache(&self) -> Result<(), Box<dyn Error>> {
        do_clear_cache(self.resolver.fetcher())
    }
}
