use std::{env, error::Error, ffi::OsString, path::PathBuf};

use crate::{
    fetch::RemoteFetcher, registry::PkgConfigRegistry, resolver::DependencyResolver,
    svn::SvnCheckout, Fetchdep,
};

#[derive(Default)]
pub struct FetchdepBuilder {
    // All other paths are relative to `root`
    root: Option<PathBuf>,
    manifest_file_name: Option<PathBuf>,
    cache_directory_path: Option<PathBuf>,
    sources_directory_name: Option<PathBuf>,
    registry_program: Option<OsString>,
    svn_program: Option<OsString>,
}

impl FetchdepBuilder {
    /// Project root directory.
    ///
    /// Defaults to the current directory.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Name of the manifest listing dependencies.
    ///
    /// Defaults to `fetchdep.toml`.
    pub fn manifest_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_file_name = Some(path.into());
        self
    }

    /// Location of the git object cache, created on the first git fetch.
    ///
    /// Defaults to `$HOME/.fetchdep/cache`.
    pub fn cache_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_directory_path = Some(path.into());
        self
    }

    /// Directory that fetched sources are checked out into, one subdirectory
    /// per dependency.
    ///
    /// Defaults to `_deps`.
    pub fn sources_directory_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources_directory_name = Some(path.into());
        self
    }

    /// Program queried for installed packages.
    ///
    /// Defaults to `pkg-config`.
    pub fn registry_program(mut self, program: impl Into<OsString>) -> Self {
        self.registry_program = Some(program.into());
        self
    }

    /// Subversion client used for svn checkouts.
    ///
    /// Defaults to `svn`.
    pub fn svn_program(mut self, program: impl Into<OsString>) -> Self {
        self.svn_program = Some(program.into());
        self
    }

    pub fn try_build(self) -> Result<Fetchdep, Box<dyn Error>> {
        let Self {
            root,
            manifest_file_name,
            cache_directory_path,
            sources_directory_name,
            registry_program,
            svn_program,
        } = self;
        let root = match root {
            Some(root) => root,
            None => env::current_dir()?,
        };

        let manifest_file_name =
            manifest_file_name.unwrap_or_else(|| PathBuf::from("fetchdep.toml"));

        let cache_directory = cache_directory_path.map(|path| root.join(path));

        let sources_directory =
            root.join(sources_directory_name.unwrap_or_else(|| PathBuf::from("_deps")));

        let registry = registry_program
            .map(PkgConfigRegistry::new)
            .unwrap_or_default();
        let svn = svn_program.map(SvnCheckout::new).unwrap_or_default();

        let fetcher = RemoteFetcher::new(cache_directory, svn, sources_directory);

        Ok(Fetchdep {
            resolver: DependencyResolver::new(registry, fetcher),
            root,
            manifest_file_name,
        })
    }
}
