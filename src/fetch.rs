use std::{
    cell::{Cell, OnceCell},
    path::{Path, PathBuf},
};

use git2::Config;
use log::{debug, info};
use sha2::{Digest, Sha256};

use crate::{
    git::{CacheError, GitCache},
    model::FetchedSource,
    repository::RepositoryKind,
    resolver::{FetchRequest, SourceFetcher},
    svn::SvnCheckout,
};

/// Records what a materialized source directory was checked out from.
const REVISION_MARKER: &str = ".fetchdep-revision";

/// Fetches pinned sources into `<sources_directory>/<dependency name>`.
///
/// The git cache is opened and locked on the first git fetch only, so
/// resolutions that never reach a fetch leave it untouched.
pub struct RemoteFetcher {
    cache_directory: Option<PathBuf>,
    git_config: Cell<Option<Config>>,
    git: OnceCell<GitCache>,
    svn: SvnCheckout,
    sources_directory: PathBuf,
}

impl RemoteFetcher {
    /// `cache_directory` defaults to [`GitCache::default_location`].
    pub fn new(
        cache_directory: Option<PathBuf>,
        svn: SvnCheckout,
        sources_directory: PathBuf,
    ) -> Self {
        Self {
            cache_directory,
            git_config: Cell::new(None),
            git: OnceCell::new(),
            svn,
            sources_directory,
        }
    }

    /// Git configuration used for credentials instead of the user's default one.
    pub fn with_git_config(self, git_config: Config) -> Self {
        self.git_config.set(Some(git_config));
        self
    }

    pub fn cache_location(&self) -> Result<PathBuf, CacheError> {
        match &self.cache_directory {
            Some(location) => Ok(location.clone()),
            None => GitCache::default_location(),
        }
    }

    /// Deletes the git object cache. A cache that was never created is left alone.
    pub fn clear_cache(&self) -> Result<(), CacheError> {
        if self.git.get().is_none() && !self.cache_location()?.exists() {
            return Ok(());
        }
        self.git_cache()?.clear()
    }

    fn git_cache(&self) -> Result<&GitCache, CacheError> {
        if let Some(cache) = self.git.get() {
            return Ok(cache);
        }
        let git_config = match self.git_config.take() {
            Some(git_config) => git_config,
            None => Config::open_default()?,
        };
        let cache = GitCache::new(self.cache_location()?, git_config)?;
        Ok(self.git.get_or_init(|| cache))
    }

    fn fetch_git(&self, request: &FetchRequest, path: &Path) -> anyhow::Result<String> {
        let repository = self.git_cache()?.repository(&request.url)?;
        let commit = repository.fetch_pin(&request.pin)?;
        let commit_hash = commit.to_string();

        if is_current(path, &commit_hash) {
            info!("Sources of {} are already at {}", request.name, commit_hash);
        } else {
            repository.checkout(commit, path)?;
            mark(path, &commit_hash)?;
        }
        Ok(commit_hash)
    }

    fn fetch_svn(&self, request: &FetchRequest, path: &Path) -> anyhow::Result<String> {
        let identity = format!("{}@{}", request.url, request.pin);

        if is_current(path, &identity) {
            info!("Sources of {} are already at {}", request.name, identity);
        } else {
            self.svn.checkout(&request.url, &request.pin, path)?;
            mark(path, &identity)?;
        }
        Ok(request.pin.clone())
    }
}

impl SourceFetcher for RemoteFetcher {
    fn declare_and_materialize(&self, request: &FetchRequest) -> anyhow::Result<FetchedSource> {
        debug!(
            "Declared {} as {} {} with {} {}",
            request.name, request.kind, request.url, request.pin_kind, request.pin
        );
        let path = self
            .sources_directory
            .join(source_directory_name(request.name.as_str()));

        let revision = match request.kind {
            RepositoryKind::Git => self.fetch_git(request, &path)?,
            RepositoryKind::Svn => self.fetch_svn(request, &path)?,
        };

        Ok(FetchedSource { path, revision })
    }
}

fn is_current(path: &Path, identity: &str) -> bool {
    std::fs::read_to_string(path.join(REVISION_MARKER))
        .is_ok_and(|recorded| recorded.trim() == identity)
}

fn mark(path: &Path, identity: &str) -> std::io::Result<()> {
    std::fs::write(path.join(REVISION_MARKER), identity)
}

/// Checkout directory of a dependency. Names that are not already a valid
/// path component get a short digest of the original name appended, so
/// `a/b` and `a_b` do not share a directory.
fn source_directory_name(name: &str) -> String {
    let component = path_component(name);
    if component == name {
        return component;
    }
    let digest = Sha256::digest(name.as_bytes());
    format!("{}-{}", component, hex::encode(&digest[..4]))
}

/// Makes `value` usable as a single path component.
pub(crate) fn path_component(value: &str) -> String {
    let component: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    match component.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => component,
    }
}
