use std::path::Path;

use git2::{build::CheckoutBuilder, Oid, Repository};
use log::{debug, trace};
use thiserror::Error;

use super::cache::GitCache;

const REFSPECS: [&str; 2] = [
    "+refs/heads/*:refs/remotes/origin/*",
    "+refs/tags/*:refs/tags/*",
];

#[derive(Error, Debug)]
pub enum GitRepositoryError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
    #[error("Pin {pin} is not a tag, branch or commit of {url}")]
    PinNotFound { pin: String, url: String },
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

pub struct GitRepository<'a> {
    cache: &'a GitCache,
    git_repo: Repository,
}

impl<'a> GitRepository<'a> {
    pub fn new(cache: &'a GitCache, git_repo: Repository) -> GitRepository<'a> {
        GitRepository { cache, git_repo }
    }

    fn remote_url(&self) -> String {
        self.git_repo
            .find_remote("origin")
            .ok()
            .and_then(|remote| remote.url().map(str::to_owned))
            .unwrap_or_default()
    }

    pub fn fetch(&self) -> Result<(), GitRepositoryError> {
        let mut remote = self.git_repo.find_remote("origin")?;
        debug!("Fetching {}", remote.url().unwrap_or_default());
        remote.fetch(&REFSPECS, Some(&mut self.cache.fetch_options()), None)?;
        Ok(())
    }

    /// Fetches the remote unless `pin` names a commit that is already cached,
    /// then resolves `pin` to a commit.
    pub fn fetch_pin(&self, pin: &str) -> Result<Oid, GitRepositoryError> {
        if let Some(oid) = self.cached_commit(pin) {
            debug!("Commit {} is already in the cache", oid);
            return Ok(oid);
        }
        self.fetch()?;
        self.resolve_pin(pin)
    }

    fn cached_commit(&self, pin: &str) -> Option<Oid> {
        if pin.len() != 40 {
            return None;
        }
        let oid = Oid::from_str(pin).ok()?;
        self.git_repo.find_commit(oid).ok().map(|commit| commit.id())
    }

    /// Resolves a tag-style pin. Tags win over branches, branches over raw
    /// revisions.
    pub fn resolve_pin(&self, pin: &str) -> Result<Oid, GitRepositoryError> {
        let candidates = [
            format!("refs/tags/{pin}"),
            format!("refs/remotes/origin/{pin}"),
            pin.to_owned(),
        ];
        for candidate in &candidates {
            match self.commit_for_spec(candidate) {
                Ok(oid) => {
                    trace!("Pin {} resolved through {} to {}", pin, candidate, oid);
                    return Ok(oid);
                }
                Err(error) => trace!("{} did not resolve: {}", candidate, error),
            }
        }
        Err(GitRepositoryError::PinNotFound {
            pin: pin.to_owned(),
            url: self.remote_url(),
        })
    }

    /// Writes the tree of `commit` into `destination`, replacing whatever was there.
    pub fn checkout(&self, commit: Oid, destination: &Path) -> Result<(), GitRepositoryError> {
        if destination.exists() {
            std::fs::remove_dir_all(destination)?;
        }
        std::fs::create_dir_all(destination)?;

        let commit = self.git_repo.find_commit(commit)?;
        let mut checkout = CheckoutBuilder::new();
        checkout
            .target_dir(destination)
            .force()
            .update_index(false);
        self.git_repo
            .checkout_tree(commit.as_object(), Some(&mut checkout))?;
        Ok(())
    }

    fn commit_for_spec(&self, spec: &str) -> Result<Oid, git2::Error> {
        Ok(self.git_repo.revparse_single(spec)?.peel_to_commit()?.id())
    }
}
