use clap::{Args, Parser, Subcommand};

use crate::model::DependencyArguments;

/// Resolves build dependencies from the system, a fallback package or a pinned checkout.
#[derive(Debug, Parser)]
#[clap(version)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub cmd: Command,
    /// Project root; relative paths are resolved against it
    #[clap(short, long, global = true)]
    pub root: Option<String>,
    #[clap(short, long, default_value = "fetchdep.toml", global = true)]
    pub manifest_location: String,
    /// Defaults to $FETCHDEP_CACHE_DIR or $HOME/.fetchdep/cache
    #[clap(short, long, global = true)]
    pub cache_directory: Option<String>,
    #[clap(short, long, default_value = "_deps", global = true)]
    pub sources_directory: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolves a single dependency
    Resolve(ResolveArgs),
    /// Resolves every dependency listed in the manifest
    ResolveManifest,
    /// Deletes the git object cache
    ClearCache,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Dependency name; exactly one is required
    pub names: Vec<String>,
    #[clap(short = 'u', long)]
    pub repository_url: Option<String>,
    /// Tag, branch or commit for git repositories, revision for svn
    #[clap(short = 'p', long)]
    pub version_pin: Option<String>,
    #[clap(long, value_delimiter = ',')]
    pub components: Vec<String>,
    /// Package to look for on the system when the dependency itself is missing
    #[clap(long)]
    pub fallback: Option<String>,
    #[clap(long, value_delimiter = ',')]
    pub fallback_components: Vec<String>,
    /// Skip the system search and always fetch
    #[clap(long)]
    pub remote_only: bool,
}

impl From<ResolveArgs> for DependencyArguments {
    fn from(args: ResolveArgs) -> Self {
        DependencyArguments {
            names: args.names,
            repository_url: args.repository_url,
            version_pin: args.version_pin,
            components: args.components,
            fallback: args.fallback,
            fallback_components: args.fallback_components,
            remote_only: args.remote_only,
        }
    }
}
