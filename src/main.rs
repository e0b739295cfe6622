use std::{error::Error, path::PathBuf};

use clap::Parser;
use fetchdep::{
    cli::{
        args::{CliArgs, Command},
        command_handlers::render_results,
    },
    config::FetchdepConfig,
    Fetchdep,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = CliArgs::parse();
    let config = FetchdepConfig::load()?;

    let mut builder = Fetchdep::builder()
        .manifest_file_name(&cli_args.manifest_location)
        .sources_directory_name(&cli_args.sources_directory);

    if let Some(root) = &cli_args.root {
        builder = builder.root(root);
    }
    let cache_directory = cli_args.cache_directory.map(PathBuf::from).or(config.cache_dir);
    if let Some(cache_directory) = cache_directory {
        builder = builder.cache_directory(cache_directory);
    }
    if let Some(program) = config.registry_program {
        builder = builder.registry_program(program);
    }
    if let Some(program) = config.svn_program {
        builder = builder.svn_program(program);
    }

    let fetchdep = builder.try_build()?;

    match cli_args.cmd {
        Command::Resolve(args) => {
            let result = fetchdep.resolve(args.into())?;
            print!("{}", render_results(&[result])?);
        }
        Command::ResolveManifest => {
            let results = fetchdep.resolve_manifest()?;
            print!("{}", render_results(&results)?);
        }
        Command::ClearCache => fetchdep.clear_cache()?,
    }

    Ok(())
}
