use log::{debug, info};

use crate::{
    fetch::RemoteFetcher,
    model::{DependencyArguments, Manifest, ResolutionResult},
    resolver::{DependencyResolver, PackageRegistry, ResolveError, SourceFetcher},
};
use std::{error::Error, path::Path};

/// Handler to resolve command
pub fn do_resolve<R, F>(
    resolver: &DependencyResolver<R, F>,
    arguments: DependencyArguments,
) -> Result<ResolutionResult, ResolveError>
where
    R: PackageRegistry,
    F: SourceFetcher,
{
    let result = resolver.resolve_arguments(arguments)?;
    info!("Resolved {} ({})", result.name, result.origin);
    Ok(result)
}

/// Handler to resolve-manifest command
/// Every entry is validated and resolved on its own, in manifest order.
/// The first fatal error stops the run.
pub fn do_resolve_manifest<R, F>(
    resolver: &DependencyResolver<R, F>,
    manifest_path: &Path,
) -> Result<Vec<ResolutionResult>, Box<dyn Error>>
where
    R: PackageRegistry,
    F: SourceFetcher,
{
    let manifest = Manifest::from_file(manifest_path)?;
    debug!(
        "Resolving {} dependencies from {}",
        manifest.dependencies.len(),
        manifest_path.display()
    );

    let mut results = Vec::with_capacity(manifest.dependencies.len());
    for arguments in manifest.dependencies {
        results.push(do_resolve(resolver, arguments)?);
    }
    Ok(results)
}

pub fn do_clear_cache(fetcher: &RemoteFetcher) -> Result<(), Box<dyn Error>> {
    fetcher.clear_cache()?;
    Ok(())
}

/// Renders results as TOML, one table per dependency.
pub fn render_results(results: &[ResolutionResult]) -> Result<String, toml::ser::Error> {
    #[derive(serde::Serialize)]
    struct Rendered<'a> {
        resolved: &'a [ResolutionResult],
    }
    toml::to_string_pretty(&Rendered { resolved: results })
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, path::PathBuf};

    use super::*;
    use crate::{
        model::{DependencyName, FetchedSource, Origin},
        resolver::FetchRequest,
    };

    use pretty_assertions::assert_eq;

    struct InstalledOnly(&'static [&'static str]);

    impl PackageRegistry for InstalledOnly {
        fn find(&self, name: &DependencyName, _components: &[String]) -> anyhow::Result<bool> {
            Ok(self.0.iter().any(|installed| *installed == name.as_str()))
        }
    }

    #[derive(Default)]
    struct RecordingFetcher(RefCell<Vec<String>>);

    impl SourceFetcher for RecordingFetcher {
        fn declare_and_materialize(&self, request: &FetchRequest) -> anyhow::Result<FetchedSource> {
            self.0.borrow_mut().push(request.name.to_string());
            Ok(FetchedSource {
                path: PathBuf::from("_deps").join(request.name.as_str()),
                revision: request.pin.clone(),
            })
        }
    }

    #[test]
    fn resolves_manifest_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("fetchdep.toml");
        std::fs::write(
            &manifest,
            r#"
            [fmtlib]
                url = "https://github.com/fmtlib/fmt.git"
                version = "10.2.1"
                fallback = "fmt"
            [zlib]
                url = "svn://example.org/zlib/trunk"
                version = "1234"
            "#,
        )
        .unwrap();
        let fetcher = RecordingFetcher::default();
        let resolver = DependencyResolver::new(InstalledOnly(&["fmt"]), &fetcher);

        let results = do_resolve_manifest(&resolver, &manifest).unwrap();

        assert_eq!(
            results
                .iter()
                .map(|r| (r.name.as_str(), r.origin))
                .collect::<Vec<_>>(),
            vec![("fmt", Origin::SystemFallback), ("zlib", Origin::Fetched)]
        );
        assert_eq!(*fetcher.0.borrow(), vec!["zlib".to_string()]);
    }

    #[test]
    fn manifest_stops_at_invalid_entry() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("fetchdep.toml");
        std::fs::write(
            &manifest,
            r#"
            [broken]
                url = "https://github.com/fmtlib/fmt.git"
            [zlib]
                url = "svn://example.org/zlib/trunk"
                version = "1234"
            "#,
        )
        .unwrap();
        let fetcher = RecordingFetcher::default();
        let resolver = DependencyResolver::new(InstalledOnly(&[]), &fetcher);

        let error = do_resolve_manifest(&resolver, &manifest).unwrap_err();

        assert_eq!(error.to_string(), "Dependency broken: version pin is required");
        assert!(fetcher.0.borrow().is_empty());
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = DependencyResolver::new(InstalledOnly(&[]), RecordingFetcher::default());
        assert!(do_resolve_manifest(&resolver, &dir.path().join("fetchdep.toml")).is_err());
    }

    #[test]
    fn renders_results_as_toml() {
        let results = vec![
            ResolutionResult::system(DependencyName::from("zlib")),
            ResolutionResult::fetched(
                DependencyName::from("fmtlib"),
                FetchedSource {
                    path: PathBuf::from("_deps/fmtlib"),
                    revision: "abc123".to_string(),
                },
            ),
        ];
        let rendered = render_results(&results).unwrap();
        let value: toml::Table = toml::from_str(&rendered).unwrap();
        let resolved = value["resolved"].as_array().unwrap();
        assert_eq!(resolved[0]["name"].as_str(), Some("zlib"));
        assert_eq!(resolved[0]["origin"].as_str(), Some("system"));
        assert!(resolved[0].get("source").is_none());
        assert_eq!(resolved[1]["origin"].as_str(), Some("fetched"));
        assert_eq!(resolved[1]["source"]["revision"].as_str(), Some("abc123"));
    }
}
