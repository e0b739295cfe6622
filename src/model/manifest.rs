use std::path::Path;

use log::{debug, error};
use serde::de::DeserializeOwned;
use toml::{Table, Value};

use super::{DependencyArguments, ParseError};

/// A manifest lists dependencies as top-level tables keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub dependencies: Vec<DependencyArguments>,
}

impl Manifest {
    pub fn from_file(path: &Path) -> Result<Manifest, ParseError> {
        debug!("Attempting to read manifest from {}", path.display());
        let contents = std::fs::read_to_string(path)?;

        let manifest = Manifest::from_toml_str(&contents);
        if let Err(err) = &manifest {
            error!("Could not build a valid manifest from {}: {err}", path.display())
        }
        manifest
    }

    pub fn from_toml_str(data: &str) -> Result<Manifest, ParseError> {
        let table = toml::from_str::<Table>(data)?;

        let dependencies = table
            .into_iter()
            .map(|(name, value)| parse_dependency(name, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Manifest { dependencies })
    }
}

// Mandatory fields are left as `None` here; rejecting them is the validator's job.
fn parse_dependency(name: String, value: Value) -> Result<DependencyArguments, ParseError> {
    let Value::Table(table) = value else {
        return Err(ParseError::NotATable(name));
    };

    let repository_url = field::<String>(&name, &table, "url")?;
    let version_pin = field::<String>(&name, &table, "version")?;
    let components = field::<Vec<String>>(&name, &table, "components")?.unwrap_or_default();
    let fallback = field::<String>(&name, &table, "fallback")?;
    let fallback_components =
        field::<Vec<String>>(&name, &table, "fallback_components")?.unwrap_or_default();
    let remote_only = field::<bool>(&name, &table, "remote_only")?.unwrap_or(false);

    Ok(DependencyArguments {
        names: vec![name],
        repository_url,
        version_pin,
        components,
        fallback,
        fallback_components,
        remote_only,
    })
}

fn field<T: DeserializeOwned>(
    dependency: &str,
    table: &Table,
    key: &str,
) -> Result<Option<T>, ParseError> {
    table
        .get(key)
        .map(|v| v.clone().try_into::<T>())
        .map_or(Ok(None), |v| v.map(Some))
        .map_err(|source| ParseError::InvalidField {
            dependency: dependency.to_string(),
            key: key.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn load_valid_manifest() {
        let str = r#"
            [fmtlib]
                url = "https://github.com/fmtlib/fmt.git"
                version = "10.2.1"
                components = ["core", "io"]
                fallback = "fmt"
                fallback_components = ["headers"]
            [zlib]
                url = "svn://example.org/zlib/trunk"
                version = "1234"
                remote_only = true
        "#;
        let expected = Manifest {
            dependencies: vec![
                DependencyArguments {
                    names: vec!["fmtlib".to_string()],
                    repository_url: Some("https://github.com/fmtlib/fmt.git".to_string()),
                    version_pin: Some("10.2.1".to_string()),
                    components: vec!["core".to_string(), "io".to_string()],
                    fallback: Some("fmt".to_string()),
                    fallback_components: vec!["headers".to_string()],
                    remote_only: false,
                },
                DependencyArguments {
                    names: vec!["zlib".to_string()],
                    repository_url: Some("svn://example.org/zlib/trunk".to_string()),
                    version_pin: Some("1234".to_string()),
                    components: vec![],
                    fallback: None,
                    fallback_components: vec![],
                    remote_only: true,
                },
            ],
        };
        assert_eq!(Manifest::from_toml_str(str).unwrap(), expected);
    }

    #[test]
    fn keeps_file_order() {
        let str = r#"
            [zeta]
            [alpha]
            [mid]
        "#;
        let names = Manifest::from_toml_str(str)
            .unwrap()
            .dependencies
            .into_iter()
            .flat_map(|d| d.names)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn missing_mandatory_fields_are_not_parse_errors() {
        let str = r#"
            [fmtlib]
                fallback_components = ["headers"]
        "#;
        let manifest = Manifest::from_toml_str(str).unwrap();
        assert_eq!(manifest.dependencies[0].repository_url, None);
        assert_eq!(manifest.dependencies[0].version_pin, None);
        assert_eq!(manifest.dependencies[0].fallback, None);
    }

    #[test]
    fn load_invalid_field_type() {
        let str = r#"
            [fmtlib]
                url = "https://github.com/fmtlib/fmt.git"
                version = "10.2.1"
                remote_only = "yes"
        "#;
        let err = Manifest::from_toml_str(str).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidField { ref dependency, ref key, .. }
                if dependency == "fmtlib" && key == "remote_only"
        ));
    }

    #[test]
    fn load_non_table_entry() {
        let str = r#"
            fmtlib = "10.2.1"
        "#;
        assert!(matches!(
            Manifest::from_toml_str(str),
            Err(ParseError::NotATable(name)) if name == "fmtlib"
        ));
    }

    #[test]
    fn load_empty_manifest() {
        assert_eq!(Manifest::from_toml_str("").unwrap(), Manifest::default());
    }
}
