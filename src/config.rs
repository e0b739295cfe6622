use std::{collections::HashMap, path::PathBuf};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Settings read from `FETCHDEP_*` environment variables.
pub struct FetchdepConfig {
    pub cache_dir: Option<PathBuf>,
    pub registry_program: Option<String>,
    pub svn_program: Option<String>,
}

impl FetchdepConfig {
    pub fn load() -> anyhow::Result<Self> {
        let raw_config = RawConfig::load(None)?;

        Ok(Self {
            cache_dir: raw_config.cache.dir,
            registry_program: raw_config.registry.program,
            svn_program: raw_config.svn.program,
        })
    }
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct RawConfig {
    #[serde(default)]
    cache: CacheConfig,
    #[serde(default)]
    registry: ProgramConfig,
    #[serde(default)]
    svn: ProgramConfig,
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct CacheConfig {
    dir: Option<PathBuf>,
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct ProgramConfig {
    program: Option<String>,
}

impl RawConfig {
    fn load(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                Environment::with_prefix("FETCHDEP")
                    .separator("_")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn load_empty() {
        let env = HashMap::from([]);
        let config = RawConfig::load(Some(env)).unwrap();
        assert_eq!(config, RawConfig::default())
    }

    #[test]
    fn load_environment() {
        let env = HashMap::from([
            ("FETCHDEP_CACHE_DIR".to_owned(), "/cache".to_owned()),
            (
                "FETCHDEP_REGISTRY_PROGRAM".to_owned(),
                "/usr/bin/pkgconf".to_owned(),
            ),
            ("FETCHDEP_SVN_PROGRAM".to_owned(), "svn1.14".to_owned()),
        ]);
        let config = RawConfig::load(Some(env)).unwrap();
        assert_eq!(
            config,
            RawConfig {
                cache: CacheConfig {
                    dir: Some("/cache".into())
                },
                registry: ProgramConfig {
                    program: Some("/usr/bin/pkgconf".to_owned())
                },
                svn: ProgramConfig {
                    program: Some("svn1.14".to_owned())
                },
            }
        )
    }

    #[test]
    fn ignores_other_prefixes() {
        let env = HashMap::from([("PKG_CONFIG_PATH".to_owned(), "/opt/lib".to_owned())]);
        let config = RawConfig::load(Some(env)).unwrap();
        assert_eq!(config, RawConfig::default())
    }
}
