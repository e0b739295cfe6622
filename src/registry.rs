use std::{
    ffi::OsString,
    process::{Command, Stdio},
};

use anyhow::Context;
use log::trace;

use crate::{model::DependencyName, resolver::PackageRegistry};

pub const DEFAULT_REGISTRY_PROGRAM: &str = "pkg-config";

/// Looks packages up with `pkg-config --exists`.
///
/// A component `c` of package `p` is looked up as the module `p-c`, and the
/// package itself must be present as well.
pub struct PkgConfigRegistry {
    program: OsString,
}

impl PkgConfigRegistry {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PkgConfigRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_PROGRAM)
    }
}

fn module_names(name: &DependencyName, components: &[String]) -> Vec<String> {
    std::iter::once(name.to_string())
        .chain(components.iter().map(|c| format!("{name}-{c}")))
        .collect()
}

impl PackageRegistry for PkgConfigRegistry {
    fn find(&self, name: &DependencyName, components: &[String]) -> anyhow::Result<bool> {
        let modules = module_names(name, components);
        trace!(
            "Running {} --exists {}",
            self.program.to_string_lossy(),
            modules.join(" ")
        );
        let status = Command::new(&self.program)
            .arg("--exists")
            .args(&modules)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("could not run {}", self.program.to_string_lossy()))?;
        Ok(status.success())
    }
}
