use std::{
    ffi::OsString,
    path::Path,
    process::{Command, ExitStatus, Stdio},
};

use log::{debug, trace};
use thiserror::Error;

pub const DEFAULT_SVN_PROGRAM: &str = "svn";

#[derive(Error, Debug)]
pub enum SvnError {
    #[error("Could not run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("svn checkout of {url} at revision {revision} failed ({status}): {stderr}")]
    Failed {
        url: String,
        revision: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

/// Checks out subversion repositories with the `svn` command line client.
pub struct SvnCheckout {
    program: OsString,
}

impl SvnCheckout {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn checkout(&self, url: &str, revision: &str, destination: &Path) -> Result<(), SvnError> {
        if destination.exists() {
            std::fs::remove_dir_all(destination)?;
        }
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }

        debug!("Checking out {} at revision {}", url, revision);
        let args = checkout_args(url, revision, destination);
        trace!("Running {} {:?}", self.program.to_string_lossy(), args);
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SvnError::Spawn {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(SvnError::Failed {
                url: url.to_owned(),
                revision: revision.to_owned(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            })
        }
    }
}

impl Default for SvnCheckout {
    fn default() -> Self {
        Self::new(DEFAULT_SVN_PROGRAM)
    }
}

fn checkout_args(url: &str, revision: &str, destination: &Path) -> Vec<OsString> {
    vec![
        "checkout".into(),
        "--non-interactive".into(),
        "--quiet".into(),
        "-r".into(),
        revision.into(),
        url.into(),
        destination.into(),
    ]
}
