use std::{
    fs::File,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use fs4::fs_std::FileExt;
use log::debug;
use thiserror::Error;

const RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Exclusive advisory lock on a file, released on drop.
pub struct FileLock {
    _file: File,
}

#[derive(Error, Debug)]
#[error("Could not lock {}: {source}", .path.display())]
pub struct Error {
    path: PathBuf,
    source: std::io::Error,
}

impl FileLock {
    /// Blocks until the lock is acquired, giving up once `timeout` has passed.
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self, Error> {
        let error = |source| Error {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(error)?;
        let start = Instant::now();
        loop {
            match file.try_lock_exclusive() {
                Ok(_) => return Ok(Self { _file: file }),
                Err(e)
                    if e.raw_os_error() == fs4::lock_contended_error().raw_os_error()
                        && start.elapsed() < timeout =>
                {
                    debug!("{} is locked by another process, waiting", path.display());
                    std::thread::sleep(RETRY_INTERVAL);
                }
                Err(e) => return Err(error(e)),
            }
        }
    }
}
