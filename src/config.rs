use crate::{
    errors::{FileOperation, IoError},
    utils::normalize_path,
};
use std::path::{Path, PathBuf};

/// How the materializer treats the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Log the planned actions without creating anything.
    pub dry_run: bool,
    /// Truncate files that already exist instead of skipping them.
    pub force: bool,
    /// Absolute directory every planned path is resolved against. Nothing is
    /// ever written outside of it.
    pub destination: PathBuf,
}
/// Anchors a relative destination at the working directory.
fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }

    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(error) => {
            log::warn!("cannot resolve {}: {}", path.display(), error);
            path
        }
    }
}

impl Policy {
    /// A relative `destination` is resolved against the working directory.
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            dry_run: false,
            force: false,
            destination: normalize_path(&absolute(destination.into())),
        }
    }

    /// Builds the policy from command-line flags. A relative `directory` is
    /// taken relative to the working directory, which is also the default.
    pub fn from_flags(
        dry_run: bool,
        force: bool,
        directory: Option<&Path>,
    ) -> Result<Self, IoError> {
        let cwd = std::env::current_dir()
            .map_err(|error| IoError::new(FileOperation::Resolve, PathBuf::from("."), error))?;

        let destination = match directory {
            Some(directory) => cwd.join(directory),
            None => cwd,
        };

        Ok(Self::new(destination).dry_run(dry_run).force(force))
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
