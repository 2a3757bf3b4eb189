use crate::{
    classifier::EntryKind,
    config::Policy,
    errors::{FileOperation, IoError},
    plan::{ClassifiedPath, Plan},
    transactions::{Active, RollbackOperation, Transaction},
    utils::resolve_within,
};
use colored::Colorize;
use miette::Diagnostic;
use std::{
    collections::HashSet,
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    #[error("I/O error within materializer domain")]
    #[diagnostic(code(mkstruct::materializer::io))]
    Io(#[from] IoError),

    #[error("refused to create {count} path(s) outside of '{}'", destination.display())]
    #[diagnostic(
        code(mkstruct::materializer::path_escapes_root),
        help("Remove `..` segments and absolute paths from the structure, or pick another --directory")
    )]
    PathsEscapeRoot {
        count: usize,
        destination: PathBuf,
        paths: Vec<PathBuf>,
    },
}

/// What a run did, or would have done for a dry run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub created_dirs: usize,
    pub created_files: usize,
    /// Files left alone because they already existed and `force` was off.
    pub skipped: Vec<PathBuf>,
    /// Planned paths that resolved outside of the destination.
    pub rejected: Vec<PathBuf>,
}
impl Report {
    /// Turns rejected entries into an error once the rest of the plan has
    /// been applied.
    pub fn ensure_contained(self, destination: &Path) -> Result<Self, MaterializeError> {
        if self.rejected.is_empty() {
            Ok(self)
        } else {
            Err(MaterializeError::PathsEscapeRoot {
                count: self.rejected.len(),
                destination: destination.to_path_buf(),
                paths: self.rejected,
            })
        }
    }
}

struct Run<'a> {
    policy: &'a Policy,
    /// Directories known to exist, or announced as created during a dry run.
    seen_dirs: HashSet<PathBuf>,
    /// Files this run created, or announced during a dry run.
    seen_files: HashSet<PathBuf>,
    report: Report,
}
impl Run<'_> {
    /// Path shown to the user, relative to the destination when possible.
    fn display_path<'p>(&self, target: &'p Path) -> &'p Path {
        match target.strip_prefix(&self.policy.destination) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative,
            _ => target,
        }
    }

    fn apply(
        &mut self,
        trx: &mut Transaction<Active>,
        entry: &ClassifiedPath,
    ) -> Result<(), MaterializeError> {
        let Some(target) = resolve_within(&self.policy.destination, &entry.path) else {
            log::error!(
                "refusing to write outside {}: {}",
                self.policy.destination.display(),
                entry.path.display()
            );
            println!(
                "{} {} (outside destination)",
                "reject".red(),
                entry.path.display()
            );
            self.report.rejected.push(entry.path.clone());
            return Ok(());
        };

        match entry.kind {
            EntryKind::Directory => self.ensure_directory(trx, &target),
            EntryKind::File => self.create_file(trx, &target),
        }
    }

    /// Creates `path` and any missing ancestors. Only the topmost directory
    /// that did not exist yet is recorded for rollback.
    fn ensure_directory(
        &mut self,
        trx: &mut Transaction<Active>,
        path: &Path,
    ) -> Result<(), MaterializeError> {
        if self.seen_dirs.contains(path) {
            return Ok(());
        }

        if path.is_dir() {
            log::debug!("directory exists: {}", path.display());
            self.seen_dirs.insert(path.to_path_buf());
            return Ok(());
        }

        if self.policy.dry_run {
            println!(
                "{} {}",
                "[dry-run] mkdir".dimmed(),
                self.display_path(path).display()
            );
        } else {
            let topmost_missing = path
                .ancestors()
                .take_while(|ancestor| !ancestor.exists())
                .last()
                .unwrap_or(path)
                .to_path_buf();

            fs::create_dir_all(path)
                .map_err(|error| IoError::new(FileOperation::Mkdir, path.into(), error))?;

            trx.add_operation(RollbackOperation::RemoveDir(topmost_missing));

            println!("{} {}", "mkdir".green(), self.display_path(path).display());
        }

        self.seen_dirs.insert(path.to_path_buf());
        self.report.created_dirs += 1;

        Ok(())
    }

    /// Creates an empty file at `path`, honoring the overwrite policy.
    fn create_file(
        &mut self,
        trx: &mut Transaction<Active>,
        path: &Path,
    ) -> Result<(), MaterializeError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            self.ensure_directory(trx, parent)?;
        }

        let exists = path.exists() || self.seen_files.contains(path);

        if exists && !self.policy.force {
            log::warn!("skipping existing file: {}", path.display());
            println!(
                "{} {} (already exists)",
                "skip".yellow(),
                self.display_path(path).display()
            );
            self.report.skipped.push(path.to_path_buf());
            return Ok(());
        }

        if self.policy.dry_run {
            println!(
                "{} {}",
                "[dry-run] create".dimmed(),
                self.display_path(path).display()
            );
            self.seen_files.insert(path.to_path_buf());
            self.report.created_files += 1;
            return Ok(());
        }

        let mut options = OpenOptions::new();
        options.write(true);
        if self.policy.force {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        options
            .open(path)
            .map_err(|error| IoError::new(FileOperation::Write, path.into(), error))?;

        if !exists {
            trx.add_operation(RollbackOperation::RemoveFile(path.to_path_buf()));
        }
        self.seen_files.insert(path.to_path_buf());

        println!("{} {}", "create".green(), self.display_path(path).display());
        self.report.created_files += 1;

        Ok(())
    }
}

/// Creates every entry of `plan` below `policy.destination`, one at a time in
/// plan order.
///
/// Entries resolving outside the destination are reported and skipped; the
/// rest of the plan still runs and the caller decides what to do with
/// [`Report::rejected`]. Existing files are skipped unless `policy.force` is
/// set. With `policy.dry_run` nothing is touched.
///
/// # Errors
///
/// Returns a [`MaterializeError::Io`] if a directory or file cannot be
/// created. Everything the run created up to that point is removed again.
pub fn materialize(plan: &Plan, policy: &Policy) -> Result<Report, MaterializeError> {
    let mut trx = Transaction::<Active>::new();
    let mut run = Run {
        policy,
        seen_dirs: HashSet::new(),
        seen_files: HashSet::new(),
        report: Report::default(),
    };

    for entry in plan.iter() {
        if let Err(error) = run.apply(&mut trx, entry) {
            log::error!("failed on {}: {}", entry.path.display(), error);
            drop(trx.cancel());
            return Err(error);
        }
    }

    trx.commit();

    Ok(run.report)
}
