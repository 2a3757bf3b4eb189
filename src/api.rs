use crate::{
    config::Policy,
    materializer::{self, MaterializeError, Report},
    plan,
    source::{InputSource, SourceError},
};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum MkstructError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Materialize(#[from] MaterializeError),
}

/// Reads the structure from `source` and creates it below
/// `policy.destination`.
///
/// Empty or whitespace-only input is not an error: nothing is created and an
/// empty [`Report`] is returned.
///
/// # Errors
///
/// Returns a [`MkstructError`] if:
///
/// - No input was supplied, or the structure file cannot be read.
/// - A directory or file cannot be created (the run is rolled back).
/// - Any planned path resolves outside of the destination. Those entries
///   are skipped and everything else is still created.
pub fn run(source: InputSource, policy: &Policy) -> Result<Report, MkstructError> {
    let text = source.read()?;

    create_from_text(&text, policy)
}

/// Same as [`run`] for structure text that is already in memory.
pub fn create_from_text(text: &str, policy: &Policy) -> Result<Report, MkstructError> {
    let plan = plan::plan(text);

    if plan.is_empty() {
        log::warn!("no paths found in the structure, nothing to do");
        return Ok(Report::default());
    }

    log::debug!(
        "materializing {} entries into {}",
        plan.len(),
        policy.destination.display()
    );

    let report = materializer::materialize(&plan, policy)?;

    log::info!(
        "{} directories, {} files, {} skipped",
        report.created_dirs,
        report.created_files,
        report.skipped.len()
    );

    Ok(report.ensure_contained(&policy.destination)?)
}
