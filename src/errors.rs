use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("reading standard input")]
    ReadStdin,
    #[error("creating a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
    #[error("resolving the working directory")]
    Resolve,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{}'", path.display())]
#[diagnostic(
    code(mkstruct::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }

    pub fn kind(&self) -> std::io::ErrorKind {
        self.source.kind()
    }
}
