use crate::errors::{FileOperation, IoError};
use miette::Diagnostic;
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum SourceError {
    #[error("no structure provided")]
    #[diagnostic(
        code(mkstruct::source::input_missing),
        help("Pass a structure file, an inline structure with --text, or pipe one through --stdin")
    )]
    InputMissing,

    #[error("structure file not found: '{}'", path.display())]
    #[diagnostic(
        code(mkstruct::source::file_not_found),
        help("Make sure the path to the structure file is correct")
    )]
    FileNotFound { path: PathBuf },

    #[error("I/O error within source domain")]
    #[diagnostic(code(mkstruct::source::io))]
    Io(#[from] IoError),
}

/// Where the structure text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Structure passed on the command line.
    Inline(String),
    /// Structure read from a file.
    File(PathBuf),
    /// Structure piped through standard input.
    Stdin,
}
impl InputSource {
    /// Picks the input from the supplied options: inline text first, then a
    /// file, then standard input when asked for explicitly or when it is not
    /// attached to a terminal.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InputMissing`] when nothing was supplied.
    pub fn resolve(
        text: Option<String>,
        file: Option<PathBuf>,
        use_stdin: bool,
        stdin_is_terminal: bool,
    ) -> Result<Self, SourceError> {
        if let Some(text) = text {
            Ok(Self::Inline(text))
        } else if let Some(file) = file {
            Ok(Self::File(file))
        } else if use_stdin || !stdin_is_terminal {
            Ok(Self::Stdin)
        } else {
            Err(SourceError::InputMissing)
        }
    }

    /// Reads the whole structure text, using the process' standard input for
    /// [`InputSource::Stdin`].
    pub fn read(self) -> Result<String, SourceError> {
        self.read_from(io::stdin().lock())
    }

    /// Reads the whole structure text, using `stdin` for
    /// [`InputSource::Stdin`].
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::FileNotFound`] when the file does not exist and
    /// [`SourceError::Io`] for any other read failure.
    pub fn read_from<R: Read>(self, mut stdin: R) -> Result<String, SourceError> {
        match self {
            Self::Inline(text) => Ok(text),
            Self::File(path) => {
                log::debug!("reading structure from {}", path.display());

                fs::read_to_string(&path).map_err(|error| match error.kind() {
                    io::ErrorKind::NotFound => SourceError::FileNotFound { path },
                    _ => IoError::new(FileOperation::Read, path, error).into(),
                })
            }
            Self::Stdin => {
                log::debug!("reading structure from standard input");

                let mut text = String::new();
                stdin.read_to_string(&mut text).map_err(|error| {
                    IoError::new(FileOperation::ReadStdin, PathBuf::from("<stdin>"), error)
                })?;

                Ok(text)
            }
        }
    }
}
