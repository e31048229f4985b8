//! Error handling for kiln.
//! Defines the error kinds raised by every generation operation.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause kept by generation faults for diagnostics.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by kiln operations.
///
/// Validation failures (`MissingMandatoryValue`, `UnauthorizedValue`) are raised at the
/// violating call before anything is mutated. Every I/O, rendering or git failure is
/// reported as a generation fault that names the affected artifact.
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument is missing or blank.
    #[error("Missing mandatory value: '{field}'.")]
    MissingMandatoryValue { field: String },

    /// A value is present but rejected for this field.
    #[error("Unauthorized value for '{field}': {reason}.")]
    UnauthorizedValue { field: String, reason: String },

    /// The requested template does not exist under the template root.
    #[error("Template '{namespace}/{filename}' not found.")]
    TemplateNotFound { namespace: String, filename: String },

    /// The needle is absent from the file, either never written or already consumed.
    #[error("Needle '{needle}' not found in '{}'.", .file.display())]
    NeedleNotFound { needle: String, file: PathBuf },

    /// Any I/O, rendering or version control failure.
    #[error("{message}")]
    GenerationError {
        message: String,
        #[source]
        source: Option<Cause>,
    },
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingMandatoryValue,
    UnauthorizedValue,
    TemplateNotFound,
    Generation,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingMandatoryValue { .. } => ErrorKind::MissingMandatoryValue,
            Error::UnauthorizedValue { .. } => ErrorKind::UnauthorizedValue,
            Error::TemplateNotFound { .. } => ErrorKind::TemplateNotFound,
            Error::NeedleNotFound { .. } | Error::GenerationError { .. } => {
                ErrorKind::Generation
            }
        }
    }

    pub fn missing<S: Into<String>>(field: S) -> Self {
        Error::MissingMandatoryValue { field: field.into() }
    }

    pub fn unauthorized<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        Error::UnauthorizedValue { field: field.into(), reason: reason.into() }
    }

    /// Generation fault without an underlying cause.
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Error::GenerationError { message: message.into(), source: None }
    }

    /// Generation fault wrapping the underlying cause.
    pub fn generation_caused_by<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<Cause>,
    {
        Error::GenerationError { message: message.into(), source: Some(source.into()) }
    }
}

/// Convenience type alias for Results with kiln's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Fails with `MissingMandatoryValue` when `value` is blank.
pub fn require_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing(field));
    }
    Ok(())
}

/// Default error handler that prints the error chain and exits the program.
///
/// # Behavior
/// Prints the error and its causes to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
    std::process::exit(1);
}
