use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("operation failed")]
    Operation(#[from] versioneer_operations::OperationError),

    #[error("project error")]
    Project(#[from] versioneer_project::ProjectError),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to open log file '{path}'")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled by user")]
    Cancelled,

    #[error("interactive mode requires a terminal; pass {hint}")]
    NotATty { hint: &'static str },
}

pub type Result<T> = std::result::Result<T, CliError>;

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        match e {
            dialoguer::Error::IO(io_err) => Self::Io(io_err),
        }
    }
}
