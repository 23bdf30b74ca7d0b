use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    Usage = 1,
    SourceUnreadable = 2,
    DestinationUnwritable = 3,
    Discovery = 4,
}

#[derive(Debug, Error)]
pub enum TocError {
    #[error("unable to read source {path}: {source}")]
    SourceUnreadable { path: PathBuf, source: io::Error },

    #[error("unable to write {path}: {source}")]
    DestinationUnwritable { path: PathBuf, source: io::Error },

    #[error("unable to discover sources under {root}: {message}")]
    Discovery { root: PathBuf, message: String },

    #[error("unable to determine the working directory: {source}")]
    WorkingDirectory { source: io::Error },
}

impl TocError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::SourceUnreadable { .. } => ExitCode::SourceUnreadable,
            Self::DestinationUnwritable { .. } => ExitCode::DestinationUnwritable,
            Self::Discovery { .. } | Self::WorkingDirectory { .. } => ExitCode::Discovery,
        }
    }
}

pub type TocResult<T> = Result<T, TocError>;
