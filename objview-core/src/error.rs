//! Error types for mesh loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for mesh loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Outcome code of the most recent load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ErrorCode {
    #[default]
    Success = 0,
    /// The file could not be opened.
    FileOpenError = 1,
    /// A line failed to parse, or the mesh is structurally inconsistent.
    InvalidData = 2,
    /// The file yielded no vertex and no polygon.
    NoValidData = 3,
}

/// A failure confined to one input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid vertex format")]
    InvalidVertex,

    #[error("invalid face index: {token}")]
    InvalidFaceIndex { token: String },
}

/// Errors produced while loading a mesh file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open file: {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error at line {line}: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("failed to read input: {source}")]
    Read {
        #[source]
        source: io::Error,
    },

    #[error("no valid data found in file")]
    NoValidData,

    #[error("loaded data is invalid")]
    InvalidMesh,
}

impl LoadError {
    /// The [`ErrorCode`] this error is reported as.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::FileOpen { .. } => ErrorCode::FileOpenError,
            Self::InvalidLine { .. } | Self::Read { .. } | Self::InvalidMesh => {
                ErrorCode::InvalidData
            }
            Self::NoValidData => ErrorCode::NoValidData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let open = LoadError::FileOpen {
            path: PathBuf::from("missing.obj"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(open.code(), ErrorCode::FileOpenError);
        assert_eq!(LoadError::NoValidData.code(), ErrorCode::NoValidData);
        assert_eq!(LoadError::InvalidMesh.code(), ErrorCode::InvalidData);
        assert_eq!(ErrorCode::NoValidData as u8, 3);
    }

    #[test]
    fn test_line_message_carries_line_number() {
        let err = LoadError::InvalidLine {
            line: 7,
            source: ParseError::InvalidFaceIndex {
                token: "-1".to_string(),
            },
        };
        assert_eq!(err.to_string(), "error at line 7: invalid face index: -1");
    }
}
