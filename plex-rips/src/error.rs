use plex_matrix::SnfError;

use crate::{Simplex, Vertex};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, derive_more::Display)]
pub enum Error {
    #[display("duplicate vertex {} in simplex", _0)]
    DuplicateVertex(Vertex),

    #[display("missing face {} of {}", face, cell)]
    FaceMissing { face: Simplex, cell: Simplex },

    #[display("dimension mismatch: {} vs {}", _0, _1)]
    DimensionMismatch(usize, usize),

    #[display("unknown method: {}", _0)]
    InvalidMethod(String),

    #[display("invalid input: {}", _0)]
    InvalidInput(String),

    #[display("{}", _0)]
    Io(std::io::Error),

    #[display("parse error at line {}: {}", line, msg)]
    Parse { line: usize, msg: String },

    #[display("{}", _0)]
    Snf(SnfError),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Snf(e) => Some(e),
            _ => None
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<SnfError> for Error {
    fn from(e: SnfError) -> Self {
        Error::Snf(e)
    }
}
