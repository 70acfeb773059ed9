use std::fmt::Display;

use thiserror::Error;

use crate::parsers::dimacs::DimacsParseError;

pub(crate) type GourdResult<T> = Result<T, GourdError>;

#[derive(Error, Debug)]
pub(crate) enum GourdError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The file {0} is not supported.")]
    InvalidInstanceFile(String),
    #[error("The dimacs file was invalid, more details: {0}")]
    InvalidDimacs(#[from] DimacsParseError),
}

impl GourdError {
    pub(crate) fn invalid_instance(path: impl Display) -> Self {
        Self::InvalidInstanceFile(format!("{path}"))
    }
}
