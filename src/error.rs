use thiserror::Error;

use crate::AnnotationKind;

/// Errors raised by annotation construction and conversion.
///
/// All of these are fatal to the call that raised them; nothing is retried
/// or logged internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{kind} annotation requires {expected} coordinate values, got {actual}")]
    InvalidArity {
        kind: AnnotationKind,
        expected: &'static str,
        actual: usize,
    },

    #[error("degenerate shape: {0}")]
    DegenerateShape(String),

    #[error("no conversion path from {from} to {to}")]
    NoConversionPath {
        from: AnnotationKind,
        to: AnnotationKind,
    },

    #[error("unknown annotation kind {0:?}")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, Error>;
