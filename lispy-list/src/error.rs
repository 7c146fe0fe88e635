//! Errors raised by list operations.
//!
//! Every error is local to the call that produced it: nothing is retried and
//! no partial result is returned.

use std::fmt;
use thiserror::Error;

/// The three shapes a [`Value`](crate::Value) can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Empty,
    Atom,
    List,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Empty => write!(f, "empty list"),
            Shape::Atom => write!(f, "atom"),
            Shape::List => write!(f, "list"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A type-asserting accessor met a value of the wrong shape.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Shape, found: Shape },

    /// An accessor path contained something other than `a` or `d`.
    #[error("invalid accessor path {path:?}: unexpected {found:?} at position {position}")]
    InvalidFormat {
        path: String,
        found: char,
        position: usize,
    },

    /// A checked walk found an atom in a tail slot.
    #[error("improper list: tail of cell {position} is an atom")]
    StructureError { position: usize },
}

impl Error {
    pub(crate) fn expected_list(found: Shape) -> Self {
        Error::TypeMismatch {
            expected: Shape::List,
            found,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::expected_list(Shape::Atom);
        assert_eq!(err.to_string(), "type mismatch: expected list, found atom");

        let err = Error::InvalidFormat {
            path: "adx".to_string(),
            found: 'x',
            position: 2,
        };
        assert_eq!(
            err.to_string(),
            "invalid accessor path \"adx\": unexpected 'x' at position 2"
        );

        let err = Error::StructureError { position: 3 };
        assert_eq!(err.to_string(), "improper list: tail of cell 3 is an atom");
    }
}
