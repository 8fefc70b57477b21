// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for memblock decoding and catalog resolution.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding map streams or resolving game data.
#[derive(Error, Debug)]
pub enum Error {
    /// The stream ended before a declared block or field was fully read.
    #[error("truncated input while reading {what}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        what: String,
        needed: u64,
        available: u64,
    },

    /// The operation is not supported by this format (e.g. writing a read-only format).
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Type definitions reference each other with no resolvable root.
    #[error("circular dependencies: {}", .0.join(", "))]
    CyclicDependency(Vec<String>),

    /// A property type tag has no matching variable type.
    #[error("unrecognized property type: {0}")]
    UnrecognizedPropertyType(String),

    /// IO error other than a premature end of stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a truncated-input error
    pub fn truncated(what: impl Into<String>, needed: u64, available: u64) -> Self {
        Error::TruncatedInput {
            what: what.into(),
            needed,
            available,
        }
    }

    /// Map an IO error raised while reading `what`, turning EOF into `TruncatedInput`.
    pub fn from_read(err: std::io::Error, what: &str, needed: u64) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::truncated(what, needed, 0)
        } else {
            Error::Io(err)
        }
    }

    /// Create an unsupported-operation error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Error::UnsupportedOperation(msg.into())
    }

    /// Whether this error must abort the operation that raised it.
    ///
    /// Only `UnrecognizedPropertyType` is absorbed (the property is dropped).
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::UnrecognizedPropertyType(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_lists_every_name() {
        let err = Error::CyclicDependency(vec!["X".into(), "Y".into()]);
        assert_eq!(err.to_string(), "circular dependencies: X, Y");
    }

    #[test]
    fn eof_becomes_truncated_input() {
        let io = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        match Error::from_read(io, "vertex count", 4) {
            Error::TruncatedInput { what, needed, .. } => {
                assert_eq!(what, "vertex count");
                assert_eq!(needed, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn only_property_type_errors_are_non_fatal() {
        assert!(!Error::UnrecognizedPropertyType("Colour".into()).is_fatal());
        assert!(Error::unsupported("write").is_fatal());
    }
}
