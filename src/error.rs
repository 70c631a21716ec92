//! Defines [`TermError`] and [`WriteError`], the fault surfaces of the crate.
//!
//! Both are plain values returned to the caller; the writer never panics
//! and never retries on its own.

use crate::sink::SinkError;
use crate::Term;
use smartstring::alias::String;
use thiserror::Error;

/// Faults raised by the term store and the operator registry.
///
/// Each variant wraps enough detail for the caller to diagnose the problem,
/// and `#[from]` conversions let call sites use `?` without explicit
/// mapping.
#[derive(Debug, Clone, Error)]
pub enum TermError {
    /// A handle that does not resolve in the arena it was presented to.
    #[error("invalid term {0:?}")]
    InvalidTerm(Term),

    /// An accessor was applied to a term of the wrong kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    UnexpectedKind {
        expected: &'static str,
        found: &'static str,
    },

    /// A big-integer literal that is not an optional sign plus decimal digits.
    #[error("invalid big integer literal {0:?}")]
    InvalidBigInt(String),

    /// An operator definition that violates the fixity/precedence rules.
    #[error("operator error: {0}")]
    OperDef(String),
}

/// Faults raised by a write call.
///
/// `InvalidOption` is detected before any output is produced; the other
/// variants abort an in-progress write with whatever has already reached
/// the sink left in place (the sink owns buffering and rollback, if any).
#[derive(Debug, Clone, Error)]
pub enum WriteError {
    /// The options record is malformed (priority outside `0..=1200`).
    #[error("invalid write option: {0}")]
    InvalidOption(String),

    /// The output sink rejected a character.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// A value that cannot be rendered under the active option set, e.g. a
    /// control character in quoted context with character escapes disabled.
    #[error("unrepresentable under active options: {what}")]
    Unrepresentable { what: String },

    /// A term handle failed to resolve while traversing.
    #[error(transparent)]
    Term(#[from] TermError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_render() {
        let e = TermError::UnexpectedKind {
            expected: "atom",
            found: "integer",
        };
        assert_eq!(e.to_string(), "type mismatch: expected atom, found integer");

        let e = WriteError::InvalidOption("priority 4000 out of range".into());
        assert_eq!(
            e.to_string(),
            "invalid write option: priority 4000 out of range"
        );
    }

    #[test]
    fn sink_error_converts() {
        let e: WriteError = SinkError::Closed.into();
        assert!(matches!(e, WriteError::Sink(SinkError::Closed)));
    }
}
