//! Defines [`TermDisplay`], a [`fmt::Display`] bridge over the writer.
//!
//! Ties together a [`Term`] and its [`Arena`] so terms slot into the
//! standard formatting macros (`format!`, `println!`, ...).  Output is the
//! quoted form, so what you log is what the reader accepts back.

use crate::sink::{Sink, SinkError};
use crate::{writeq, Arena, Term};
use std::fmt::{self, Write as _};

/// A wrapper that ties together a [`Term`] and its [`Arena`] for use with
/// the standard formatting machinery.
///
/// Construct instances via [`Term::display`].
///
/// ### Example
/// ```rust
/// use terms_writer::{Arena, Term};
///
/// let mut arena = Arena::with_standard_opers();
/// let term = arena.func("pair", &[Term::int(1), Term::int(2)]);
/// assert_eq!(format!("{}", term.display(&arena)), "pair(1,2)");
/// ```
pub struct TermDisplay<'a> {
    /// The term to display.
    term: Term,
    /// The arena where the term is stored.
    arena: &'a Arena,
}

impl Term {
    /// Return a [`TermDisplay`] suitable for formatting with
    /// [`fmt::Display`].
    #[inline]
    pub fn display(self, arena: &Arena) -> TermDisplay<'_> {
        TermDisplay { term: self, arena }
    }
}

struct FmtSink<'a, 'b>(&'a mut fmt::Formatter<'b>);

impl Sink for FmtSink<'_, '_> {
    fn put_char(&mut self, c: char) -> Result<(), SinkError> {
        self.0.write_char(c).map_err(|_| SinkError::Closed)
    }

    fn put_str(&mut self, s: &str) -> Result<(), SinkError> {
        self.0.write_str(s).map_err(|_| SinkError::Closed)
    }
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sink = FmtSink(f);
        writeq(self.arena, self.term, &mut sink).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_the_quoted_form() {
        let mut arena = Arena::with_standard_opers();
        let odd = arena.atom("two words");
        let t = arena.func("f", &[odd, Term::int(3)]);
        assert_eq!(format!("{}", t.display(&arena)), "f('two words',3)");
    }

    #[test]
    fn display_uses_operator_notation() {
        let mut arena = Arena::with_standard_opers();
        let sum = arena.func("+", &[Term::int(1), Term::int(2)]);
        assert_eq!(sum.display(&arena).to_string(), "1+2");
    }
}
