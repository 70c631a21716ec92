//! # Terms Writer
//!
//! A precedence-driven text writer for Prolog-like terms.
//!
//! This crate converts an in-memory term (an atom, number, variable,
//! attributed variable, or compound) into a token stream that a reader
//! with matching settings parses back to an equivalent term.  Output is
//! driven by an operator table: compound terms whose functor carries a
//! prefix, infix, or postfix definition print in operator notation, and a
//! subexpression is parenthesized exactly when printing it bare inside its
//! context priority would change how it re-associates.  Around that core
//! sit the quoting and escaping decision for atoms, shortest round-trip
//! float formatting, and a token-boundary guard that inserts a space
//! wherever two adjacent tokens would otherwise re-lex as one.
//!
//! Terms live in an [`Arena`]: a compact store that interns atoms and
//! lays compound terms out flat, handing out 16-byte [`Term`] handles.
//! The arena also owns the [`OperDefs`] registry the writer consults.
//! Inspect terms with [`Term::view`], which yields a borrowed [`View`].
//!
//! The entry points mirror the classic predicates: [`write`] (plain),
//! [`writeq`] (quoted), [`print`] (with a [`Portray`] hook),
//! [`write_canonical`] (quoted, operators suppressed), and the general
//! [`write_term`] taking a full [`WriteOptions`] record.  Output goes to
//! any [`Sink`]; `String` and [`IoSink`] are provided.
//!
//! ## Example
//! ```rust
//! use terms_writer::{term_to_string, Arena, Term, WriteOptions};
//!
//! let mut arena = Arena::with_standard_opers();
//! let x = arena.var();
//! let sum = arena.func("+", &[Term::int(1), Term::int(2)]);
//! let goal = arena.func("=", &[x, sum]);
//!
//! let text = term_to_string(&arena, goal, &WriteOptions::quoted()).unwrap();
//! assert_eq!(text, "_0=1+2");
//!
//! // The same term with operators suppressed:
//! let text = term_to_string(&arena, goal, &WriteOptions::canonical()).unwrap();
//! assert_eq!(text, "=(_0,+(1,2))");
//! ```

mod arena;
mod classify;
mod display;
mod error;
mod float;
mod oper;
mod options;
mod quote;
mod sink;
mod term;
mod view;
mod visited;
mod write;

pub use arena::Arena;
pub use classify::{classify, CharClass};
pub use display::TermDisplay;
pub use error::{TermError, WriteError};
pub use float::format_float;
pub use oper::{Assoc, Fixity, OperDef, OperDefTab, OperDefs, MAX_OPER_PREC, MIN_OPER_PREC};
pub use options::{AttributeMode, BlobMode, Spacing, WriteOptions};
pub use quote::needs_quotes;
pub use sink::{IoSink, Sink, SinkError};
pub use term::{Term, VarId};
pub use view::View;
pub use write::{
    print, term_to_string, write, write_canonical, write_term, writeln, writeq, Portray, Writer,
};
