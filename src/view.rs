//! Defines [`View`], a borrowed read-only representation of a [`Term`].
//!
//! The writer traverses terms exclusively through views; it never touches
//! arena internals and never mutates a term.

use crate::term::Handle;
use crate::{Arena, Term, TermError, VarId};

/// A borrowed view into the decoded contents of a [`Term`].
///
/// Use [`Term::view`] or [`Arena::view`] to obtain one.  No allocation is
/// performed; name and argument references point straight into the arena,
/// so a `View` is valid for as long as the arena it was taken from.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    /// A machine integer.
    Int(i64),
    /// An integer too large for `i64`, as a canonical decimal literal
    /// (optional leading `-`, then digits).
    Big(&'a str),
    /// A floating point value.
    Real(f64),
    /// An atom name.
    Atom(&'a str),
    /// A string payload.
    Str(&'a str),
    /// A binary payload.
    Bin(&'a [u8]),
    /// A plain variable, exposed by its identity.
    Var(VarId),
    /// An attributed variable: identity plus its attribute terms.
    AttVar(VarId, &'a [Term]),
    /// A compound term: functor name and arguments.
    Func(&'a str, &'a [Term]),
}

impl Term {
    /// Produce a [`View`] of this term that borrows from `arena`.
    ///
    /// Fails with [`TermError::InvalidTerm`] when the handle does not
    /// resolve there, i.e. a term presented to an arena other than the
    /// one that allocated it.
    pub fn view(self, arena: &Arena) -> Result<View<'_>, TermError> {
        let invalid = || TermError::InvalidTerm(self);
        match self.0 {
            Handle::Int(i) => Ok(View::Int(i)),
            Handle::Real(f) => Ok(View::Real(f)),
            Handle::Atom(id) => arena
                .atoms
                .get_index(id.0 as usize)
                .map(|s| View::Atom(s.as_str()))
                .ok_or_else(invalid),
            Handle::Big(id) => arena
                .bigs
                .get(id.0 as usize)
                .map(|s| View::Big(s.as_str()))
                .ok_or_else(invalid),
            Handle::Str(id) => arena
                .strs
                .get(id.0 as usize)
                .map(|s| View::Str(s.as_str()))
                .ok_or_else(invalid),
            Handle::Bin(id) => arena
                .bins
                .get(id.0 as usize)
                .map(|b| View::Bin(b.as_slice()))
                .ok_or_else(invalid),
            Handle::Var(id) => match arena.vars.get(id.0 as usize) {
                Some(None) => Ok(View::Var(id)),
                Some(Some(slice)) => {
                    let attrs = arena.term_slice(*slice).ok_or_else(invalid)?;
                    Ok(View::AttVar(id, attrs))
                }
                None => Err(invalid()),
            },
            Handle::Func(slice) => {
                let slot = arena.term_slice(slice).ok_or_else(invalid)?;
                // Functor is the first element of the slice.
                let Handle::Atom(functor) = slot[0].0 else {
                    return Err(invalid());
                };
                let name = arena
                    .atoms
                    .get_index(functor.0 as usize)
                    .ok_or_else(invalid)?;
                Ok(View::Func(name.as_str(), &slot[1..]))
            }
        }
    }
}

impl View<'_> {
    /// A short noun for this kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            View::Int(_) => "integer",
            View::Big(_) => "big integer",
            View::Real(_) => "float",
            View::Atom(_) => "atom",
            View::Str(_) => "string",
            View::Bin(_) => "binary",
            View::Var(_) => "variable",
            View::AttVar(_, _) => "attributed variable",
            View::Func(_, _) => "compound",
        }
    }
}
