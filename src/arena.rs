//! Defines the [`Arena`] type, which owns the storage behind [`Term`]
//! handles.
//!
//! The arena interns atoms, big-integer literals, strings and binaries, and
//! stores compound terms flat as `[functor, arg1, .., argN]` runs in a
//! single vector.  It also owns the operator registry consulted by the
//! writer; the writer itself only ever reads through [`Term::view`].

use crate::oper::OperDefs;
use crate::term::{AtomId, BigId, BinId, Handle, Slice, StrId, VarId};
use crate::{Term, TermError, View};
use indexmap::IndexSet;
use smartstring::alias::String;

/// Storage and operator registry for a family of terms.
///
/// All construction goes through `&mut self` methods; traversal is through
/// shared references, so a finished term graph can be read from many
/// threads at once.  Terms are never mutated or freed individually; drop
/// the arena to reclaim everything.
#[derive(Debug, Default, Clone)]
pub struct Arena {
    /// Interned atom names; an atom handle is an index into this set.
    pub(crate) atoms: IndexSet<String>,

    /// Big-integer literals, canonical decimal with optional leading `-`.
    pub(crate) bigs: Vec<String>,

    /// String payloads.
    pub(crate) strs: Vec<String>,

    /// Binary payloads.
    pub(crate) bins: Vec<Vec<u8>>,

    /// One slot per variable; `Some` holds the attribute-list slice of an
    /// attributed variable.  The slot index is the variable's identity.
    pub(crate) vars: Vec<Option<Slice>>,

    /// Flat storage for compound terms and attribute lists.
    pub(crate) terms: Vec<Term>,

    /// Operator definitions associated with this arena.
    pub(crate) opers: OperDefs,
}

impl Arena {
    /// Create a new, empty arena with an empty operator registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena preloaded with the standard operator table.
    pub fn with_standard_opers() -> Self {
        Self {
            opers: OperDefs::standard(),
            ..Self::default()
        }
    }

    /// The operator registry, read-only.
    #[inline]
    pub fn opers(&self) -> &OperDefs {
        &self.opers
    }

    /// The operator registry, for defining additional operators.
    #[inline]
    pub fn opers_mut(&mut self) -> &mut OperDefs {
        &mut self.opers
    }

    /// Intern `name` and return the atom term for it.
    pub fn atom(&mut self, name: &str) -> Term {
        let (index, _) = self.atoms.insert_full(name.into());
        Term(Handle::Atom(AtomId(index as u32)))
    }

    /// The empty-list atom `[]`.
    pub fn nil(&mut self) -> Term {
        self.atom("[]")
    }

    /// Intern a big-integer literal: an optional `-` followed by decimal
    /// digits.
    pub fn big(&mut self, literal: &str) -> Result<Term, TermError> {
        let digits = literal.strip_prefix('-').unwrap_or(literal);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TermError::InvalidBigInt(literal.into()));
        }
        self.bigs.push(literal.into());
        Ok(Term(Handle::Big(BigId(self.bigs.len() as u32 - 1))))
    }

    /// Intern a string term.
    pub fn str(&mut self, s: &str) -> Term {
        self.strs.push(s.into());
        Term(Handle::Str(StrId(self.strs.len() as u32 - 1)))
    }

    /// Intern a binary term.
    pub fn bin(&mut self, bytes: &[u8]) -> Term {
        self.bins.push(bytes.to_vec());
        Term(Handle::Bin(BinId(self.bins.len() as u32 - 1)))
    }

    /// Allocate a fresh, plain variable.
    pub fn var(&mut self) -> Term {
        self.vars.push(None);
        Term(Handle::Var(VarId(self.vars.len() as u32 - 1)))
    }

    /// Allocate a fresh attributed variable carrying `attrs`.
    pub fn attvar(&mut self, attrs: &[Term]) -> Term {
        let slice = self.push_run(attrs);
        self.vars.push(Some(slice));
        Term(Handle::Var(VarId(self.vars.len() as u32 - 1)))
    }

    /// Build a compound term `name(args...)`.
    ///
    /// With no arguments this degenerates to the interned atom itself.
    pub fn func(&mut self, name: &str, args: &[Term]) -> Term {
        if args.is_empty() {
            return self.atom(name);
        }
        let functor = self.atom(name);
        let index = self.terms.len() as u32;
        self.terms.push(functor);
        self.terms.extend_from_slice(args);
        Term(Handle::Func(Slice {
            index,
            len: args.len() as u32 + 1,
        }))
    }

    /// Build a proper list of `items`, i.e. a `'.'/2` chain ending in `[]`.
    pub fn list<I>(&mut self, items: I) -> Term
    where
        I: IntoIterator<Item = Term>,
    {
        let tail = self.nil();
        self.list_with_tail(items, tail)
    }

    /// Build a `'.'/2` chain over `items` ending in `tail`.
    pub fn list_with_tail<I>(&mut self, items: I, tail: Term) -> Term
    where
        I: IntoIterator<Item = Term>,
    {
        let items: Vec<Term> = items.into_iter().collect();
        let mut list = tail;
        for item in items.into_iter().rev() {
            list = self.func(".", &[item, list]);
        }
        list
    }

    /// Build the curly term `{inner}`, i.e. `'{}'(inner)`.
    pub fn curly(&mut self, inner: Term) -> Term {
        self.func("{}", &[inner])
    }

    /// Produce a [`View`] of `term` that borrows from this arena.
    #[inline]
    pub fn view(&self, term: Term) -> Result<View<'_>, TermError> {
        term.view(self)
    }

    /// The name of an atom term.
    pub fn atom_name(&self, term: Term) -> Result<&str, TermError> {
        match self.view(term)? {
            View::Atom(name) => Ok(name),
            other => Err(TermError::UnexpectedKind {
                expected: "atom",
                found: other.kind_name(),
            }),
        }
    }

    /// Recognize the `'$VAR'(N)` numbervar convention.
    ///
    /// For `N >= 0` yields the display letter `A`..`Z` and the numeric
    /// suffix `N / 26` (zero meaning no suffix).
    pub fn numbervar_of(&self, term: Term) -> Option<(char, u32)> {
        let View::Func("$VAR", args) = self.view(term).ok()? else {
            return None;
        };
        if args.len() != 1 {
            return None;
        }
        let View::Int(n) = args[0].view(self).ok()? else {
            return None;
        };
        if n < 0 {
            return None;
        }
        let letter = (b'A' + (n % 26) as u8) as char;
        Some((letter, (n / 26) as u32))
    }

    /// Append a run of terms to the flat storage and return its slice.
    fn push_run(&mut self, run: &[Term]) -> Slice {
        let index = self.terms.len() as u32;
        self.terms.extend_from_slice(run);
        Slice {
            index,
            len: run.len() as u32,
        }
    }

    pub(crate) fn term_slice(&self, slice: Slice) -> Option<&[Term]> {
        self.terms
            .get(slice.index as usize..(slice.index + slice.len) as usize)
    }
}
