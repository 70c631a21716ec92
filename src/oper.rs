//! Operator definitions, precedence, and lookup.
//!
//! Operators may appear in prefix, infix, or postfix positions, each
//! characterized by its [`Fixity`] and [`Assoc`].  Priorities follow the
//! standard convention: an integer in `0..=1200`, where a higher number
//! binds more loosely.  The writer consults the registry read-only to
//! decide between operator notation and canonical functional notation, and
//! to derive the priority context of each operand.

use crate::error::TermError;
use indexmap::IndexMap;
use smartstring::alias::String;
use std::fmt;

/// Returns `TermError::OperDef` with a formatted message.
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err(TermError::OperDef(String::from(format!($($arg)*))))
    };
}

/// Defines the syntactic position (fixity) of an operator.
///
/// # Variants
/// - [`Prefix`]: appears before its operand, e.g. `-x`.
/// - [`Infix`]: appears between two operands, e.g. `x + y`.
/// - [`Postfix`]: appears after its operand, e.g. `x!`.
///
/// [`Prefix`]: Fixity::Prefix
/// [`Infix`]: Fixity::Infix
/// [`Postfix`]: Fixity::Postfix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Fixity {
    /// Prefix operator, appearing before its operand, e.g. `-x`.
    Prefix = 0,

    /// Infix operator, appearing between operands, e.g. `x + y`.
    Infix = 1,

    /// Postfix operator, appearing after its operand, e.g. `x!`.
    Postfix = 2,
}

impl Fixity {
    /// The total number of fixity variants.
    pub const COUNT: usize = 3;

    /// String representations of each fixity variant, in declaration order.
    pub const STRS: &'static [&'static str] = &["prefix", "infix", "postfix"];

    /// The number of operands an operator of this fixity takes.
    pub fn required_arity(self) -> usize {
        match self {
            Fixity::Prefix | Fixity::Postfix => 1,
            Fixity::Infix => 2,
        }
    }
}

impl From<Fixity> for usize {
    /// Converts a [`Fixity`] value into its numeric index (0–2).
    fn from(f: Fixity) -> Self {
        f as usize
    }
}

impl fmt::Display for Fixity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Fixity::STRS[usize::from(*self)])
    }
}

/// Operator associativity classification.
///
/// Together with [`Fixity`] this encodes the familiar operator classes:
/// `xfx` is a non-associative infix, `yfx` left-associative, `xfy`
/// right-associative; `fy`/`fx` are prefix and `yf`/`xf` postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Assoc {
    /// Non-associative operator (`xfx`, `fx`, `xf`).
    None = 0,
    /// Left-associative operator (`yfx`, `yf`).
    Left = 1,
    /// Right-associative operator (`xfy`, `fy`).
    Right = 2,
}

impl Assoc {
    /// Total number of associativity variants.
    pub const COUNT: usize = 3;

    /// Canonical string representations for each variant.
    pub const STRS: &'static [&'static str] = &["none", "left", "right"];
}

impl fmt::Display for Assoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Assoc::STRS[*self as usize])
    }
}

/// Minimum allowed operator priority.
pub const MIN_OPER_PREC: u16 = 0;
/// Maximum allowed operator priority.
pub const MAX_OPER_PREC: u16 = 1200;

/// Defines a single operator: fixity, priority, and associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperDef {
    /// Operator fixity (prefix, infix, or postfix).
    pub fixity: Fixity,
    /// Operator priority (`0`–`1200`); higher binds more loosely.
    pub prec: u16,
    /// Operator associativity (constrained by fixity).
    pub assoc: Assoc,
}

impl OperDef {
    /// The priority context for this operator's left operand.
    ///
    /// A left operand may carry the operator's own priority only when the
    /// operator is left-associative (`yfx`, `yf`); otherwise it must bind
    /// strictly tighter.
    pub fn left_prec(&self) -> u16 {
        match (self.fixity, self.assoc) {
            (Fixity::Infix | Fixity::Postfix, Assoc::Left) => self.prec,
            _ => self.prec.saturating_sub(1),
        }
    }

    /// The priority context for this operator's right operand.
    ///
    /// Mirror of [`left_prec`](Self::left_prec) for right-associative
    /// operators (`xfy`, `fy`).
    pub fn right_prec(&self) -> u16 {
        match (self.fixity, self.assoc) {
            (Fixity::Infix | Fixity::Prefix, Assoc::Right) => self.prec,
            _ => self.prec.saturating_sub(1),
        }
    }
}

/// Container for operator definitions indexed by [`Fixity`].
///
/// One name may carry up to three definitions, one per fixity slot, the
/// way `-` is both a prefix and an infix operator.
#[derive(Debug, Clone, Default)]
pub struct OperDefTab {
    tab: [Option<OperDef>; Fixity::COUNT],
}

impl OperDefTab {
    /// Creates a new, empty table with all fixity slots unset.
    pub const fn new() -> Self {
        Self {
            tab: [None; Fixity::COUNT],
        }
    }

    /// Retrieves the definition for the given [`Fixity`], if present.
    pub fn get(&self, fixity: Fixity) -> Option<&OperDef> {
        self.tab[usize::from(fixity)].as_ref()
    }

    /// Returns `true` if at least one fixity slot is defined.
    pub fn is_defined(&self) -> bool {
        self.tab.iter().any(|x| x.is_some())
    }
}

impl std::ops::Index<Fixity> for OperDefTab {
    type Output = Option<OperDef>;

    fn index(&self, i: Fixity) -> &Self::Output {
        &self.tab[usize::from(i)]
    }
}

impl std::ops::IndexMut<Fixity> for OperDefTab {
    fn index_mut(&mut self, i: Fixity) -> &mut Self::Output {
        &mut self.tab[usize::from(i)]
    }
}

/// Central registry of all operator definitions, keyed by operator name.
#[derive(Debug, Clone, Default)]
pub struct OperDefs {
    map: IndexMap<String, OperDefTab>,
}

impl OperDefs {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    /// The standard operator table.
    pub fn standard() -> Self {
        use Assoc::{Left, None, Right};
        use Fixity::{Infix, Prefix};

        const XFX: &[(&str, u16)] = &[
            (":-", 1200),
            ("-->", 1200),
            (":=", 990),
            ("=", 700),
            ("\\=", 700),
            ("==", 700),
            ("\\==", 700),
            ("@<", 700),
            ("@>", 700),
            ("@=<", 700),
            ("@>=", 700),
            ("=..", 700),
            ("is", 700),
            ("=:=", 700),
            ("=\\=", 700),
            ("<", 700),
            (">", 700),
            ("=<", 700),
            (">=", 700),
            ("**", 200),
        ];
        const XFY: &[(&str, u16)] = &[
            (";", 1100),
            ("->", 1050),
            (",", 1000),
            (":", 600),
            ("^", 200),
        ];
        const YFX: &[(&str, u16)] = &[
            ("+", 500),
            ("-", 500),
            ("/\\", 500),
            ("\\/", 500),
            ("xor", 500),
            ("*", 400),
            ("/", 400),
            ("//", 400),
            ("rem", 400),
            ("mod", 400),
            ("div", 400),
            ("<<", 400),
            (">>", 400),
        ];
        const FY: &[(&str, u16)] = &[("\\+", 900), ("-", 200), ("+", 200), ("\\", 200)];
        const FX: &[(&str, u16)] = &[(":-", 1200), ("?-", 1200), ("$", 1)];

        let mut defs = Self::new();
        let groups: &[(&[(&str, u16)], Fixity, Assoc)] = &[
            (XFX, Infix, None),
            (XFY, Infix, Right),
            (YFX, Infix, Left),
            (FY, Prefix, Right),
            (FX, Prefix, None),
        ];
        for &(group, fixity, assoc) in groups {
            for &(name, prec) in group {
                defs.define(name, fixity, prec, assoc)
                    .expect("standard operator table");
            }
        }
        defs
    }

    /// Define one operator.
    ///
    /// # Errors
    /// Rejects a priority outside `0..=1200`, a left-associative prefix or
    /// right-associative postfix operator, and a redefinition of an
    /// existing name/fixity pair.
    pub fn define(
        &mut self,
        name: &str,
        fixity: Fixity,
        prec: u16,
        assoc: Assoc,
    ) -> Result<(), TermError> {
        if prec > MAX_OPER_PREC {
            bail!(
                "precedence {} out of range {}..={}",
                prec,
                MIN_OPER_PREC,
                MAX_OPER_PREC
            );
        }
        if matches!((fixity, assoc), (Fixity::Prefix, Assoc::Left))
            || matches!((fixity, assoc), (Fixity::Postfix, Assoc::Right))
        {
            bail!(
                "operator {:?} with type {} cannot have associativity {}",
                name,
                fixity,
                assoc
            );
        }

        let tab = self.map.entry(name.into()).or_insert_with(OperDefTab::new);
        if tab[fixity].is_some() {
            bail!("cannot re-define {:?} as {}", name, fixity);
        }
        tab[fixity] = Some(OperDef { fixity, prec, assoc });
        Ok(())
    }

    /// Look up the definitions for `name`, if any fixity is defined.
    pub fn lookup(&self, name: &str) -> Option<&OperDefTab> {
        self.map.get(name).filter(|tab| tab.is_defined())
    }

    /// The total number of named entries in this registry.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
