//! Defines [`WriteOptions`], the immutable per-call configuration record.
//!
//! A host option surface (flag parsing, Prolog option lists) translates
//! into this record once at the boundary; the writer core reads named
//! fields only and never sees flag words.

use crate::error::WriteError;
use crate::oper::MAX_OPER_PREC;
use smartstring::alias::String;

/// How attributed variables render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeMode {
    /// Render as a plain variable.
    #[default]
    Ignore,
    /// Render the variable followed by an ellipsis marker.
    Dots,
    /// Render the attribute list inline on first sight, a bare reference on
    /// every revisit.
    Write,
    /// Offer the variable to the portray hook first, then as `Write`.
    Portray,
}

/// How binary terms render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlobMode {
    /// The built-in `hex{..}` rendering.
    #[default]
    Default,
    /// Offer the blob to the portray hook first.
    Portray,
}

/// Where separating spaces go beyond what re-tokenization demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    /// Only the spaces the token-boundary guard requires.
    #[default]
    Standard,
    /// Additionally, a space after every argument separator.
    NextArgument,
}

/// An immutable snapshot of every knob a write call honours.
///
/// Construct one with [`Default`] or a preset, adjust fields directly, and
/// pass it by reference; the writer never mutates it.  The presets mirror
/// the classic entry points: [`plain`](Self::plain) for `write`,
/// [`quoted`](Self::quoted) for `writeq`, [`print`](Self::print) for
/// `print`, and [`canonical`](Self::canonical) for `write_canonical`.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Quote and escape atoms/strings that would not read back.
    pub quoted: bool,
    /// Suppress operator notation; everything prints functionally.
    pub ignore_ops: bool,
    /// Render `'$VAR'(N)` as `A`, `B`, ... `Z`, `A1`, ...
    pub numbervars: bool,
    /// Offer each subterm to the portray hook before default rendering.
    pub portray: bool,
    /// Use backslash escapes inside quotes; otherwise quotes are doubled.
    pub char_escapes: bool,
    /// Render strings in backquotes instead of double quotes.
    pub backquoted_string: bool,
    /// Attributed-variable rendering.
    pub attribute_mode: AttributeMode,
    /// Binary rendering.
    pub blob_mode: BlobMode,
    /// Replace subterms deeper than this with an ellipsis marker.
    pub max_depth: Option<u32>,
    /// Module the host resolved operators against; diagnostic here, the
    /// registry itself lives on the arena.
    pub module: String,
    /// Extra spacing between arguments.
    pub spacing: Spacing,
    /// Priority of the surrounding context, `0..=1200`.
    pub priority: u16,
    /// Compose with earlier output: keep the last-character state of the
    /// [`Writer`](crate::Writer) instead of resetting it.
    pub partial: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            quoted: false,
            ignore_ops: false,
            numbervars: false,
            portray: false,
            char_escapes: true,
            backquoted_string: false,
            attribute_mode: AttributeMode::default(),
            blob_mode: BlobMode::default(),
            max_depth: None,
            module: "user".into(),
            spacing: Spacing::default(),
            priority: MAX_OPER_PREC,
            partial: false,
        }
    }
}

impl WriteOptions {
    /// The `write/1` option set: operators, numbervars, no quoting.
    pub fn plain() -> Self {
        Self {
            numbervars: true,
            ..Self::default()
        }
    }

    /// The `writeq/1` option set: quoted with numbervars.
    pub fn quoted() -> Self {
        Self {
            quoted: true,
            numbervars: true,
            ..Self::default()
        }
    }

    /// The `print/1` option set: portray enabled, numbervars.
    pub fn print() -> Self {
        Self {
            portray: true,
            numbervars: true,
            ..Self::default()
        }
    }

    /// The `write_canonical/1` option set: quoted, operators suppressed.
    pub fn canonical() -> Self {
        Self {
            quoted: true,
            ignore_ops: true,
            numbervars: true,
            ..Self::default()
        }
    }

    /// Replace the depth limit.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Replace the attributed-variable mode.
    pub fn with_attributes(mut self, mode: AttributeMode) -> Self {
        self.attribute_mode = mode;
        self
    }

    /// Reject a malformed record before any output is produced.
    pub fn validate(&self) -> Result<(), WriteError> {
        if self.priority > MAX_OPER_PREC {
            return Err(WriteError::InvalidOption(
                format!(
                    "priority {} out of range 0..={}",
                    self.priority, MAX_OPER_PREC
                )
                .into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = WriteOptions::default();
        assert!(!opts.quoted);
        assert!(opts.char_escapes);
        assert_eq!(opts.priority, 1200);
        assert_eq!(opts.module.as_str(), "user");
        assert_eq!(opts.attribute_mode, AttributeMode::Ignore);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn presets_mirror_the_entry_points() {
        assert!(WriteOptions::plain().numbervars);
        assert!(!WriteOptions::plain().quoted);

        let q = WriteOptions::quoted();
        assert!(q.quoted && q.numbervars && !q.ignore_ops);

        let p = WriteOptions::print();
        assert!(p.portray && p.numbervars && !p.quoted);

        let c = WriteOptions::canonical();
        assert!(c.quoted && c.ignore_ops && c.numbervars);
    }

    #[test]
    fn out_of_range_priority_is_rejected() {
        let opts = WriteOptions {
            priority: 1201,
            ..WriteOptions::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(WriteError::InvalidOption(_))
        ));
    }

    #[test]
    fn builders() {
        let opts = WriteOptions::quoted()
            .with_max_depth(3)
            .with_attributes(AttributeMode::Write);
        assert_eq!(opts.max_depth, Some(3));
        assert_eq!(opts.attribute_mode, AttributeMode::Write);
    }
}
