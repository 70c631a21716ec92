//! Character classification shared by the quoting and spacing decisions.
//!
//! Both the atom quoter and the token-boundary guard consult this single
//! table, so an atom judged safe to print unquoted can never merge with a
//! neighbouring token under the guard's rules.

/// Token class of a single codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// May start an unquoted atom: a lowercase letter.
    AlphaStart,
    /// May continue an identifier: letters, digits, underscore.
    AlphaCont,
    /// A graphic character; runs of these form symbolic atoms.
    Symbol,
    /// A single-character token (`!`, `,`, `;`, `|`).
    Solo,
    /// A quote mark (`'`, `"`, `` ` ``).
    Quote,
    /// The opening parenthesis.
    OpenParen,
    /// Layout.
    Blank,
    /// Everything else (closing brackets, control characters, ...).
    Other,
}

/// Classify one codepoint.  Total and stateless.
pub fn classify(c: char) -> CharClass {
    if c.is_alphabetic() && c.is_lowercase() {
        CharClass::AlphaStart
    } else if c == '_' || c.is_alphanumeric() {
        CharClass::AlphaCont
    } else if is_symbol_char(c) {
        CharClass::Symbol
    } else if is_solo_char(c) {
        CharClass::Solo
    } else if is_quote_char(c) {
        CharClass::Quote
    } else if c == '(' {
        CharClass::OpenParen
    } else if c.is_whitespace() {
        CharClass::Blank
    } else {
        CharClass::Other
    }
}

/// The fixed set of graphic characters.
pub(crate) fn is_symbol_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-'
            | '*'
            | '/'
            | '\\'
            | '^'
            | '<'
            | '>'
            | '='
            | '~'
            | ':'
            | '.'
            | '?'
            | '@'
            | '#'
            | '&'
            | '$'
    )
}

/// Single-token punctuation.
pub(crate) fn is_solo_char(c: char) -> bool {
    matches!(c, '!' | ',' | ';' | '|')
}

pub(crate) fn is_quote_char(c: char) -> bool {
    matches!(c, '\'' | '"' | '`')
}

/// Identifier-class characters as the boundary guard sees them: anything
/// that can continue an alphanumeric token.
fn is_alpha(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// The last thing the writer emitted, as far as token boundaries care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Last {
    /// Nothing yet, or output the writer promises is self-delimiting.
    #[default]
    None,
    /// A prefix `-`/`+` operator was just written; a following digit or
    /// symbol character would be absorbed into a signed numeral or a
    /// longer symbolic atom.
    PrefixSign,
    /// An ordinary character.
    Char(char),
}

/// Decide whether a separating space is mandatory between the previously
/// emitted character and `next`.
///
/// The rules exactly cover the ways two adjacent tokens can re-lex as one:
/// identifier against identifier, symbol run against symbol run, an atom
/// name against `(` (which the reader would take as a compound head), a
/// quote against an identical quote, and a quote directly after a digit
/// (character-code literal).
pub(crate) fn needs_space(last: Last, next: char) -> bool {
    match last {
        Last::None => false,
        Last::PrefixSign => next.is_ascii_digit() || is_symbol_char(next),
        Last::Char(prev) => {
            (is_alpha(prev) && is_alpha(next))
                || (is_symbol_char(prev) && is_symbol_char(next))
                || (next == '(' && prev != '(' && !prev.is_whitespace())
                || (next == '\'' && prev.is_ascii_digit())
                || (is_quote_char(next) && prev == next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes() {
        assert_eq!(classify('a'), CharClass::AlphaStart);
        assert_eq!(classify('Z'), CharClass::AlphaCont);
        assert_eq!(classify('_'), CharClass::AlphaCont);
        assert_eq!(classify('7'), CharClass::AlphaCont);
        assert_eq!(classify('+'), CharClass::Symbol);
        assert_eq!(classify('.'), CharClass::Symbol);
        assert_eq!(classify(','), CharClass::Solo);
        assert_eq!(classify('!'), CharClass::Solo);
        assert_eq!(classify('\''), CharClass::Quote);
        assert_eq!(classify('('), CharClass::OpenParen);
        assert_eq!(classify(' '), CharClass::Blank);
        assert_eq!(classify(')'), CharClass::Other);
        assert_eq!(classify('\u{7}'), CharClass::Other);
    }

    #[test]
    fn alpha_against_alpha() {
        assert!(needs_space(Last::Char('a'), 'b'));
        assert!(needs_space(Last::Char('1'), 'a'));
        assert!(needs_space(Last::Char('a'), '1'));
        assert!(!needs_space(Last::Char('a'), '+'));
        assert!(!needs_space(Last::Char('('), 'a'));
    }

    #[test]
    fn symbol_against_symbol() {
        assert!(needs_space(Last::Char('+'), '+'));
        assert!(needs_space(Last::Char('='), '<'));
        assert!(!needs_space(Last::Char('+'), 'a'));
        assert!(!needs_space(Last::Char(','), '+'));
    }

    #[test]
    fn open_paren_rule() {
        assert!(needs_space(Last::Char('a'), '('));
        assert!(needs_space(Last::Char('+'), '('));
        assert!(!needs_space(Last::Char('('), '('));
        assert!(!needs_space(Last::Char(' '), '('));
        assert!(!needs_space(Last::None, '('));
    }

    #[test]
    fn quote_rules() {
        assert!(needs_space(Last::Char('1'), '\''));
        assert!(needs_space(Last::Char('\''), '\''));
        assert!(needs_space(Last::Char('"'), '"'));
        assert!(!needs_space(Last::Char('\''), '"'));
        assert!(!needs_space(Last::Char('a'), '"'));
    }

    #[test]
    fn pending_sign_guards_digits_and_symbols() {
        assert!(needs_space(Last::PrefixSign, '1'));
        assert!(needs_space(Last::PrefixSign, '-'));
        assert!(!needs_space(Last::PrefixSign, 'a'));
        assert!(!needs_space(Last::PrefixSign, '('));
    }
}
