//! The quoting decision for atoms and the escaped rendering shared by
//! atoms and strings.

use crate::classify::{classify, is_symbol_char, CharClass};
use crate::error::WriteError;

/// Would this atom text re-read as a single atom token without quotes?
///
/// Unquoted forms are: a lowercase-initial identifier, a run of symbol
/// characters, or one of the fixed solo atoms `[]`, `{}`, `!`, `;`.  A
/// lone `.` would read as end-of-clause and a symbolic atom containing
/// `/*` would open a comment, so both are quoted.
pub fn needs_quotes(text: &str) -> bool {
    match text {
        "[]" | "{}" | "!" | ";" => return false,
        "" | "." => return true,
        _ => {}
    }

    let mut chars = text.chars();
    let first = chars.next().expect("nonempty atom text");
    if classify(first) == CharClass::AlphaStart {
        return !chars
            .all(|c| matches!(classify(c), CharClass::AlphaStart | CharClass::AlphaCont));
    }

    if text.chars().all(is_symbol_char) {
        return text.contains("/*");
    }

    true
}

/// Append `text` wrapped in `quote` marks, escaping as the mode demands.
///
/// With `escapes` set, the quote character and backslash get a backslash
/// escape and control characters use the named escapes or `\xHH\`.  With
/// `escapes` unset the quote character is doubled, and a control character
/// is a fault: doubled-quote syntax has no way to spell it that reads
/// back reliably.
pub(crate) fn push_quoted(
    out: &mut String,
    text: &str,
    quote: char,
    escapes: bool,
) -> Result<(), WriteError> {
    out.push(quote);
    for c in text.chars() {
        if c == quote {
            if escapes {
                out.push('\\');
            }
            out.push(c);
            if !escapes {
                out.push(c);
            }
        } else if c == '\\' && escapes {
            out.push_str("\\\\");
        } else if c.is_control() {
            if !escapes {
                return Err(WriteError::Unrepresentable {
                    what: format!(
                        "control character U+{:04X} in quoted text with character escapes disabled",
                        c as u32
                    )
                    .into(),
                });
            }
            match c {
                '\u{7}' => out.push_str("\\a"),
                '\u{8}' => out.push_str("\\b"),
                '\t' => out.push_str("\\t"),
                '\n' => out.push_str("\\n"),
                '\u{B}' => out.push_str("\\v"),
                '\u{C}' => out.push_str("\\f"),
                '\r' => out.push_str("\\r"),
                _ => {
                    out.push_str(&format!("\\x{:X}\\", c as u32));
                }
            }
        } else {
            out.push(c);
        }
    }
    out.push(quote);
    Ok(())
}
