//! vCard text escaping.

use crate::rfc::vcard::core::VCardVersion;

/// Escapes a text value for `version`.
///
/// All versions escape backslash, semicolon and newline. Commas are only
/// escaped from 3.0 on, since 2.1 has no comma-separated lists.
#[must_use]
pub fn escape_text(s: &str, version: VCardVersion) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            ';' => result.push_str("\\;"),
            ',' if version != VCardVersion::V2_1 => result.push_str("\\,"),
            '\r' => {} // Skip CR (use \n for newlines)
            _ => result.push(c),
        }
    }

    result
}

/// Escapes a parameter value for `version`.
///
/// 4.0 uses RFC 6868 caret encoding. Earlier versions cannot represent a
/// double quote or a newline, so they are replaced with `'` and a space.
/// Returns `(value, needs_quotes)`.
#[must_use]
pub fn escape_param_value(s: &str, version: VCardVersion) -> (String, bool) {
    let caret = version == VCardVersion::V4_0;
    let mut result = String::with_capacity(s.len());
    let mut needs_quotes = false;

    for c in s.chars() {
        match c {
            '^' if caret => result.push_str("^^"),
            '\n' if caret => result.push_str("^n"),
            '"' if caret => {
                result.push_str("^'");
                needs_quotes = true;
            }
            '\n' => result.push(' '),
            '"' => result.push('\''),
            ':' | ';' | ',' => {
                result.push(c);
                needs_quotes = true;
            }
            _ if c.is_control() => {
                // Skip other control characters
            }
            _ => result.push(c),
        }
    }

    (result, needs_quotes)
}
