//! vCard lexer for line unfolding and content line parsing.
//!
//! vCard uses the same folding/unfolding rules as iCalendar (RFC 5545 §3.1).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::vcard::core::{Encoding, VCardDataType, VCardParameters, names};

/// Unfolds a vCard document by removing line continuations.
///
/// Line continuations are CRLF followed by a single space or tab.
/// Also handles bare LF for lenient parsing.
#[must_use]
pub fn unfold(input: &str) -> String {
    logical_lines(input)
        .into_iter()
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits input into unfolded logical lines, each tagged with the 1-based
/// number of the physical line it started on. Blank lines are dropped.
#[must_use]
pub fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (index, line) in input.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if let Some(continuation) = line.strip_prefix([' ', '\t'])
            && let Some((_, prev)) = lines.last_mut()
        {
            prev.push_str(continuation);
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }
        lines.push((index + 1, line.to_string()));
    }

    lines
}

/// A parsed content line before value interpretation.
#[derive(Debug, Clone)]
pub struct ContentLine {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name (uppercase).
    pub name: String,
    pub params: VCardParameters,
    /// Raw value string, still escaped.
    pub value: String,
}

/// Parses a single content line into its components.
///
/// Format: `[group.]name[;param=value]*:value`. `caret` turns on RFC 6868
/// decoding of parameter values (vCard 4.0). Parameters written without a
/// name, as vCard 2.1 allows, are assigned to ENCODING, VALUE or TYPE by
/// their value.
///
/// ## Errors
/// Returns an error if the line is malformed or missing the colon separator.
pub fn parse_content_line(line: &str, line_num: usize, caret: bool) -> ParseResult<ContentLine> {
    let colon_pos = find_value_separator(line).ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            "missing colon separator",
        )
    })?;

    let (name_params, value) = line.split_at(colon_pos);
    let value = &value[1..];

    let (group, name_params) = parse_group(name_params);

    let (name, params_str) = match name_params.split_once(';') {
        Some((name, params)) => (name, Some(params)),
        None => (name_params, None),
    };
    let name = name.trim();

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            format!("invalid property name: {name}"),
        ));
    }

    let params = match params_str {
        Some(params_str) => parse_parameters(params_str, caret),
        None => VCardParameters::new(),
    };

    Ok(ContentLine {
        group: group.map(String::from),
        name: name.to_ascii_uppercase(),
        params,
        value: value.to_string(),
    })
}

/// Finds the colon that separates name/params from value.
///
/// Must handle quoted parameter values that may contain colons.
fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Parses optional group prefix.
fn parse_group(s: &str) -> (Option<&str>, &str) {
    if let Some((potential_group, rest)) = s.split_once('.')
        && !potential_group.is_empty()
        && !potential_group.contains(';')
        && potential_group
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return (Some(potential_group), rest);
    }
    (None, s)
}

fn parse_parameters(s: &str, caret: bool) -> VCardParameters {
    let mut params = VCardParameters::new();
    let mut remaining = s;

    while !remaining.is_empty() {
        let (raw, rest) = split_parameter(remaining);
        remaining = rest;

        match raw.split_once('=') {
            Some((name, values)) => {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                for value in parse_param_values(values, caret) {
                    params.add(name, value);
                }
            }
            None => {
                let value = raw.trim();
                if !value.is_empty() {
                    params.add(bare_parameter_name(value), value);
                }
            }
        }
    }

    params
}

/// Name a bare vCard 2.1 parameter value belongs to.
fn bare_parameter_name(value: &str) -> &'static str {
    if Encoding::known(value).is_some() {
        names::ENCODING
    } else if !matches!(VCardDataType::from_name(value), VCardDataType::Other(_)) {
        names::VALUE
    } else {
        names::TYPE
    }
}

/// Cuts the next `;`-terminated parameter off, respecting quotes.
fn split_parameter(s: &str) -> (&str, &str) {
    let mut in_quotes = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => return (&s[..i], &s[i + 1..]),
            _ => {}
        }
    }
    (s, "")
}

/// Parses parameter values (comma-separated, possibly quoted).
fn parse_param_values(s: &str, caret: bool) -> Vec<String> {
    let mut values = Vec::new();
    let mut current_value = String::new();
    let mut in_quotes = false;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current_value)),
            '^' if caret => match chars.peek() {
                Some('n' | 'N') => {
                    chars.next();
                    current_value.push('\n');
                }
                Some('\'') => {
                    chars.next();
                    current_value.push('"');
                }
                Some('^') => {
                    chars.next();
                    current_value.push('^');
                }
                _ => current_value.push('^'),
            },
            _ => current_value.push(c),
        }
    }

    values.push(current_value);
    values
}
