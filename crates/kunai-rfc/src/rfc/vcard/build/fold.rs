//! Content line folding.

/// Longest physical line, in octets, before a fold.
const MAX_LINE_OCTETS: usize = 75;

/// Appends `line` to `out` folded at 75 octets and terminated with CRLF.
///
/// Continuation lines start with a single space that counts toward their
/// length. Folds never split a UTF-8 sequence.
pub fn fold_line(line: &str, out: &mut String) {
    let mut budget = MAX_LINE_OCTETS;
    let mut used = 0;

    for c in line.chars() {
        let width = c.len_utf8();
        if used + width > budget {
            out.push_str("\r\n ");
            used = 0;
            budget = MAX_LINE_OCTETS - 1;
        }
        out.push(c);
        used += width;
    }

    out.push_str("\r\n");
}
