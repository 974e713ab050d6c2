//! Character references in text runs.
//!
//! Only `&lt;` and `&gt;` are recognized. Any other `&...;` sequence, and
//! any `&` with no `;` after it, is kept as a literal `&` and scanning moves
//! on by one character.

/// Recognized references, without the leading `&` and trailing `;`.
const CHARACTER_REFERENCES: [(&str, char); 2] = [("lt", '<'), ("gt", '>')];

/// Decode the reference at the start of `input`, which must begin with `&`.
///
/// Returns the decoded character and the number of bytes consumed
/// (including `&` and `;`), or `None` when the text should be kept as a
/// literal `&`.
#[must_use]
pub fn decode_character_reference(input: &str) -> Option<(char, usize)> {
    let body = input.strip_prefix('&')?;
    let end = body.find(';')?;
    let name = &body[..end];

    CHARACTER_REFERENCES
        .iter()
        .find(|(reference, _)| *reference == name)
        .map(|&(_, decoded)| (decoded, end + 2))
}
