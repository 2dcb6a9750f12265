//! Numeric shape of tokens.
//!
//! Runs of two or more digits (possibly with `.` and `,` in them) are replaced
//! by their shape, so that `1,234` and `5,678` are counted as the same token.
//! Single digits (`r2d2`) are left alone.
use std::borrow::Cow;

use unic_ucd::GeneralCategory;

/// Marks a token that has been generalized.
/// Normalized tokens are casefolded, so they never start with it.
pub const NUM_PREFIX: &str = "NUM:";

/// What digits are replaced with.
pub const DIGIT_PLACEHOLDER: char = '#';

#[inline]
fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || GeneralCategory::of(c) == GeneralCategory::DecimalNumber
}

#[inline]
fn is_number_part(c: char) -> bool {
    c == '.' || c == ',' || is_digit(c)
}

/// Replace the digits of number-like runs by [DIGIT_PLACEHOLDER] and prefix the result with [NUM_PREFIX].
///
/// A run starts with a digit and goes on with at least one more digit, period or comma.
/// Tokens without such a run are returned unchanged.
///
/// ```
/// use polyglot_corpus::normalization::generalize;
///
/// assert_eq!(generalize("r2d2"), "r2d2");
/// assert_eq!(generalize("v3.2"), "NUM:v#.#");
/// assert_eq!(generalize("24,601"), "NUM:##,###");
/// ```
pub fn generalize(token: &str) -> Cow<'_, str> {
    if !token.chars().any(is_digit) {
        return Cow::Borrowed(token);
    }

    let chars: Vec<char> = token.chars().collect();
    let mut out = String::with_capacity(NUM_PREFIX.len() + token.len());
    out.push_str(NUM_PREFIX);
    let mut changed = false;

    let mut i = 0;
    while i < chars.len() {
        if is_digit(chars[i]) {
            let end = chars[i + 1..]
                .iter()
                .position(|c| !is_number_part(*c))
                .map_or(chars.len(), |offset| i + 1 + offset);
            if end - i >= 2 {
                out.extend(chars[i..end].iter().map(|&c| {
                    if is_digit(c) {
                        DIGIT_PLACEHOLDER
                    } else {
                        c
                    }
                }));
                changed = true;
                i = end;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(token)
    }
}
