//! Localized price text to integer conversion.

use crate::error::ScraperError;

const CURRENCY_SYMBOLS: &[char] = &['₫', '$', '€', '£', '¥', '₩', '₹'];
const GROUP_SEPARATORS: &[char] = &[',', '.', '\''];

/// Separators allowed between three-digit groups, as in `"4 109 000"`.
const SPACE_SEPARATORS: &[char] = &[' ', '\u{a0}', '\u{202f}'];

/// Parses a displayed price such as `"₫1,234,567"` or `"4.109.000 ₫"` into
/// its integer amount in the smallest currency unit.
///
/// Currency symbols and group separators are stripped and surrounding
/// whitespace is trimmed. Interior spaces (including NBSP and thin space) are
/// accepted only between digit groups of three, so a sale price rendered next
/// to the original price is rejected rather than fused into one number.
///
/// # Errors
///
/// Returns [`ScraperError::MalformedPrice`] if anything else is left over or
/// the number does not fit in an `i64`.
pub fn parse_price(raw: &str) -> Result<i64, ScraperError> {
    let malformed = || ScraperError::MalformedPrice {
        raw: raw.to_owned(),
    };

    let stripped: String = raw
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && !GROUP_SEPARATORS.contains(c))
        .collect();

    let mut groups = stripped.trim().split(SPACE_SEPARATORS);
    let lead = groups.next().unwrap_or_default();
    let tail: Vec<&str> = groups.collect();
    if !tail.is_empty() && (!(1..=3).contains(&lead.len()) || tail.iter().any(|g| g.len() != 3)) {
        return Err(malformed());
    }

    let digits: String = std::iter::once(lead).chain(tail).collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    digits.parse::<i64>().map_err(|_| malformed())
}
