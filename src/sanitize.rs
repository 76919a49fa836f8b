// 🔢 Input Sanitizer - free-form field text in, bounded numbers out
//
// Every keystroke that reaches the calculator passes through here first, so
// the rest of the pipeline only ever sees a non-negative whole number with
// at most MAX_DIGITS digits.

/// Maximum digits kept from one field; bounds every value to 9,999,999.
pub const MAX_DIGITS: usize = 7;

/// Reduce raw field text to its digit string.
///
/// Thousands separators and any stray characters are dropped, then the
/// leftmost MAX_DIGITS digits are kept. Excess trailing digits are discarded
/// silently rather than rejected, so a full field simply swallows further
/// keystrokes.
pub fn digits(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_DIGITS)
        .collect()
}

/// Sanitize raw field text into a numeric value.
///
/// An empty or fully unparsable entry yields 0.0; malformed input never
/// blocks further editing.
pub fn sanitize(raw: &str) -> f64 {
    let cleaned = digits(raw);
    if cleaned.is_empty() {
        return 0.0;
    }
    // 7 digits always fit in u32 and convert exactly to f64
    cleaned.parse::<u32>().map(|n| n as f64).unwrap_or(0.0)
}
