/// Insert a thousands separator every three digits, counting from the right.
/// Expects a plain digit string (what `sanitize::digits` produces).
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Echo an input value the way its field renders it: whole number, grouped.
/// Values are non-negative whole numbers by the time they get here.
pub fn format_input(value: f64) -> String {
    group_thousands(&format!("{}", value.round() as u64))
}

/// Render a computed share with fixed two decimals and grouping,
/// e.g. 3157.8947 becomes "3,157.89".
pub fn format_share(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    match fixed.split_once('.') {
        Some((whole, frac)) => format!("{}.{}", group_thousands(whole), frac),
        None => fixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(""), "");
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("36000"), "36,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_input() {
        assert_eq!(format_input(0.0), "0");
        assert_eq!(format_input(500.0), "500");
        assert_eq!(format_input(36000.0), "36,000");
        assert_eq!(format_input(9_999_999.0), "9,999,999");
    }

    #[test]
    fn test_format_share_rounds_to_two_decimals() {
        assert_eq!(format_share(3157.8947368421054), "3,157.89");
        assert_eq!(format_share(1842.1052631578948), "1,842.11");
        assert_eq!(format_share(50.5), "50.50");
        assert_eq!(format_share(0.0), "0.00");
        assert_eq!(format_share(1_000_000.0), "1,000,000.00");
    }
}
