// ⚖️ Allocation Engine - proportional split of a shared expense

/// Each party's computed share of the expense.
///
/// Derived on every edit, never entered directly. Whenever income exists the
/// shares sum back to the expense (up to floating-point rounding); when the
/// combined income is zero both shares are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationResult {
    pub share_a: f64,
    pub share_b: f64,
}

impl AllocationResult {
    pub const ZERO: AllocationResult = AllocationResult {
        share_a: 0.0,
        share_b: 0.0,
    };
}

/// Split an expense across two salaries in proportion to income:
/// `share_a = salary_a / (salary_a + salary_b) * expense`, likewise for B.
///
/// A combined income of zero would make the ratio 0/0, so that case returns
/// zero shares instead of dividing. No rounding happens here; display
/// rounding belongs to the formatter.
pub fn allocate(salary_a: f64, salary_b: f64, expense: f64) -> AllocationResult {
    let total = salary_a + salary_b;
    if total == 0.0 {
        return AllocationResult::ZERO;
    }
    AllocationResult {
        share_a: salary_a / total * expense,
        share_b: salary_b / total * expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_reference_scenario() {
        let result = allocate(36000.0, 21000.0, 5000.0);
        assert!((result.share_a - 3157.894736842105).abs() < 1e-6);
        assert!((result.share_b - 1842.1052631578948).abs() < 1e-6);
    }

    #[test]
    fn test_shares_sum_to_expense() {
        let cases = [
            (36000.0, 21000.0, 5000.0),
            (1.0, 2.0, 100.0),
            (123.0, 456.0, 789.0),
            (9_999_999.0, 1.0, 100.0),
        ];
        for (a, b, e) in cases {
            let result = allocate(a, b, e);
            assert!(
                (result.share_a + result.share_b - e).abs() < EPS,
                "shares drifted from the expense for {}/{}/{}",
                a,
                b,
                e
            );
        }
    }

    #[test]
    fn test_shares_follow_income_ratio() {
        let result = allocate(36000.0, 21000.0, 5000.0);
        assert!((result.share_a / result.share_b - 36000.0 / 21000.0).abs() < EPS);
    }

    #[test]
    fn test_zero_total_income_gives_zero_shares() {
        assert_eq!(allocate(0.0, 0.0, 1000.0), AllocationResult::ZERO);
    }

    #[test]
    fn test_zero_expense_gives_zero_shares() {
        let result = allocate(36000.0, 21000.0, 0.0);
        assert_eq!(result.share_a, 0.0);
        assert_eq!(result.share_b, 0.0);
    }

    #[test]
    fn test_single_earner_pays_everything() {
        let result = allocate(50000.0, 0.0, 250.0);
        assert_eq!(result.share_a, 250.0);
        assert_eq!(result.share_b, 0.0);
    }

    #[test]
    fn test_equal_salaries_split_evenly() {
        let result = allocate(30000.0, 30000.0, 101.0);
        assert!((result.share_a - 50.5).abs() < EPS);
        assert!((result.share_b - 50.5).abs() < EPS);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(allocate(7.0, 3.0, 10.0), allocate(7.0, 3.0, 10.0));
    }
}
