//! Money rounding helpers.
//!
//! All bound comparisons in the mutation engines go through `round_money` so
//! the rounding rule (half-up to one decimal) is applied in exactly one
//! place. Stored amounts keep full precision; only comparisons round.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{EPSILON, MONEY_SCALE};

/// Rounds a money amount half-up (midpoint away from zero) to the comparison
/// scale.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// True when `amount` exceeds `bound` by more than the shared epsilon.
pub fn exceeds(amount: Decimal, bound: Decimal) -> bool {
    round_money(amount) > round_money(bound) + EPSILON
}

/// True when `amount` is zero at the comparison scale.
pub fn is_zero_money(amount: Decimal) -> bool {
    round_money(amount).is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_up_to_one_decimal() {
        assert_eq!(round_money(dec!(1.25)), dec!(1.3));
        assert_eq!(round_money(dec!(1.24)), dec!(1.2));
        assert_eq!(round_money(dec!(-1.25)), dec!(-1.3));
    }

    #[test]
    fn exceeds_tolerates_epsilon() {
        assert!(!exceeds(dec!(6.04), dec!(6.0)));
        assert!(exceeds(dec!(6.2), dec!(6.0)));
    }

    #[test]
    fn zero_at_comparison_scale() {
        assert!(is_zero_money(dec!(0.04)));
        assert!(!is_zero_money(dec!(0.06)));
    }
}
