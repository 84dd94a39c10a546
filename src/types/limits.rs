//! Thresholds applied by the account rules
//!
//! Both thresholds are configurable; the constants below are the defaults.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Maximum cumulative amount an account may ever be paid
pub const PAY_IN_LIMIT: Decimal = dec!(4000);

/// Threshold below which a withdrawal warns about low funds
///
/// The same margin is used for the pay-in side: a pay-in leaving less than
/// this much headroom under the pay-in limit warns the user.
pub const LOW_FUNDS_LIMIT: Decimal = dec!(500);

/// Limits evaluated by the withdrawal and pay-in checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountLimits {
    /// Ceiling on the cumulative paid-in total
    pub pay_in_limit: Decimal,
    /// Low-balance and low-headroom warning margin
    pub low_funds_limit: Decimal,
}

impl Default for AccountLimits {
    fn default() -> Self {
        Self {
            pay_in_limit: PAY_IN_LIMIT,
            low_funds_limit: LOW_FUNDS_LIMIT,
        }
    }
}

impl AccountLimits {
    /// Create limits with custom values
    ///
    /// Non-positive values are replaced by their default and a warning is logged.
    pub fn new(pay_in_limit: Decimal, low_funds_limit: Decimal) -> Self {
        let default = Self::default();

        let pay_in_limit = if pay_in_limit <= Decimal::ZERO {
            tracing::warn!(
                "Invalid pay_in_limit ({}), using default ({})",
                pay_in_limit,
                default.pay_in_limit
            );
            default.pay_in_limit
        } else {
            pay_in_limit
        };

        let low_funds_limit = if low_funds_limit <= Decimal::ZERO {
            tracing::warn!(
                "Invalid low_funds_limit ({}), using default ({})",
                low_funds_limit,
                default.low_funds_limit
            );
            default.low_funds_limit
        } else {
            low_funds_limit
        };

        Self {
            pay_in_limit,
            low_funds_limit,
        }
    }
}
