//! Expected rate implied by a two-point term structure.
//!
//! With a two-period rate `R` and a one-period rate `r`, the rate expected for
//! the second period is `(1+R)^2 / (1+r) - 1`. This is a simplified forward
//! rate extraction, not a yield-curve bootstrap.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::types::Rate;
use crate::FinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateProjectionInputs {
    /// Current long-term rate as a fraction (0.0604 = 6.04%).
    pub long_term_rate: Rate,
    /// Current short-term rate as a fraction.
    pub short_term_rate: Rate,
}

/// Implied one-period-ahead rate, returned in percent.
pub fn expected_rate(long_term_rate: Rate, short_term_rate: Rate) -> FinanceResult<Rate> {
    let one_plus_short = Decimal::ONE + short_term_rate;
    if one_plus_short.is_zero() {
        return Err(FinanceError::InvalidInput {
            field: "short_term_rate".into(),
            reason: "Short-term rate of -100% has no forward rate".into(),
        });
    }

    let one_plus_long = Decimal::ONE + long_term_rate;
    let forward = one_plus_long * one_plus_long / one_plus_short - Decimal::ONE;
    Ok(forward * dec!(100))
}

/// [`expected_rate`] over a [`RateProjectionInputs`] record.
pub fn project(inputs: &RateProjectionInputs) -> FinanceResult<Rate> {
    expected_rate(inputs.long_term_rate, inputs.short_term_rate)
}
