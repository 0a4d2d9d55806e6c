//! Model constants shared by the lease, ownership and sale calculators.
//!
//! The defaults describe a simplified Australian regime: 15%
//! reducing-balance depreciation, a 50% CGT discount for assets held longer
//! than a year, a flat 30% tax on the taxable gain and 10% GST. Callers
//! testing a different regime override individual fields; missing fields in
//! a JSON document fall back to the defaults.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::types::{Rate, Years};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Annual reducing-balance depreciation applied to a privately owned car.
pub const DEFAULT_DEPRECIATION_RATE: Rate = dec!(0.15);

/// Fraction of the capital gain excluded from tax once the discount applies.
pub const DEFAULT_CGT_DISCOUNT: Rate = dec!(0.5);

/// The discount applies when years owned is strictly greater than this.
pub const DEFAULT_CGT_DISCOUNT_MIN_YEARS: Years = dec!(1);

/// Flat rate applied to the taxable gain.
pub const DEFAULT_CGT_RATE: Rate = dec!(0.30);

/// Divisor that strips GST from a GST-inclusive price.
pub const DEFAULT_GST_DIVISOR: Decimal = dec!(1.1);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelAssumptions {
    /// Annual depreciation of an owned car (0.15 = 15%).
    pub depreciation_rate: Rate,
    /// CGT discount applied to long-held assets (0.5 = 50%).
    pub cgt_discount: Rate,
    /// Holding period the asset must exceed before the discount applies.
    pub cgt_discount_min_years: Years,
    /// Flat tax rate on the taxable gain.
    pub cgt_rate: Rate,
    /// GST divisor for GST-inclusive car prices.
    pub gst_divisor: Decimal,
}

impl Default for ModelAssumptions {
    fn default() -> Self {
        Self {
            depreciation_rate: DEFAULT_DEPRECIATION_RATE,
            cgt_discount: DEFAULT_CGT_DISCOUNT,
            cgt_discount_min_years: DEFAULT_CGT_DISCOUNT_MIN_YEARS,
            cgt_rate: DEFAULT_CGT_RATE,
            gst_divisor: DEFAULT_GST_DIVISOR,
        }
    }
}

impl ModelAssumptions {
    pub fn validate(&self) -> FinanceResult<()> {
        check_fraction("depreciation_rate", self.depreciation_rate)?;
        check_fraction("cgt_discount", self.cgt_discount)?;
        check_fraction("cgt_rate", self.cgt_rate)?;
        if self.cgt_discount_min_years < Decimal::ZERO {
            return Err(FinanceError::InvalidInput {
                field: "cgt_discount_min_years".into(),
                reason: "Holding threshold cannot be negative".into(),
            });
        }
        if self.gst_divisor <= Decimal::ZERO {
            return Err(FinanceError::InvalidInput {
                field: "gst_divisor".into(),
                reason: "GST divisor must be positive".into(),
            });
        }
        Ok(())
    }
}

/// What a computation envelope records as its assumptions: the caller's
/// input next to the model constants it ran under.
#[derive(Debug, Serialize)]
pub struct AssumptionsRecord<'a, T: Serialize> {
    pub input: &'a T,
    pub model: &'a ModelAssumptions,
}

fn check_fraction(field: &str, value: Rate) -> FinanceResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(FinanceError::InvalidInput {
            field: field.into(),
            reason: "Must be between 0 and 1".into(),
        });
    }
    Ok(())
}
