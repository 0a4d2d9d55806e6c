//! Year-by-year series for the dashboards' charts.
//!
//! Both generators are finite and recomputed in full on every call; nothing
//! is streamed or cached between calls.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::RepaymentSchedule;
use crate::error::FinanceError;
use crate::types::{Money, Rate, Years};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Inputs for the owned-car vs. leased-car value comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetValueInput {
    /// Value of the currently owned car at year 0.
    pub initial_value: Money,
    /// Annual depreciation of the owned car.
    pub depreciation_rate: Rate,
    /// Running costs of ownership over the whole horizon.
    pub total_ownership_cost: Money,
    /// Horizon in years; may be fractional (lease term / 12).
    pub years: Years,
    /// Price of the leased car at year 0.
    pub lease_car_value: Money,
    /// Monthly lease payment.
    pub monthly_payment: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetValuePoint {
    pub year: u32,
    pub ownership_value: Money,
    pub lease_value: Money,
}

/// Principal and interest paid in one loan year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyBreakdown {
    /// Loan year (1-indexed).
    pub year: u32,
    pub principal: Money,
    pub interest: Money,
    pub cumulative_principal: Money,
    pub cumulative_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Asset value of each option at every whole year `y` with `y < years + 1`.
///
/// Owned car: `initial * (1-d)^y - (total_ownership_cost / years) * y`.
/// Leased car: `car_value - y * 12 * monthly_payment`, an annual
/// approximation without monthly compounding.
pub fn asset_value_over_time(input: &AssetValueInput) -> FinanceResult<Vec<AssetValuePoint>> {
    if input.years <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "years".into(),
            reason: "Horizon must be positive".into(),
        });
    }

    let retained = Decimal::ONE - input.depreciation_rate;
    let annual_cost = input.total_ownership_cost / input.years;
    let annual_lease = dec!(12) * input.monthly_payment;
    let limit = input.years + Decimal::ONE;

    let mut points = Vec::new();
    let mut year: u32 = 0;
    while Decimal::from(year) < limit {
        let y = Decimal::from(year);
        points.push(AssetValuePoint {
            year,
            ownership_value: input.initial_value * retained.powu(year as u64) - annual_cost * y,
            lease_value: input.lease_car_value - y * annual_lease,
        });
        year += 1;
    }

    Ok(points)
}

/// Aggregate a monthly schedule into loan years with running totals.
///
/// A trailing partial year (fewer than 12 months) is summed as its own row.
pub fn yearly_breakdown(schedule: &RepaymentSchedule) -> Vec<YearlyBreakdown> {
    let mut cumulative_principal = Decimal::ZERO;
    let mut cumulative_interest = Decimal::ZERO;

    schedule
        .periods
        .chunks(12)
        .enumerate()
        .map(|(idx, months)| {
            let principal: Money = months.iter().map(|m| m.principal).sum();
            let interest: Money = months.iter().map(|m| m.interest).sum();
            cumulative_principal += principal;
            cumulative_interest += interest;
            YearlyBreakdown {
                year: idx as u32 + 1,
                principal,
                interest,
                cumulative_principal,
                cumulative_interest,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::breakdown_payments;

    fn four_year_input() -> AssetValueInput {
        AssetValueInput {
            initial_value: dec!(20000),
            depreciation_rate: dec!(0.15),
            total_ownership_cost: dec!(16800),
            years: dec!(4),
            lease_car_value: dec!(50000),
            monthly_payment: dec!(1000),
        }
    }

    #[test]
    fn test_asset_values_integer_horizon() {
        let points = asset_value_over_time(&four_year_input()).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].ownership_value, dec!(20000));
        assert_eq!(points[0].lease_value, dec!(50000));
        // 20000 * 0.85 - 4200
        assert_eq!(points[1].ownership_value, dec!(12800));
        assert_eq!(points[1].lease_value, dec!(38000));
        assert_eq!(points[4].lease_value, dec!(2000));
    }

    #[test]
    fn test_asset_values_fractional_horizon() {
        let mut input = four_year_input();
        input.years = dec!(3.5);
        let points = asset_value_over_time(&input).unwrap();
        // years 0..=4 satisfy y < 4.5
        assert_eq!(points.len(), 5);
        assert_eq!(points.last().unwrap().year, 4);
    }

    #[test]
    fn test_asset_values_zero_horizon_rejected() {
        let mut input = four_year_input();
        input.years = Decimal::ZERO;
        assert!(asset_value_over_time(&input).is_err());
    }

    #[test]
    fn test_yearly_breakdown_windows_and_running_totals() {
        let schedule = breakdown_payments(dec!(300000), dec!(5), 25).unwrap();
        let years = yearly_breakdown(&schedule);
        assert_eq!(years.len(), 25);

        let first_year_interest: Money = schedule.periods[..12].iter().map(|p| p.interest).sum();
        assert_eq!(years[0].interest, first_year_interest);

        let mut running = Decimal::ZERO;
        for y in &years {
            running += y.principal;
            assert_eq!(y.cumulative_principal, running);
        }
        assert!((years[24].cumulative_principal - dec!(300000)).abs() < dec!(0.01));
        assert!((years[24].cumulative_interest - schedule.total_interest()).abs() < dec!(0.000001));
    }

    #[test]
    fn test_yearly_principal_grows() {
        let schedule = breakdown_payments(dec!(621867), dec!(6.52), 15).unwrap();
        let years = yearly_breakdown(&schedule);
        for pair in years.windows(2) {
            assert!(pair[1].principal > pair[0].principal);
            assert!(pair[1].interest < pair[0].interest);
        }
    }
}
