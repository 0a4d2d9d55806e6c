//! Side-by-side comparison: keep the current car or take a novated lease on
//! a new one.
//!
//! The ownership leg runs for the lease term converted to years and reuses
//! the lease's maintenance, registration & insurance, and fuel figures as the
//! current car's running costs. The option with the lower net cost wins; on a
//! tie, keeping the current car is preferred.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::assumptions::{AssumptionsRecord, ModelAssumptions};
use crate::error::FinanceError;
use crate::projection::{asset_value_over_time, AssetValueInput, AssetValuePoint};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::vehicle::lease::{novated_lease_cost, AnnualRunningCosts, LeaseParameters, NovatedLeaseCost};
use crate::vehicle::ownership::{ownership_cost, OwnershipParameters};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleComparisonInput {
    pub current_car_value: Money,
    pub new_car_value: Money,
    #[serde(default)]
    pub gst_included: bool,
    /// Annual lease rate as a fraction.
    pub annual_rate: Rate,
    pub lease_term_months: u32,
    /// Marginal income tax rate as a fraction.
    pub tax_rate: Rate,
    #[serde(default)]
    pub running_costs: AnnualRunningCosts,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleOption {
    CurrentCarOwnership,
    NovatedLease,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipSummary {
    pub total_cost: Money,
    pub final_car_value: Money,
    /// Running costs less the value the car lost.
    pub net_cost: Money,
    pub tax_savings: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleComparisonOutput {
    /// Lease term in years (may be fractional).
    pub years: Years,
    pub ownership: OwnershipSummary,
    pub lease: NovatedLeaseCost,
    /// Lease tax savings minus ownership tax savings.
    pub tax_savings_difference: Money,
    pub asset_values: Vec<AssetValuePoint>,
    pub best_option: VehicleOption,
    /// Net cost of the best option.
    pub best_net_cost: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn compare_vehicle_options(
    input: &VehicleComparisonInput,
    assumptions: &ModelAssumptions,
) -> FinanceResult<ComputationOutput<VehicleComparisonOutput>> {
    let start = Instant::now();
    assumptions.validate()?;
    let mut warnings: Vec<String> = Vec::new();

    if input.current_car_value < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "current_car_value".into(),
            reason: "Car value cannot be negative".into(),
        });
    }

    let lease = novated_lease_cost(
        &LeaseParameters {
            car_value: input.new_car_value,
            gst_included: input.gst_included,
            annual_rate: input.annual_rate,
            term_months: input.lease_term_months,
            tax_rate: input.tax_rate,
            running_costs: input.running_costs.clone(),
        },
        assumptions,
    )?;

    let years = Decimal::from(input.lease_term_months) / dec!(12);
    if input.lease_term_months % 12 != 0 {
        warnings.push(format!(
            "Lease term of {} months is not a whole number of years; ownership costs cover {} full years only",
            input.lease_term_months,
            years.trunc()
        ));
    }

    let owned = ownership_cost(
        &OwnershipParameters {
            car_value: input.current_car_value,
            years,
            annual_maintenance: input.running_costs.maintenance,
            annual_insurance: input.running_costs.registration_insurance,
            annual_fuel: input.running_costs.fuel,
        },
        assumptions,
    )?;

    let ownership = OwnershipSummary {
        total_cost: owned.total_running_cost,
        final_car_value: owned.residual_value,
        net_cost: owned.total_running_cost - owned.depreciation,
        tax_savings: Decimal::ZERO,
    };

    let asset_values = asset_value_over_time(&AssetValueInput {
        initial_value: input.current_car_value,
        depreciation_rate: assumptions.depreciation_rate,
        total_ownership_cost: owned.total_running_cost,
        years,
        lease_car_value: input.new_car_value,
        monthly_payment: lease.monthly_payment,
    })?;

    let (best_option, best_net_cost) = if ownership.net_cost <= lease.net_cost {
        (VehicleOption::CurrentCarOwnership, ownership.net_cost)
    } else {
        (VehicleOption::NovatedLease, lease.net_cost)
    };

    let output = VehicleComparisonOutput {
        years,
        tax_savings_difference: lease.tax_savings - ownership.tax_savings,
        ownership,
        lease,
        asset_values,
        best_option,
        best_net_cost,
    };

    let record = AssumptionsRecord { input, model: assumptions };
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Novated lease vs. current car ownership (100% lease deductibility)",
        &record,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard_input() -> VehicleComparisonInput {
        VehicleComparisonInput {
            current_car_value: dec!(20000),
            new_car_value: dec!(50000),
            gst_included: false,
            annual_rate: dec!(0.06),
            lease_term_months: 48,
            tax_rate: dec!(0.32),
            running_costs: AnnualRunningCosts {
                fuel: dec!(2000),
                maintenance: dec!(1000),
                tyres: dec!(500),
                finance: dec!(1200),
                registration_insurance: dec!(1200),
            },
        }
    }

    #[test]
    fn test_dashboard_defaults_favour_current_car() {
        let out = compare_vehicle_options(&dashboard_input(), &ModelAssumptions::default()).unwrap();
        let r = &out.result;
        assert_eq!(r.years, dec!(4));
        assert_eq!(r.ownership.total_cost, dec!(16800));
        assert_eq!(r.ownership.final_car_value, dec!(10440.125));
        assert_eq!(r.ownership.net_cost, dec!(7240.125));
        assert_eq!(r.best_option, VehicleOption::CurrentCarOwnership);
        assert_eq!(r.best_net_cost, dec!(7240.125));
        assert_eq!(r.tax_savings_difference, r.lease.tax_savings);
        assert_eq!(r.asset_values.len(), 5);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_expensive_current_car_favours_lease() {
        let mut input = dashboard_input();
        input.current_car_value = dec!(20000);
        input.running_costs.maintenance = dec!(20000);
        input.new_car_value = dec!(10000);
        let out = compare_vehicle_options(&input, &ModelAssumptions::default()).unwrap();
        assert_eq!(out.result.best_option, VehicleOption::NovatedLease);
        assert_eq!(out.result.best_net_cost, out.result.lease.net_cost);
    }

    #[test]
    fn test_partial_year_term_warns() {
        let mut input = dashboard_input();
        input.lease_term_months = 42;
        let out = compare_vehicle_options(&input, &ModelAssumptions::default()).unwrap();
        assert_eq!(out.result.years, dec!(3.5));
        assert_eq!(out.result.ownership.total_cost, dec!(12600));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_envelope_records_model_assumptions() {
        let out = compare_vehicle_options(&dashboard_input(), &ModelAssumptions::default()).unwrap();
        assert!(out.methodology.contains("Novated lease"));
        assert!(out.assumptions.get("model").is_some());
        assert!(out.assumptions.get("input").is_some());
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_invalid_assumptions_rejected() {
        let bad = ModelAssumptions {
            cgt_rate: dec!(2),
            ..Default::default()
        };
        assert!(compare_vehicle_options(&dashboard_input(), &bad).is_err());
    }
}
