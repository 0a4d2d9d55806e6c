//! Cost of keeping the current car.
//!
//! Costs and depreciation accrue per whole year. A fractional holding period
//! is truncated, so 3.9 years costs the same as 3: comparing a 48-month lease
//! (exactly 4 years) with a 46-month one jumps by a full year of costs.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assumptions::ModelAssumptions;
use crate::error::FinanceError;
use crate::types::{Money, Years};
use crate::FinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipParameters {
    /// Value of the car today.
    pub car_value: Money,
    /// Holding period; truncated to whole years.
    pub years: Years,
    pub annual_maintenance: Money,
    pub annual_insurance: Money,
    pub annual_fuel: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipCost {
    /// Maintenance, insurance and fuel over the whole years held.
    pub total_running_cost: Money,
    /// Car value after depreciation.
    pub residual_value: Money,
    /// Value lost to depreciation.
    pub depreciation: Money,
    /// Number of years actually modelled.
    pub whole_years: u32,
}

pub fn ownership_cost(
    params: &OwnershipParameters,
    assumptions: &ModelAssumptions,
) -> FinanceResult<OwnershipCost> {
    validate(params)?;

    let whole_years = params
        .years
        .trunc()
        .to_u32()
        .ok_or_else(|| FinanceError::InvalidInput {
            field: "years".into(),
            reason: "Holding period is out of range".into(),
        })?;

    let annual = params.annual_maintenance + params.annual_insurance + params.annual_fuel;
    let retained = Decimal::ONE - assumptions.depreciation_rate;

    let mut total_running_cost = Decimal::ZERO;
    let mut value = params.car_value;
    for _ in 0..whole_years {
        total_running_cost += annual;
        value *= retained;
    }

    Ok(OwnershipCost {
        total_running_cost,
        residual_value: value,
        depreciation: params.car_value - value,
        whole_years,
    })
}

fn validate(params: &OwnershipParameters) -> FinanceResult<()> {
    if params.car_value < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "car_value".into(),
            reason: "Car value cannot be negative".into(),
        });
    }
    if params.years < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "years".into(),
            reason: "Holding period cannot be negative".into(),
        });
    }
    for (field, value) in [
        ("annual_maintenance", params.annual_maintenance),
        ("annual_insurance", params.annual_insurance),
        ("annual_fuel", params.annual_fuel),
    ] {
        if value < Decimal::ZERO {
            return Err(FinanceError::InvalidInput {
                field: field.into(),
                reason: "Running cost cannot be negative".into(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn current_car(years: Years) -> OwnershipParameters {
        OwnershipParameters {
            car_value: dec!(20000),
            years,
            annual_maintenance: dec!(1000),
            annual_insurance: dec!(1200),
            annual_fuel: dec!(2000),
        }
    }

    #[test]
    fn test_four_years() {
        let out = ownership_cost(&current_car(dec!(4)), &ModelAssumptions::default()).unwrap();
        assert_eq!(out.total_running_cost, dec!(16800));
        // 20000 * 0.85^4
        assert_eq!(out.residual_value, dec!(10440.125));
        assert_eq!(out.depreciation, dec!(9559.875));
        assert_eq!(out.whole_years, 4);
    }

    #[test]
    fn test_fractional_years_truncate() {
        let a = ModelAssumptions::default();
        let three = ownership_cost(&current_car(dec!(3)), &a).unwrap();
        let almost_four = ownership_cost(&current_car(dec!(3.9167)), &a).unwrap();
        assert_eq!(three, almost_four);
    }

    #[test]
    fn test_zero_years_costs_nothing() {
        let out = ownership_cost(&current_car(dec!(0.5)), &ModelAssumptions::default()).unwrap();
        assert_eq!(out.total_running_cost, Decimal::ZERO);
        assert_eq!(out.residual_value, dec!(20000));
    }

    #[test]
    fn test_custom_depreciation() {
        let a = ModelAssumptions {
            depreciation_rate: dec!(0.20),
            ..Default::default()
        };
        let out = ownership_cost(&current_car(dec!(2)), &a).unwrap();
        assert_eq!(out.residual_value, dec!(12800));
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let a = ModelAssumptions::default();
        assert!(ownership_cost(&current_car(dec!(-1)), &a).is_err());

        let mut p = current_car(dec!(2));
        p.annual_fuel = dec!(-5);
        assert!(ownership_cost(&p, &a).is_err());
    }
}
