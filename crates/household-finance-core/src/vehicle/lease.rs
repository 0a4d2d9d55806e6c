//! Novated lease cost.
//!
//! The whole lease outlay (finance repayments plus running costs) is treated
//! as 100% deductible at the employee's marginal rate. That is a stated
//! simplifying assumption of the model, not a statement of tax law.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::annuity_payment;
use crate::assumptions::ModelAssumptions;
use crate::error::FinanceError;
use crate::types::{Money, Rate};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Annual running costs packaged into the lease.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnualRunningCosts {
    /// Fuel or charging.
    pub fuel: Money,
    pub maintenance: Money,
    pub tyres: Money,
    /// Finance and other fees.
    pub finance: Money,
    /// Registration and insurance.
    pub registration_insurance: Money,
}

impl AnnualRunningCosts {
    pub fn total(&self) -> Money {
        self.fuel + self.maintenance + self.tyres + self.finance + self.registration_insurance
    }

    fn validate(&self) -> FinanceResult<()> {
        let items = [
            ("fuel", self.fuel),
            ("maintenance", self.maintenance),
            ("tyres", self.tyres),
            ("finance", self.finance),
            ("registration_insurance", self.registration_insurance),
        ];
        for (field, value) in items {
            if value < Decimal::ZERO {
                return Err(FinanceError::InvalidInput {
                    field: field.into(),
                    reason: "Running cost cannot be negative".into(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseParameters {
    /// Price of the car being leased.
    pub car_value: Money,
    /// Whether `car_value` includes GST.
    #[serde(default)]
    pub gst_included: bool,
    /// Annual finance rate as a fraction (0.06 = 6%).
    pub annual_rate: Rate,
    /// Lease term in months.
    pub term_months: u32,
    /// Marginal income tax rate as a fraction.
    pub tax_rate: Rate,
    #[serde(default)]
    pub running_costs: AnnualRunningCosts,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovatedLeaseCost {
    /// Cost after tax savings.
    pub net_cost: Money,
    pub monthly_payment: Money,
    /// Tax saved over the full term.
    pub tax_savings: Money,
    /// Repayments plus running costs before tax.
    pub total_cost: Money,
    /// Amount financed (GST-exclusive value).
    pub financed_value: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn novated_lease_cost(
    params: &LeaseParameters,
    assumptions: &ModelAssumptions,
) -> FinanceResult<NovatedLeaseCost> {
    validate(params)?;

    let financed_value = if params.gst_included {
        params.car_value / assumptions.gst_divisor
    } else {
        params.car_value
    };

    let term = Decimal::from(params.term_months);
    let monthly_payment = annuity_payment(
        financed_value,
        params.annual_rate / dec!(12),
        params.term_months,
    )?;

    let total_cost = monthly_payment
        .checked_mul(term)
        .zip(params.running_costs.total().checked_mul(term / dec!(12)))
        .and_then(|(payments, running)| payments.checked_add(running))
        .ok_or_else(|| FinanceError::InvalidInput {
            field: "car_value".into(),
            reason: "Total lease cost exceeds the supported decimal range".into(),
        })?;
    let tax_savings = total_cost * params.tax_rate;

    Ok(NovatedLeaseCost {
        net_cost: total_cost - tax_savings,
        monthly_payment,
        tax_savings,
        total_cost,
        financed_value,
    })
}

fn validate(params: &LeaseParameters) -> FinanceResult<()> {
    if params.car_value <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "car_value".into(),
            reason: "Car value must be positive".into(),
        });
    }
    if params.annual_rate < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if params.term_months == 0 {
        return Err(FinanceError::InvalidInput {
            field: "term_months".into(),
            reason: "Lease term must be at least one month".into(),
        });
    }
    if params.tax_rate < Decimal::ZERO || params.tax_rate > Decimal::ONE {
        return Err(FinanceError::InvalidInput {
            field: "tax_rate".into(),
            reason: "Marginal tax rate must be between 0 and 1".into(),
        });
    }
    params.running_costs.validate()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    fn dashboard_lease() -> LeaseParameters {
        LeaseParameters {
            car_value: dec!(50000),
            gst_included: false,
            annual_rate: dec!(0.06),
            term_months: 48,
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
    fn test_dashboard_defaults() {
        let out = novated_lease_cost(&dashboard_lease(), &ModelAssumptions::default()).unwrap();
        assert_close(out.monthly_payment, dec!(1174.25), dec!(0.005), "monthly payment");
        assert_close(out.total_cost, dec!(79964.07), dec!(0.005), "total cost");
        assert_close(out.tax_savings, dec!(25588.50), dec!(0.005), "tax savings");
        assert_close(out.net_cost, dec!(54375.57), dec!(0.005), "net cost");
        assert_close(out.net_cost + out.tax_savings, out.total_cost, dec!(0.0000001), "net + tax");
    }

    #[test]
    fn test_gst_is_stripped_before_financing() {
        let mut inclusive = dashboard_lease();
        inclusive.car_value = dec!(55000);
        inclusive.gst_included = true;
        let a = ModelAssumptions::default();

        let with_gst = novated_lease_cost(&inclusive, &a).unwrap();
        let without = novated_lease_cost(&dashboard_lease(), &a).unwrap();
        assert_eq!(with_gst.financed_value, dec!(50000));
        assert_eq!(with_gst.monthly_payment, without.monthly_payment);
    }

    #[test]
    fn test_zero_rate_lease() {
        let mut params = dashboard_lease();
        params.annual_rate = Decimal::ZERO;
        params.running_costs = AnnualRunningCosts::default();
        let out = novated_lease_cost(&params, &ModelAssumptions::default()).unwrap();
        assert_eq!(out.monthly_payment, dec!(50000) / dec!(48));
        assert_close(out.total_cost, dec!(50000), dec!(0.0000001), "zero-rate total");
    }

    #[test]
    fn test_running_costs_prorated_by_term() {
        let mut params = dashboard_lease();
        params.term_months = 18;
        let out = novated_lease_cost(&params, &ModelAssumptions::default()).unwrap();
        let finance_only = out.monthly_payment * dec!(18);
        // 5,900 a year over 1.5 years
        assert_close(out.total_cost - finance_only, dec!(8850), dec!(0.0000001), "running costs");
    }

    #[test]
    fn test_rate_entered_as_percent_is_an_error() {
        // 6 instead of 0.06: 50% a month compounds past the decimal range
        let params = LeaseParameters {
            car_value: dec!(50000),
            gst_included: false,
            annual_rate: dec!(6),
            term_months: 180,
            tax_rate: dec!(0.32),
            running_costs: AnnualRunningCosts::default(),
        };
        match novated_lease_cost(&params, &ModelAssumptions::default()) {
            Err(FinanceError::InvalidInput { field, .. }) => assert_eq!(field, "rate"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validation() {
        let a = ModelAssumptions::default();

        let mut p = dashboard_lease();
        p.term_months = 0;
        assert!(novated_lease_cost(&p, &a).is_err());

        let mut p = dashboard_lease();
        p.tax_rate = dec!(1.2);
        assert!(novated_lease_cost(&p, &a).is_err());

        let mut p = dashboard_lease();
        p.running_costs.tyres = dec!(-1);
        assert!(novated_lease_cost(&p, &a).is_err());

        let mut p = dashboard_lease();
        p.car_value = Decimal::ZERO;
        assert!(novated_lease_cost(&p, &a).is_err());
    }
}
