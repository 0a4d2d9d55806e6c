use household_finance_core::vehicle::comparison::{
    compare_vehicle_options, VehicleComparisonInput, VehicleOption,
};
use household_finance_core::vehicle::lease::{novated_lease_cost, AnnualRunningCosts, LeaseParameters};
use household_finance_core::vehicle::ownership::{ownership_cost, OwnershipParameters};
use household_finance_core::{FinanceError, ModelAssumptions};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn dashboard_costs() -> AnnualRunningCosts {
    AnnualRunningCosts {
        fuel: dec!(2000),
        maintenance: dec!(1000),
        tyres: dec!(500),
        finance: dec!(1200),
        registration_insurance: dec!(1200),
    }
}

// ===========================================================================
// Novated lease
// ===========================================================================

#[test]
fn test_novated_lease_reference_scenario() {
    let params = LeaseParameters {
        car_value: dec!(50000),
        gst_included: false,
        annual_rate: dec!(0.06),
        term_months: 48,
        tax_rate: dec!(0.32),
        running_costs: dashboard_costs(),
    };
    let out = novated_lease_cost(&params, &ModelAssumptions::default()).unwrap();
    assert_eq!(out.monthly_payment.round_dp(2), dec!(1174.25));
    assert_eq!(out.net_cost.round_dp(2), dec!(54375.57));
    assert_eq!(out.tax_savings.round_dp(2), dec!(25588.50));
}

#[test]
fn test_higher_tax_rate_lowers_net_cost() {
    let a = ModelAssumptions::default();
    let mut params = LeaseParameters {
        car_value: dec!(45000),
        gst_included: true,
        annual_rate: dec!(0.07),
        term_months: 36,
        tax_rate: dec!(0.19),
        running_costs: dashboard_costs(),
    };
    let low = novated_lease_cost(&params, &a).unwrap();
    params.tax_rate = dec!(0.45);
    let high = novated_lease_cost(&params, &a).unwrap();
    assert_eq!(low.total_cost, high.total_cost);
    assert!(high.net_cost < low.net_cost);
}

#[test]
fn test_custom_gst_divisor() {
    let a = ModelAssumptions {
        gst_divisor: dec!(1.15),
        ..Default::default()
    };
    let params = LeaseParameters {
        car_value: dec!(57500),
        gst_included: true,
        annual_rate: dec!(0.06),
        term_months: 48,
        tax_rate: dec!(0.32),
        running_costs: AnnualRunningCosts::default(),
    };
    let out = novated_lease_cost(&params, &a).unwrap();
    assert_eq!(out.financed_value, dec!(50000));
}

// ===========================================================================
// Ownership
// ===========================================================================

#[test]
fn test_ownership_truncation_discontinuity() {
    let a = ModelAssumptions::default();
    let params = |years| OwnershipParameters {
        car_value: dec!(20000),
        years,
        annual_maintenance: dec!(1000),
        annual_insurance: dec!(1200),
        annual_fuel: dec!(2000),
    };
    // 46 months and 36 months cost the same; 48 months costs a year more
    let m36 = ownership_cost(&params(dec!(3)), &a).unwrap();
    let m46 = ownership_cost(&params(dec!(46) / dec!(12)), &a).unwrap();
    let m48 = ownership_cost(&params(dec!(4)), &a).unwrap();
    assert_eq!(m36.total_running_cost, m46.total_running_cost);
    assert_eq!(m48.total_running_cost - m46.total_running_cost, dec!(4200));
}

// ===========================================================================
// Comparison
// ===========================================================================

#[test]
fn test_comparison_from_json_with_defaults() {
    let input: VehicleComparisonInput = serde_json::from_str(
        r#"{
            "current_car_value": "20000",
            "new_car_value": "50000",
            "annual_rate": "0.06",
            "lease_term_months": 48,
            "tax_rate": "0.32",
            "running_costs": {
                "fuel": "2000",
                "maintenance": "1000",
                "tyres": "500",
                "finance": "1200",
                "registration_insurance": "1200"
            }
        }"#,
    )
    .unwrap();
    assert!(!input.gst_included);

    let out = compare_vehicle_options(&input, &ModelAssumptions::default()).unwrap();
    assert_eq!(out.result.best_option, VehicleOption::CurrentCarOwnership);
    assert_eq!(out.result.ownership.tax_savings, Decimal::ZERO);
    assert_eq!(out.result.lease.monthly_payment.round_dp(2), dec!(1174.25));

    let first = &out.result.asset_values[0];
    assert_eq!(first.ownership_value, dec!(20000));
    assert_eq!(first.lease_value, dec!(50000));
}

#[test]
fn test_comparison_is_repeatable() {
    let input = VehicleComparisonInput {
        current_car_value: dec!(15000),
        new_car_value: dec!(62000),
        gst_included: true,
        annual_rate: dec!(0.075),
        lease_term_months: 60,
        tax_rate: dec!(0.37),
        running_costs: dashboard_costs(),
    };
    let a = compare_vehicle_options(&input, &ModelAssumptions::default()).unwrap();
    let b = compare_vehicle_options(&input, &ModelAssumptions::default()).unwrap();
    assert_eq!(a.result.lease, b.result.lease);
    assert_eq!(a.result.asset_values, b.result.asset_values);
    assert_eq!(a.result.best_option, b.result.best_option);
}

#[test]
fn test_comparison_rejects_rate_entered_as_percent() {
    let input = VehicleComparisonInput {
        current_car_value: dec!(20000),
        new_car_value: dec!(50000),
        gst_included: false,
        annual_rate: dec!(6),
        lease_term_months: 180,
        tax_rate: dec!(0.32),
        running_costs: dashboard_costs(),
    };
    let result = compare_vehicle_options(&input, &ModelAssumptions::default());
    assert!(matches!(result, Err(FinanceError::InvalidInput { .. })));
}
