use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use household_finance_core::vehicle::comparison::{compare_vehicle_options, VehicleComparisonInput};
use household_finance_core::vehicle::lease::AnnualRunningCosts;
use household_finance_core::ModelAssumptions;

use crate::input;

/// Arguments for the ownership vs. novated lease comparison
#[derive(Args)]
pub struct LeaseArgs {
    /// Value of the car currently owned
    #[arg(long)]
    pub current_car_value: Option<Decimal>,

    /// Price of the car to lease
    #[arg(long)]
    pub new_car_value: Option<Decimal>,

    /// The new car price includes GST
    #[arg(long)]
    pub gst_included: bool,

    /// Annual lease interest rate (e.g. 0.06 for 6%)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Lease term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Marginal income tax rate (e.g. 0.32)
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Annual fuel cost
    #[arg(long)]
    pub fuel: Option<Decimal>,

    /// Annual maintenance cost
    #[arg(long)]
    pub maintenance: Option<Decimal>,

    /// Annual tyre cost
    #[arg(long)]
    pub tyres: Option<Decimal>,

    /// Annual finance and other costs
    #[arg(long)]
    pub finance: Option<Decimal>,

    /// Annual registration and insurance
    #[arg(long, alias = "rego")]
    pub registration_insurance: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_lease(
    args: LeaseArgs,
    assumptions: &ModelAssumptions,
) -> Result<Value, Box<dyn std::error::Error>> {
    let lease_input: VehicleComparisonInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        VehicleComparisonInput {
            current_car_value: args
                .current_car_value
                .ok_or("--current-car-value is required (or provide --input)")?,
            new_car_value: args
                .new_car_value
                .ok_or("--new-car-value is required (or provide --input)")?,
            gst_included: args.gst_included,
            annual_rate: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            lease_term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            tax_rate: args
                .tax_rate
                .ok_or("--tax-rate is required (or provide --input)")?,
            running_costs: AnnualRunningCosts {
                fuel: args.fuel.unwrap_or(Decimal::ZERO),
                maintenance: args.maintenance.unwrap_or(Decimal::ZERO),
                tyres: args.tyres.unwrap_or(Decimal::ZERO),
                finance: args.finance.unwrap_or(Decimal::ZERO),
                registration_insurance: args.registration_insurance.unwrap_or(Decimal::ZERO),
            },
        }
    };

    tracing::debug!(
        new_car_value = %lease_input.new_car_value,
        term_months = lease_input.lease_term_months,
        "comparing vehicle options"
    );
    let result = compare_vehicle_options(&lease_input, assumptions)?;
    for warning in &result.warnings {
        tracing::info!(%warning, "comparison warning");
    }
    Ok(serde_json::to_value(result)?)
}
