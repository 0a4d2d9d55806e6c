use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use household_finance_core::amortization::{self, LoanParameters};
use household_finance_core::ModelAssumptions;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Model assumptions from an optional JSON string; defaults when absent.
fn model(assumptions_json: Option<String>) -> NapiResult<ModelAssumptions> {
    let model: ModelAssumptions = match assumptions_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => ModelAssumptions::default(),
    };
    model.validate().map_err(to_napi_error)?;
    Ok(model)
}

// ---------------------------------------------------------------------------
// Vehicle
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_vehicle_options(
    input_json: String,
    assumptions_json: Option<String>,
) -> NapiResult<String> {
    let input: household_finance_core::vehicle::comparison::VehicleComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = household_finance_core::vehicle::comparison::compare_vehicle_options(
        &input,
        &model(assumptions_json)?,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn novated_lease_cost(
    input_json: String,
    assumptions_json: Option<String>,
) -> NapiResult<String> {
    let input: household_finance_core::vehicle::lease::LeaseParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        household_finance_core::vehicle::lease::novated_lease_cost(&input, &model(assumptions_json)?)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn ownership_cost(input_json: String, assumptions_json: Option<String>) -> NapiResult<String> {
    let input: household_finance_core::vehicle::ownership::OwnershipParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = household_finance_core::vehicle::ownership::ownership_cost(
        &input,
        &model(assumptions_json)?,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn asset_value_over_time(input_json: String) -> NapiResult<String> {
    let input: household_finance_core::projection::AssetValueInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        household_finance_core::projection::asset_value_over_time(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Mortgage
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_mortgage(input_json: String, assumptions_json: Option<String>) -> NapiResult<String> {
    let input: household_finance_core::mortgage::summary::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = household_finance_core::mortgage::summary::analyze_mortgage(
        &input,
        &model(assumptions_json)?,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Serialize)]
struct RepaymentOutput {
    monthly_repayment: Decimal,
}

#[napi]
pub fn repayment(input_json: String) -> NapiResult<String> {
    let loan: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let monthly_repayment =
        amortization::repayment(loan.principal, loan.annual_rate_percent, loan.term_years)
            .map_err(to_napi_error)?;
    serde_json::to_string(&RepaymentOutput { monthly_repayment }).map_err(to_napi_error)
}

/// Monthly schedule plus the yearly aggregation charted next to it.
#[derive(Serialize)]
struct BreakdownOutput {
    schedule: amortization::RepaymentSchedule,
    yearly: Vec<household_finance_core::projection::YearlyBreakdown>,
}

#[napi]
pub fn breakdown_payments(input_json: String) -> NapiResult<String> {
    let loan: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule =
        amortization::breakdown_payments(loan.principal, loan.annual_rate_percent, loan.term_years)
            .map_err(to_napi_error)?;
    let yearly = household_finance_core::projection::yearly_breakdown(&schedule);
    serde_json::to_string(&BreakdownOutput { schedule, yearly }).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct NewLoanTermInput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    monthly_repayment: Decimal,
    #[serde(default)]
    extra_payment: Decimal,
}

#[derive(Serialize)]
struct NewLoanTermOutput {
    new_term_months: Decimal,
}

#[napi]
pub fn new_loan_term(input_json: String) -> NapiResult<String> {
    let input: NewLoanTermInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let new_term_months = amortization::new_loan_term_months(
        input.principal,
        input.annual_rate_percent,
        input.monthly_repayment,
        input.extra_payment,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&NewLoanTermOutput { new_term_months }).map_err(to_napi_error)
}

#[napi]
pub fn capital_gains_tax(input_json: String, assumptions_json: Option<String>) -> NapiResult<String> {
    let input: household_finance_core::mortgage::sale::SaleProjection =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        household_finance_core::mortgage::sale::project_sale(&input, &model(assumptions_json)?);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct SavingsInput {
    budget: household_finance_core::mortgage::sale::HouseholdBudget,
    monthly_repayment: Decimal,
}

#[derive(Serialize)]
struct SavingsOutput {
    net_monthly_savings: Decimal,
}

#[napi]
pub fn net_monthly_savings(input_json: String) -> NapiResult<String> {
    let input: SavingsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let net_monthly_savings =
        household_finance_core::mortgage::sale::net_monthly_savings(&input.budget, input.monthly_repayment)
            .map_err(to_napi_error)?;
    serde_json::to_string(&SavingsOutput { net_monthly_savings }).map_err(to_napi_error)
}

#[derive(Serialize)]
struct ExpectedRateOutput {
    expected_rate_percent: Decimal,
}

#[napi]
pub fn expected_rate(input_json: String) -> NapiResult<String> {
    let input: household_finance_core::rates::RateProjectionInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let expected_rate_percent =
        household_finance_core::rates::project(&input).map_err(to_napi_error)?;
    serde_json::to_string(&ExpectedRateOutput { expected_rate_percent }).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Treaties matching a filter; an empty string or `{}` returns the whole table.
#[napi]
pub fn filter_treaties(filter_json: String) -> NapiResult<String> {
    use household_finance_core::history::treaties;

    let filter: treaties::TreatyFilter = if filter_json.trim().is_empty() {
        treaties::TreatyFilter::default()
    } else {
        serde_json::from_str(&filter_json).map_err(to_napi_error)?
    };
    let table = treaties::treaties().map_err(to_napi_error)?;
    serde_json::to_string(&treaties::filter_treaties(&table, &filter)).map_err(to_napi_error)
}

#[napi]
pub fn treaty_types() -> NapiResult<String> {
    serde_json::to_string(&household_finance_core::history::treaties::treaty_types())
        .map_err(to_napi_error)
}

#[napi]
pub fn territorial_snapshot(year: i32) -> NapiResult<String> {
    let snapshot = household_finance_core::history::territory::territorial_snapshot(year);
    serde_json::to_string(&snapshot).map_err(to_napi_error)
}
