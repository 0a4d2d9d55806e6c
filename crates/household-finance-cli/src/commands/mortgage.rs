use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::{json, Value};

use household_finance_core::amortization::{
    breakdown_payments, new_loan_term_months, repayment, LoanParameters,
};
use household_finance_core::mortgage::sale::{project_sale, HouseholdBudget, SaleProjection};
use household_finance_core::mortgage::summary::{analyze_mortgage, MortgageInput};
use household_finance_core::projection::yearly_breakdown;
use household_finance_core::rates::{project, RateProjectionInputs};
use household_finance_core::ModelAssumptions;

use crate::input;

/// Arguments for the full mortgage report
#[derive(Args)]
pub struct MortgageArgs {
    /// Purchase price of the house
    #[arg(long)]
    pub house_price: Option<Decimal>,

    /// Deposit paid at settlement
    #[arg(long)]
    pub deposit: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,

    /// Current long-term rate in percent (e.g. 6.04)
    #[arg(long)]
    pub long_rate: Option<Decimal>,

    /// Current short-term rate in percent (e.g. 5.00)
    #[arg(long)]
    pub short_rate: Option<Decimal>,

    /// Projected selling price
    #[arg(long)]
    pub selling_price: Option<Decimal>,

    /// Years held before the sale
    #[arg(long)]
    pub years_owned: Option<Decimal>,

    /// Capital losses and expenditure offsetting the gain
    #[arg(long, default_value = "0")]
    pub capital_losses: Decimal,

    /// Extra amount paid off the loan each month
    #[arg(long, default_value = "0")]
    pub extra_payment: Decimal,

    /// Monthly take-home income
    #[arg(long, default_value = "0")]
    pub monthly_income: Decimal,

    /// Monthly rent received
    #[arg(long, default_value = "0")]
    pub rental_income: Decimal,

    /// Management fee as a fraction of rent
    #[arg(long, default_value = "0")]
    pub management_fee: Decimal,

    /// Monthly rent paid
    #[arg(long, default_value = "0")]
    pub rent_expense: Decimal,

    /// Monthly utilities
    #[arg(long, default_value = "0")]
    pub utilities: Decimal,

    /// Monthly groceries
    #[arg(long, default_value = "0")]
    pub groceries: Decimal,

    /// Other monthly expenses
    #[arg(long, default_value = "0")]
    pub other_expenses: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Principal, rate and term shared by the loan subcommands
#[derive(Args)]
pub struct LoanArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in percent (e.g. 6.52)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the monthly repayment
#[derive(Args)]
pub struct RepaymentArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for the principal/interest breakdown
#[derive(Args)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Show every month instead of yearly totals
    #[arg(long)]
    pub monthly: bool,
}

/// Arguments for the loan term under an extra payment
#[derive(Args)]
pub struct PayoffArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Scheduled monthly repayment (defaults to the repayment for the term)
    #[arg(long)]
    pub monthly_repayment: Option<Decimal>,

    /// Extra amount paid each month
    #[arg(long, default_value = "0")]
    pub extra: Decimal,
}

/// Arguments for capital gains tax on a sale
#[derive(Args)]
pub struct CgtArgs {
    /// Purchase price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Selling price
    #[arg(long)]
    pub selling_price: Option<Decimal>,

    /// Years held before the sale
    #[arg(long)]
    pub years_owned: Option<Decimal>,

    /// Capital losses and expenditure offsetting the gain
    #[arg(long, default_value = "0")]
    pub capital_losses: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the expected rate
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ExpectedRateArgs {
    /// Long-term rate as a fraction (e.g. 0.0604)
    #[arg(long)]
    pub long_term_rate: Option<Decimal>,

    /// Short-term rate as a fraction (e.g. 0.05)
    #[arg(long)]
    pub short_term_rate: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// JSON shape accepted by `payoff`: the loan plus the optional repayment
/// and extra payment.
#[derive(Deserialize)]
struct PayoffInput {
    #[serde(flatten)]
    loan: LoanParameters,
    #[serde(default)]
    monthly_repayment: Option<Decimal>,
    #[serde(default)]
    extra_payment: Decimal,
}

pub fn run_mortgage(
    args: MortgageArgs,
    assumptions: &ModelAssumptions,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        MortgageInput {
            house_price: args
                .house_price
                .ok_or("--house-price is required (or provide --input)")?,
            deposit: args
                .deposit
                .ok_or("--deposit is required (or provide --input)")?,
            loan_term_years: args.term_years,
            long_term_rate_percent: args
                .long_rate
                .ok_or("--long-rate is required (or provide --input)")?,
            short_term_rate_percent: args
                .short_rate
                .ok_or("--short-rate is required (or provide --input)")?,
            selling_price: args
                .selling_price
                .ok_or("--selling-price is required (or provide --input)")?,
            years_owned: args
                .years_owned
                .ok_or("--years-owned is required (or provide --input)")?,
            capital_losses: args.capital_losses,
            budget: HouseholdBudget {
                monthly_income: args.monthly_income,
                rental_income: args.rental_income,
                management_fee: args.management_fee,
                rent_expense: args.rent_expense,
                utilities: args.utilities,
                groceries: args.groceries,
                other_expenses: args.other_expenses,
            },
            extra_payment: args.extra_payment,
        }
    };

    tracing::debug!(
        house_price = %mortgage_input.house_price,
        term_years = mortgage_input.loan_term_years,
        "analysing mortgage"
    );
    let result = analyze_mortgage(&mortgage_input, assumptions)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_repayment(args: RepaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = read_loan(args.loan)?;
    let monthly = repayment(loan.principal, loan.annual_rate_percent, loan.term_years)?;
    let total = monthly * Decimal::from(loan.term_years * 12);
    Ok(json!({
        "monthly_repayment": monthly.round_dp(2),
        "total_payment": total.round_dp(2),
        "total_interest": (total - loan.principal).round_dp(2),
    }))
}

pub fn run_breakdown(args: BreakdownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = read_loan(args.loan)?;
    let schedule = breakdown_payments(loan.principal, loan.annual_rate_percent, loan.term_years)?;
    if args.monthly {
        Ok(serde_json::to_value(&schedule.periods)?)
    } else {
        Ok(serde_json::to_value(yearly_breakdown(&schedule))?)
    }
}

pub fn run_payoff(args: PayoffArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payoff: PayoffInput = if let Some(ref path) = args.loan.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PayoffInput {
            loan: loan_from_flags(&args.loan)?,
            monthly_repayment: args.monthly_repayment,
            extra_payment: args.extra,
        }
    };

    let loan = &payoff.loan;
    let scheduled = match payoff.monthly_repayment {
        Some(amount) => amount,
        None => repayment(loan.principal, loan.annual_rate_percent, loan.term_years)?,
    };
    let months = new_loan_term_months(
        loan.principal,
        loan.annual_rate_percent,
        scheduled,
        payoff.extra_payment,
    )?;
    let years = months / dec!(12);
    Ok(json!({
        "monthly_repayment": scheduled.round_dp(2),
        "extra_payment": payoff.extra_payment,
        "new_term_months": months.round_dp(2),
        "new_term_years": years.round_dp(2),
        "years_saved": (Decimal::from(loan.term_years) - years).round_dp(2),
    }))
}

pub fn run_cgt(args: CgtArgs, assumptions: &ModelAssumptions) -> Result<Value, Box<dyn std::error::Error>> {
    let sale: SaleProjection = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SaleProjection {
            purchase_price: args
                .purchase_price
                .ok_or("--purchase-price is required (or provide --input)")?,
            selling_price: args
                .selling_price
                .ok_or("--selling-price is required (or provide --input)")?,
            years_owned: args
                .years_owned
                .ok_or("--years-owned is required (or provide --input)")?,
            capital_losses: args.capital_losses,
        }
    };
    Ok(serde_json::to_value(project_sale(&sale, assumptions))?)
}

pub fn run_expected_rate(args: ExpectedRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rates: RateProjectionInputs = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RateProjectionInputs {
            long_term_rate: args
                .long_term_rate
                .ok_or("--long-term-rate is required (or provide --input)")?,
            short_term_rate: args
                .short_term_rate
                .ok_or("--short-term-rate is required (or provide --input)")?,
        }
    };
    let rate = project(&rates)?;
    Ok(json!({ "expected_rate_percent": rate.round_dp(4) }))
}

fn read_loan(args: LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        input::file::read_json(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        loan_from_flags(&args)
    }
}

fn loan_from_flags(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    Ok(LoanParameters {
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent: args
            .rate
            .ok_or("--rate is required (or provide --input)")?,
        term_years: args
            .years
            .ok_or("--years is required (or provide --input)")?,
    })
}
