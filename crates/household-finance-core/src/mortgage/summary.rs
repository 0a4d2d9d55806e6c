//! Mortgage repayment and financial projection report.
//!
//! Derives the loan rate from the current long/short rates, then produces the
//! repayment, lifetime interest, sale outcome, monthly surplus, the shorter
//! term under an extra monthly payment and the yearly principal/interest split.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{breakdown_payments, new_loan_term_months};
use crate::assumptions::{AssumptionsRecord, ModelAssumptions};
use crate::error::FinanceError;
use crate::mortgage::sale::{net_monthly_savings, project_sale, HouseholdBudget, SaleOutcome, SaleProjection};
use crate::projection::{yearly_breakdown, YearlyBreakdown};
use crate::rates::expected_rate;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::FinanceResult;

/// Terms longer than this are outside what lenders usually offer.
const TYPICAL_MAX_TERM_YEARS: u32 = 30;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub house_price: Money,
    pub deposit: Money,
    pub loan_term_years: u32,
    /// Current long-term rate in percent (e.g. 6.04).
    pub long_term_rate_percent: Rate,
    /// Current short-term rate in percent (e.g. 5.00).
    pub short_term_rate_percent: Rate,
    pub selling_price: Money,
    pub years_owned: Years,
    #[serde(default)]
    pub capital_losses: Money,
    #[serde(default)]
    pub budget: HouseholdBudget,
    #[serde(default)]
    pub extra_payment: Money,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTermReduction {
    pub original_term_years: u32,
    pub new_term_months: Decimal,
    pub new_term_years: Decimal,
    pub years_saved: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageSummary {
    pub loan_amount: Money,
    /// Loan rate implied by the term structure, in percent.
    pub annual_rate_percent: Rate,
    pub monthly_repayment: Money,
    /// Repayments over the full term.
    pub total_payment: Money,
    pub total_interest: Money,
    /// Total interest as a percentage of the loan amount.
    pub interest_to_principal_pct: Decimal,
    pub sale: SaleOutcome,
    pub net_monthly_savings: Money,
    pub term_reduction: LoanTermReduction,
    pub yearly_breakdown: Vec<YearlyBreakdown>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn analyze_mortgage(
    input: &MortgageInput,
    assumptions: &ModelAssumptions,
) -> FinanceResult<ComputationOutput<MortgageSummary>> {
    let start = Instant::now();
    assumptions.validate()?;
    validate(input)?;
    let mut warnings: Vec<String> = Vec::new();

    if input.loan_term_years > TYPICAL_MAX_TERM_YEARS {
        warnings.push(format!(
            "Loan term of {} years exceeds the usual {}-year maximum",
            input.loan_term_years, TYPICAL_MAX_TERM_YEARS
        ));
    }

    let loan_amount = input.house_price - input.deposit;
    let annual_rate_percent = expected_rate(
        input.long_term_rate_percent / dec!(100),
        input.short_term_rate_percent / dec!(100),
    )?;
    if annual_rate_percent < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "short_term_rate_percent".into(),
            reason: format!(
                "Rate curve implies a negative loan rate ({}%)",
                annual_rate_percent.round_dp(2)
            ),
        });
    }

    let schedule = breakdown_payments(loan_amount, annual_rate_percent, input.loan_term_years)?;
    let monthly_repayment = schedule.monthly_payment;
    let total_payment = monthly_repayment
        .checked_mul(Decimal::from(schedule.periods.len()))
        .ok_or_else(|| FinanceError::InvalidInput {
            field: "house_price".into(),
            reason: "Total repayment exceeds the supported decimal range".into(),
        })?;
    let total_interest = total_payment - loan_amount;

    let sale = project_sale(
        &SaleProjection {
            purchase_price: input.house_price,
            selling_price: input.selling_price,
            years_owned: input.years_owned,
            capital_losses: input.capital_losses,
        },
        assumptions,
    );
    if sale.capital_gain <= Decimal::ZERO {
        warnings.push("Projected sale makes no capital gain; no CGT is payable".into());
    }

    let savings = net_monthly_savings(&input.budget, monthly_repayment)?;
    if savings < Decimal::ZERO {
        warnings.push(format!(
            "Monthly expenses exceed income by {}",
            (-savings).round_dp(2)
        ));
    }

    let new_term_months = new_loan_term_months(
        loan_amount,
        annual_rate_percent,
        monthly_repayment,
        input.extra_payment,
    )?;
    let new_term_years = new_term_months / dec!(12);

    let output = MortgageSummary {
        loan_amount,
        annual_rate_percent,
        monthly_repayment,
        total_payment,
        total_interest,
        interest_to_principal_pct: total_interest / loan_amount * dec!(100),
        sale,
        net_monthly_savings: savings,
        term_reduction: LoanTermReduction {
            original_term_years: input.loan_term_years,
            new_term_months,
            new_term_years,
            years_saved: Decimal::from(input.loan_term_years) - new_term_years,
        },
        yearly_breakdown: yearly_breakdown(&schedule),
    };

    let record = AssumptionsRecord { input, model: assumptions };
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate amortization with term-structure rate and CGT sale projection",
        &record,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &MortgageInput) -> FinanceResult<()> {
    if input.house_price <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "house_price".into(),
            reason: "House price must be positive".into(),
        });
    }
    if input.deposit < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "deposit".into(),
            reason: "Deposit cannot be negative".into(),
        });
    }
    if input.deposit >= input.house_price {
        return Err(FinanceError::InvalidInput {
            field: "deposit".into(),
            reason: "Deposit must be less than house price".into(),
        });
    }
    if input.loan_term_years == 0 {
        return Err(FinanceError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term must be at least one year".into(),
        });
    }
    if input.extra_payment < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "extra_payment".into(),
            reason: "Extra payment cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
