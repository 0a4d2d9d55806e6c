//! Fixed-rate loan amortization: level monthly repayment, the per-month
//! principal/interest split, and the payoff term under extra repayments.
//!
//! Annual rates in this module are percentages (6.52 = 6.52% p.a.), matching
//! how the mortgage calculator collects them.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::types::{Money, Rate};
use crate::FinanceResult;

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Principal, rate and term of a fixed-rate loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount owed at settlement.
    pub principal: Money,
    /// Annual nominal rate in percent (e.g. 6.52).
    pub annual_rate_percent: Rate,
    /// Term in whole years.
    pub term_years: u32,
}

/// One month of a level-payment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentPeriod {
    /// Month number (1-indexed).
    pub month: u32,
    pub principal: Money,
    pub interest: Money,
    /// Outstanding balance after this month's payment.
    pub closing_balance: Money,
}

/// Month-by-month split of a level repayment into principal and interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentSchedule {
    pub monthly_payment: Money,
    pub periods: Vec<RepaymentPeriod>,
}

impl RepaymentSchedule {
    pub fn principal_series(&self) -> Vec<Money> {
        self.periods.iter().map(|p| p.principal).collect()
    }

    pub fn interest_series(&self) -> Vec<Money> {
        self.periods.iter().map(|p| p.interest).collect()
    }

    pub fn total_principal(&self) -> Money {
        self.periods.iter().map(|p| p.principal).sum()
    }

    pub fn total_interest(&self) -> Money {
        self.periods.iter().map(|p| p.interest).sum()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert an annual percentage rate to a monthly fraction.
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / dec!(12) / dec!(100)
}

/// Level monthly repayment for a fixed-rate loan.
///
/// `P * i(1+i)^n / ((1+i)^n - 1)` with `n = term_years * 12`. An interest-free
/// loan repays in straight line, `P / n`.
pub fn repayment(principal: Money, annual_rate_percent: Rate, term_years: u32) -> FinanceResult<Money> {
    validate_loan(principal, annual_rate_percent, term_years)?;
    annuity_payment(
        principal,
        monthly_rate(annual_rate_percent),
        term_months(term_years)?,
    )
}

/// Split every monthly repayment into its principal and interest parts.
pub fn breakdown_payments(
    principal: Money,
    annual_rate_percent: Rate,
    term_years: u32,
) -> FinanceResult<RepaymentSchedule> {
    validate_loan(principal, annual_rate_percent, term_years)?;

    let i = monthly_rate(annual_rate_percent);
    let months = term_months(term_years)?;
    let payment = annuity_payment(principal, i, months)?;

    let mut balance = principal;
    let mut periods = Vec::with_capacity(months as usize);
    for month in 1..=months {
        let interest = balance * i;
        let principal_part = payment - interest;
        balance -= principal_part;
        periods.push(RepaymentPeriod {
            month,
            principal: principal_part,
            interest,
            closing_balance: balance,
        });
    }

    Ok(RepaymentSchedule {
        monthly_payment: payment,
        periods,
    })
}

/// Months needed to clear `principal` when paying `monthly_repayment +
/// extra_payment` each month.
///
/// `-ln(1 - iP / pmt) / ln(1 + i)`. Fails with [`FinanceError::InvalidPayoff`]
/// when the combined payment does not exceed the first month's interest, since
/// the balance would then never fall.
pub fn new_loan_term_months(
    principal: Money,
    annual_rate_percent: Rate,
    monthly_repayment: Money,
    extra_payment: Money,
) -> FinanceResult<Decimal> {
    if principal <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if extra_payment < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "extra_payment".into(),
            reason: "Extra payment cannot be negative".into(),
        });
    }

    let i = monthly_rate(annual_rate_percent);
    let payment = monthly_repayment
        .checked_add(extra_payment)
        .ok_or_else(|| out_of_range("extra_payment", "Combined monthly payment"))?;
    let interest = i
        .checked_mul(principal)
        .ok_or_else(|| out_of_range("annual_rate_percent", "Monthly interest"))?;

    if payment <= interest || payment <= Decimal::ZERO {
        return Err(FinanceError::InvalidPayoff { payment, interest });
    }

    if i.is_zero() {
        return principal
            .checked_div(payment)
            .ok_or_else(|| out_of_range("monthly_repayment", "Payoff term"));
    }

    let remaining_fraction = Decimal::ONE - interest / payment;
    remaining_fraction
        .checked_ln()
        .and_then(|ln_remaining| (-ln_remaining).checked_div((Decimal::ONE + i).ln()))
        .ok_or_else(|| out_of_range("monthly_repayment", "Payoff term"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Level payment on an annuity of `periods` payments at `periodic_rate`.
pub(crate) fn annuity_payment(principal: Money, periodic_rate: Rate, periods: u32) -> FinanceResult<Money> {
    if periods == 0 {
        return Err(FinanceError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    let n = Decimal::from(periods);
    if periodic_rate.is_zero() {
        return Ok(principal / n);
    }

    let factor = (Decimal::ONE + periodic_rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| out_of_range("rate", "Compound growth factor"))?;
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return Err(FinanceError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    periodic_rate
        .checked_mul(factor)
        .and_then(|rf| principal.checked_mul(rf))
        .and_then(|num| num.checked_div(denom))
        .ok_or_else(|| out_of_range("principal", "Level payment"))
}

/// Number of monthly payments in `term_years`.
fn term_months(term_years: u32) -> FinanceResult<u32> {
    term_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| FinanceError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Loan term of {} years is too long", term_years),
        })
}

fn out_of_range(field: &str, what: &str) -> FinanceError {
    FinanceError::InvalidInput {
        field: field.into(),
        reason: format!("{} exceeds the supported decimal range", what),
    }
}

fn validate_loan(principal: Money, annual_rate_percent: Rate, term_years: u32) -> FinanceResult<()> {
    if principal <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if term_years == 0 {
        return Err(FinanceError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be at least one year".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
