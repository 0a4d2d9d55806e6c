//! Capital gains tax on a projected sale, the profit left after it, and the
//! household's monthly surplus while carrying the mortgage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assumptions::ModelAssumptions;
use crate::error::FinanceError;
use crate::types::{Money, Rate, Years};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleProjection {
    pub purchase_price: Money,
    pub selling_price: Money,
    pub years_owned: Years,
    /// Capital losses and capital expenditure on the property.
    #[serde(default)]
    pub capital_losses: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleOutcome {
    /// Selling price less purchase price and capital losses.
    pub capital_gain: Money,
    pub discount_applied: bool,
    pub taxable_gain: Money,
    pub tax_due: Money,
    /// Selling price less purchase price and tax.
    pub net_profit: Money,
}

/// Monthly household cash flow while the mortgage is running.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdBudget {
    pub monthly_income: Money,
    pub rental_income: Money,
    /// Property management fee as a fraction of rent (0.06 = 6%).
    pub management_fee: Rate,
    pub rent_expense: Money,
    pub utilities: Money,
    pub groceries: Money,
    pub other_expenses: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// CGT due on the projected sale. Zero when there is no gain.
pub fn capital_gains_tax(sale: &SaleProjection, assumptions: &ModelAssumptions) -> Money {
    project_sale(sale, assumptions).tax_due
}

/// Selling price less purchase price and CGT. Capital losses reduce the tax
/// but are not deducted from the profit itself.
pub fn net_profit_from_sale(sale: &SaleProjection, assumptions: &ModelAssumptions) -> Money {
    project_sale(sale, assumptions).net_profit
}

pub fn project_sale(sale: &SaleProjection, assumptions: &ModelAssumptions) -> SaleOutcome {
    let capital_gain = sale.selling_price - sale.purchase_price - sale.capital_losses;

    let (discount_applied, taxable_gain, tax_due) = if capital_gain > Decimal::ZERO {
        let discounted = sale.years_owned > assumptions.cgt_discount_min_years;
        let taxable = if discounted {
            capital_gain * (Decimal::ONE - assumptions.cgt_discount)
        } else {
            capital_gain
        };
        (discounted, taxable, taxable * assumptions.cgt_rate)
    } else {
        (false, Decimal::ZERO, Decimal::ZERO)
    };

    SaleOutcome {
        capital_gain,
        discount_applied,
        taxable_gain,
        tax_due,
        net_profit: sale.selling_price - sale.purchase_price - tax_due,
    }
}

/// Rental income after the management fee.
pub fn net_rental_income(budget: &HouseholdBudget) -> Money {
    budget.rental_income * (Decimal::ONE - budget.management_fee)
}

/// Income left each month after living costs and the mortgage repayment,
/// with net rental income offsetting expenses.
pub fn net_monthly_savings(budget: &HouseholdBudget, monthly_repayment: Money) -> FinanceResult<Money> {
    if budget.management_fee < Decimal::ZERO || budget.management_fee > Decimal::ONE {
        return Err(FinanceError::InvalidInput {
            field: "management_fee".into(),
            reason: "Management fee must be between 0 and 1".into(),
        });
    }

    let expenses = budget.rent_expense
        + budget.utilities
        + budget.groceries
        + budget.other_expenses
        + monthly_repayment
        - net_rental_income(budget);
    Ok(budget.monthly_income - expenses)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sale(purchase: Money, selling: Money, years: Years, losses: Money) -> SaleProjection {
        SaleProjection {
            purchase_price: purchase,
            selling_price: selling,
            years_owned: years,
            capital_losses: losses,
        }
    }

    #[test]
    fn test_dashboard_sale() {
        let a = ModelAssumptions::default();
        let s = sale(dec!(852075), dec!(1300000), dec!(5), dec!(45000));
        let out = project_sale(&s, &a);
        assert_eq!(out.capital_gain, dec!(402925));
        assert!(out.discount_applied);
        assert_eq!(out.tax_due, dec!(60438.75));
        assert_eq!(out.net_profit, dec!(387486.25));
        assert_eq!(capital_gains_tax(&s, &a), out.tax_due);
        assert_eq!(net_profit_from_sale(&s, &a), out.net_profit);
    }

    #[test]
    fn test_no_tax_without_gain() {
        let a = ModelAssumptions::default();
        let cases = [
            sale(dec!(500000), dec!(500000), dec!(5), dec!(0)),
            sale(dec!(500000), dec!(450000), dec!(0.5), dec!(0)),
            sale(dec!(500000), dec!(540000), dec!(3), dec!(40000)),
            sale(dec!(500000), dec!(540000), dec!(3), dec!(60000)),
        ];
        for s in &cases {
            assert_eq!(capital_gains_tax(s, &a), Decimal::ZERO);
        }
    }

    #[test]
    fn test_discount_threshold_is_strict() {
        let a = ModelAssumptions::default();
        // 100k gain
        let one_year = project_sale(&sale(dec!(400000), dec!(500000), dec!(1), dec!(0)), &a);
        assert!(!one_year.discount_applied);
        assert_eq!(one_year.tax_due, dec!(30000));

        let under = project_sale(&sale(dec!(400000), dec!(500000), dec!(0.5), dec!(0)), &a);
        assert!(!under.discount_applied);

        let over = project_sale(&sale(dec!(400000), dec!(500000), dec!(1.01), dec!(0)), &a);
        assert!(over.discount_applied);
        assert_eq!(over.tax_due, dec!(15000));
    }

    #[test]
    fn test_alternate_regime() {
        let a = ModelAssumptions {
            cgt_discount: dec!(0.25),
            cgt_rate: dec!(0.40),
            cgt_discount_min_years: dec!(2),
            ..Default::default()
        };
        let two_years = capital_gains_tax(&sale(dec!(100000), dec!(200000), dec!(2), dec!(0)), &a);
        assert_eq!(two_years, dec!(40000));
        let three_years = capital_gains_tax(&sale(dec!(100000), dec!(200000), dec!(3), dec!(0)), &a);
        assert_eq!(three_years, dec!(30000));
    }

    #[test]
    fn test_net_monthly_savings() {
        let budget = HouseholdBudget {
            monthly_income: dec!(8500),
            rental_income: dec!(3000),
            management_fee: dec!(0.06),
            rent_expense: dec!(1950),
            utilities: dec!(200),
            groceries: dec!(600),
            other_expenses: dec!(100),
        };
        assert_eq!(net_rental_income(&budget), dec!(2820));
        let savings = net_monthly_savings(&budget, dec!(5000)).unwrap();
        // 8500 - (1950 + 200 + 600 + 100 + 5000 - 2820)
        assert_eq!(savings, dec!(3470));
    }

    #[test]
    fn test_invalid_management_fee() {
        let budget = HouseholdBudget {
            management_fee: dec!(1.5),
            ..Default::default()
        };
        assert!(net_monthly_savings(&budget, dec!(1000)).is_err());
    }
}
