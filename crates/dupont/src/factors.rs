//! DuPont profitability decomposition.
//!
//! Return on equity is rebuilt multiplicatively from three ratios:
//!
//! ```text
//! ProfitMargin       = Net Income    / Total Revenue
//! AssetTurnover      = Total Revenue / Total Assets
//! FinancialLeverage  = Total Assets  / Equity
//! ROE                = ProfitMargin × AssetTurnover × FinancialLeverage
//! ```
//!
//! Reconstructing ROE from the components rather than measuring it
//! directly doubles as a validity check on the statement join: the
//! decomposition identity must hold for every emitted record.

use crate::statements::{
    EQUITY_LABELS, LineItemTable, NET_INCOME, TOTAL_ASSETS, TOTAL_REVENUE, resolve_label,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Factor values for one entity and reporting period.
///
/// Ratio fields are `None` when a denominator was zero; `roe` is `None`
/// whenever any component is. Missing stays missing through every
/// downstream aggregate rather than collapsing to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRecord {
    /// Entity identifier (ticker or similar)
    pub entity: String,
    /// Reporting period end date
    pub period_end: NaiveDate,
    /// Net income / total revenue
    pub profit_margin: Option<f64>,
    /// Total revenue / total assets
    pub asset_turnover: Option<f64>,
    /// Total assets / shareholders' equity
    pub financial_leverage: Option<f64>,
    /// Product of the three components
    pub roe: Option<f64>,
}

/// Quotient that treats a zero denominator as missing.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}

/// Look a label up across both statements, income side first.
///
/// Mirrors joining the two statements into one table before selecting
/// columns: a label is usable regardless of which statement reported it.
fn line_item(
    label: &str,
    period_end: NaiveDate,
    income: &LineItemTable,
    balance: &LineItemTable,
) -> Option<f64> {
    income
        .value(label, period_end)
        .or_else(|| balance.value(label, period_end))
}

/// Build one [`FactorRecord`] per period where all required line items are
/// reported, sorted ascending by period end.
///
/// The equity label is resolved once per entity through [`EQUITY_LABELS`];
/// when no alias has data the entity is skipped entirely and the result is
/// empty. A reported-but-zero denominator still emits a record, with the
/// affected ratio (and therefore `roe`) missing. Pure function: identical
/// inputs produce identical records.
pub fn build_factors(
    entity: &str,
    income: &LineItemTable,
    balance: &LineItemTable,
) -> Vec<FactorRecord> {
    let Some(equity_label) = resolve_label(&EQUITY_LABELS, &[income, balance]) else {
        return Vec::new();
    };

    let mut periods: BTreeSet<NaiveDate> = income.periods();
    periods.extend(balance.periods());

    let mut records = Vec::new();
    for period_end in periods {
        let (Some(net_income), Some(revenue), Some(assets), Some(equity)) = (
            line_item(NET_INCOME, period_end, income, balance),
            line_item(TOTAL_REVENUE, period_end, income, balance),
            line_item(TOTAL_ASSETS, period_end, income, balance),
            line_item(equity_label, period_end, income, balance),
        ) else {
            continue;
        };

        let profit_margin = ratio(net_income, revenue);
        let asset_turnover = ratio(revenue, assets);
        let financial_leverage = ratio(assets, equity);
        let roe = match (profit_margin, asset_turnover, financial_leverage) {
            (Some(pm), Some(at), Some(fl)) => Some(pm * at * fl),
            _ => None,
        };

        records.push(FactorRecord {
            entity: entity.to_string(),
            period_end,
            profit_margin,
            asset_turnover,
            financial_leverage,
            roe,
        });
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn statements(rows: &[(NaiveDate, f64, f64, f64, f64)]) -> (LineItemTable, LineItemTable) {
        let mut income = LineItemTable::new();
        let mut balance = LineItemTable::new();
        for &(period, net_income, revenue, assets, equity) in rows {
            income.insert(NET_INCOME, period, net_income);
            income.insert(TOTAL_REVENUE, period, revenue);
            balance.insert(TOTAL_ASSETS, period, assets);
            balance.insert(EQUITY_LABELS[0], period, equity);
        }
        (income, balance)
    }

    #[test]
    fn test_known_ratios() {
        let (income, balance) = statements(&[(date(2024, 3, 31), 25.0, 100.0, 200.0, 50.0)]);
        let records = build_factors("AAA", &income, &balance);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_relative_eq!(record.profit_margin.unwrap(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(record.asset_turnover.unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(record.financial_leverage.unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(record.roe.unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_decomposition_identity() {
        let rows = [
            (date(2023, 3, 31), 12.5, 80.0, 310.0, 95.0),
            (date(2024, 3, 31), -4.0, 75.0, 305.0, 88.0),
            (date(2025, 3, 31), 20.0, 130.0, 340.0, 101.0),
        ];
        let (income, balance) = statements(&rows);

        for record in build_factors("AAA", &income, &balance) {
            let product = record.profit_margin.unwrap()
                * record.asset_turnover.unwrap()
                * record.financial_leverage.unwrap();
            assert_relative_eq!(record.roe.unwrap(), product, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_periods_sorted_ascending() {
        let rows = [
            (date(2025, 3, 31), 20.0, 130.0, 340.0, 101.0),
            (date(2023, 3, 31), 12.5, 80.0, 310.0, 95.0),
            (date(2024, 3, 31), 15.0, 90.0, 320.0, 97.0),
        ];
        let (income, balance) = statements(&rows);

        let periods: Vec<NaiveDate> = build_factors("AAA", &income, &balance)
            .iter()
            .map(|record| record.period_end)
            .collect();
        assert_eq!(
            periods,
            [date(2023, 3, 31), date(2024, 3, 31), date(2025, 3, 31)]
        );
    }

    #[test]
    fn test_incomplete_period_skipped() {
        let (mut income, balance) = statements(&[(date(2024, 3, 31), 25.0, 100.0, 200.0, 50.0)]);
        // A second period reporting only income-side items
        income.insert(NET_INCOME, date(2024, 6, 30), 30.0);
        income.insert(TOTAL_REVENUE, date(2024, 6, 30), 110.0);

        let records = build_factors("AAA", &income, &balance);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].period_end, date(2024, 3, 31));
    }

    #[test]
    fn test_equity_synonym_fallback() {
        let mut income = LineItemTable::new();
        let mut balance = LineItemTable::new();
        let period = date(2024, 3, 31);
        income.insert(NET_INCOME, period, 25.0);
        income.insert(TOTAL_REVENUE, period, 100.0);
        balance.insert(TOTAL_ASSETS, period, 200.0);
        balance.insert(EQUITY_LABELS[1], period, 50.0);

        let records = build_factors("AAA", &income, &balance);
        assert_eq!(records.len(), 1);
        assert_relative_eq!(records[0].financial_leverage.unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_entity_without_equity_label_skipped() {
        let mut income = LineItemTable::new();
        let mut balance = LineItemTable::new();
        let period = date(2024, 3, 31);
        income.insert(NET_INCOME, period, 25.0);
        income.insert(TOTAL_REVENUE, period, 100.0);
        balance.insert(TOTAL_ASSETS, period, 200.0);

        assert!(build_factors("AAA", &income, &balance).is_empty());
    }

    #[test]
    fn test_zero_denominators_yield_missing() {
        // Zero revenue: profit margin undefined, turnover still defined
        let (income, balance) = statements(&[(date(2024, 3, 31), 25.0, 0.0, 200.0, 50.0)]);
        let record = &build_factors("AAA", &income, &balance)[0];
        assert_eq!(record.profit_margin, None);
        assert_eq!(record.asset_turnover, Some(0.0));
        assert!(record.financial_leverage.is_some());
        assert_eq!(record.roe, None);

        // Zero equity: leverage undefined
        let (income, balance) = statements(&[(date(2024, 3, 31), 25.0, 100.0, 200.0, 0.0)]);
        let record = &build_factors("AAA", &income, &balance)[0];
        assert_eq!(record.financial_leverage, None);
        assert_eq!(record.roe, None);
    }

    #[test]
    fn test_builder_is_pure() {
        let rows = [
            (date(2023, 3, 31), 12.5, 80.0, 310.0, 95.0),
            (date(2024, 3, 31), 15.0, 90.0, 320.0, 97.0),
        ];
        let (income, balance) = statements(&rows);

        let first = build_factors("AAA", &income, &balance);
        let second = build_factors("AAA", &income, &balance);
        assert_eq!(first, second);
    }
}
