//! Financial-statement line-item tables.
//!
//! Fundamental data arrives as two labeled tables per entity (income
//! statement and balance sheet), each keyed by period-end date. Labels
//! follow the reporting source's vocabulary, which is not fully uniform:
//! shareholders' equity in particular appears under more than one label
//! depending on the source. [`resolve_label`] reconciles that variance
//! through a prioritized alias list, resolved once per entity.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Net income label in the income statement.
pub const NET_INCOME: &str = "Net Income";

/// Total revenue label in the income statement.
pub const TOTAL_REVENUE: &str = "Total Revenue";

/// Total assets label in the balance sheet.
pub const TOTAL_ASSETS: &str = "Total Assets";

/// Accepted labels for shareholders' equity, in priority order.
pub const EQUITY_LABELS: [&str; 2] = ["Total Stockholder Equity", "Stockholders Equity"];

/// Labeled line items for one statement, keyed by period-end date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemTable {
    items: BTreeMap<String, BTreeMap<NaiveDate, f64>>,
}

impl LineItemTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for `label` at `period_end`, replacing any previous
    /// value for that cell.
    pub fn insert(&mut self, label: impl Into<String>, period_end: NaiveDate, value: f64) {
        self.items.entry(label.into()).or_default().insert(period_end, value);
    }

    /// Value of `label` at `period_end`, if reported.
    pub fn value(&self, label: &str, period_end: NaiveDate) -> Option<f64> {
        self.items.get(label)?.get(&period_end).copied()
    }

    /// Whether any period reports a value under `label`.
    pub fn has_label(&self, label: &str) -> bool {
        self.items.get(label).is_some_and(|periods| !periods.is_empty())
    }

    /// All period-end dates with at least one reported value, ascending.
    pub fn periods(&self) -> BTreeSet<NaiveDate> {
        self.items.values().flat_map(|periods| periods.keys().copied()).collect()
    }

    /// Whether the table holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.items.values().all(BTreeMap::is_empty)
    }
}

/// Resolve a prioritized alias list against a set of tables.
///
/// Returns the first alias reported by any of the tables, or `None` when no
/// alias has data anywhere. Callers resolve once per entity and use the
/// winning label for every subsequent period lookup.
pub fn resolve_label<'a>(aliases: &[&'a str], tables: &[&LineItemTable]) -> Option<&'a str> {
    aliases
        .iter()
        .copied()
        .find(|alias| tables.iter().any(|table| table.has_label(alias)))
}
