//! Cross-sectional ROE quality scoring.
//!
//! Raw factor scales shift with macro regime, so records are only compared
//! against peers reporting in the same calendar year. Within each year
//! group every component is z-scored and the composite rewards margin and
//! efficiency while penalizing leverage:
//!
//! ```text
//! standardize(x) = (x − mean(x)) / (std(x) + ε)
//! quality_score  = standardize(ProfitMargin)
//!                + standardize(AssetTurnover)
//!                − standardize(FinancialLeverage)
//! ```
//!
//! High ROE driven by genuine operating quality scores high; ROE inflated
//! through leverage scores low.

use crate::{FactorRecord, Result};
use chrono::Datelike;
use polars::prelude::*;

/// Denominator guard for degenerate peer groups (single member or zero
/// variance).
pub const STANDARDIZE_EPSILON: f64 = 1e-8;

/// Quality score per record, in input order.
///
/// Standardization runs independently inside each period-year peer group;
/// the row index carried through the frame restores the original order
/// after the scatter/gather. Group statistics ignore missing components,
/// and a record missing any component gets a missing score. A group whose
/// component has no defined spread (one member, or all members equal)
/// standardizes against the ε guard instead of dividing by zero. Empty
/// input yields an empty result rather than an error.
pub fn quality_scores<'a, I>(records: I) -> Result<Vec<Option<f64>>>
where
    I: IntoIterator<Item = &'a FactorRecord>,
{
    let mut years: Vec<i32> = Vec::new();
    let mut profit_margin: Vec<Option<f64>> = Vec::new();
    let mut asset_turnover: Vec<Option<f64>> = Vec::new();
    let mut financial_leverage: Vec<Option<f64>> = Vec::new();
    for record in records {
        years.push(record.period_end.year());
        profit_margin.push(record.profit_margin);
        asset_turnover.push(record.asset_turnover);
        financial_leverage.push(record.financial_leverage);
    }
    if years.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<u32> = (0..years.len() as u32).collect();
    let frame = df![
        "row" => rows,
        "year" => years,
        "profit_margin" => profit_margin,
        "asset_turnover" => asset_turnover,
        "financial_leverage" => financial_leverage
    ]?;

    let scored = frame
        .lazy()
        .with_column(
            (standardize("profit_margin") + standardize("asset_turnover")
                - standardize("financial_leverage"))
            .alias("quality_score"),
        )
        .sort(["row"], Default::default())
        .collect()?;

    Ok(scored
        .column("quality_score")?
        .f64()?
        .into_iter()
        .collect())
}

/// Peer-group z-score expression with the ε-guarded denominator.
///
/// Sample std over a single defined value is null; treating that as zero
/// spread lets the ε guard engage so the lone member scores 0 instead of
/// missing.
fn standardize(name: &str) -> Expr {
    let centered = col(name) - col(name).mean().over([col("year")]);
    let spread = col(name)
        .std(1)
        .over([col("year")])
        .fill_null(lit(0.0));
    centered / (spread + lit(STANDARDIZE_EPSILON))
}
