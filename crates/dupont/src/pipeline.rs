//! Panel assembly pipeline.
//!
//! Sequences the engine per entity: statements become factor records, each
//! record is enriched with forward returns against the entity's own price
//! history and alphas against the benchmark, and the pooled rows are scored
//! within period-year peer groups. Entities are independent until the
//! scoring step, which needs every record of a year on hand before any
//! score in that year can be computed.

use crate::panel::{ForwardMetrics, Panel, ScoredRecord};
use crate::returns::{forward_alpha, forward_return};
use crate::score::quality_scores;
use crate::statements::LineItemTable;
use crate::{Horizon, PriceSeries, Result, build_factors};

/// Everything the pipeline needs for one entity.
#[derive(Debug, Clone)]
pub struct EntityData {
    /// Entity identifier carried into every record
    pub entity: String,
    /// Income-statement line items
    pub income: LineItemTable,
    /// Balance-sheet line items
    pub balance: LineItemTable,
    /// Close-price history of the entity
    pub prices: PriceSeries,
}

/// Assemble the scored panel for a set of entities against one benchmark.
///
/// Entities whose statements cannot produce factors (no resolvable equity
/// label, no complete period) simply contribute no rows. Forward cells that
/// run past the available price history stay missing. The returned panel
/// is ordered ascending by period end and is not mutated further.
///
/// # Errors
///
/// Only scoring-frame assembly can fail; all data-quality conditions are
/// absorbed as missing values.
pub fn build_panel(entities: &[EntityData], benchmark: &PriceSeries) -> Result<Panel> {
    let mut rows: Vec<ScoredRecord> = Vec::new();
    for entity in entities {
        for record in build_factors(&entity.entity, &entity.income, &entity.balance) {
            let as_of = record.period_end;
            let mut metrics = [ForwardMetrics::default(); 3];
            for (slot, horizon) in metrics.iter_mut().zip(Horizon::ALL) {
                let ret = forward_return(&entity.prices, as_of, horizon);
                slot.ret = ret;
                slot.alpha = forward_alpha(ret, benchmark, as_of, horizon);
            }
            rows.push(ScoredRecord {
                record,
                fwd_3m: metrics[0],
                fwd_6m: metrics[1],
                fwd_1y: metrics[2],
                quality_score: None,
            });
        }
    }

    rows.sort_by_key(|row| row.record.period_end);

    let scores = quality_scores(rows.iter().map(|row| &row.record))?;
    for (row, score) in rows.iter_mut().zip(scores) {
        row.quality_score = score;
    }
    Ok(Panel::from_records(rows))
}
