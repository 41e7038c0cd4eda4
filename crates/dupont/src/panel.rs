//! Scored panel records and the panel itself.

use crate::{FactorRecord, Horizon, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Forward-looking measurements for one record and horizon.
///
/// Both fields are `None` when no trading date exists at or after the
/// window boundary within the available price history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForwardMetrics {
    /// Realized forward return of the entity
    pub ret: Option<f64>,
    /// Entity forward return minus benchmark forward return
    pub alpha: Option<f64>,
}

/// One fully-enriched panel row: factors, forward metrics per horizon, and
/// the peer-group quality score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    /// Profitability decomposition for the period
    pub record: FactorRecord,
    /// Forward metrics over 91 calendar days
    pub fwd_3m: ForwardMetrics,
    /// Forward metrics over 182 calendar days
    pub fwd_6m: ForwardMetrics,
    /// Forward metrics over 365 calendar days
    pub fwd_1y: ForwardMetrics,
    /// Cross-sectional quality score within the period-year peer group
    pub quality_score: Option<f64>,
}

impl ScoredRecord {
    /// Forward metrics for `horizon`.
    pub const fn forward(&self, horizon: Horizon) -> ForwardMetrics {
        match horizon {
            Horizon::ThreeMonths => self.fwd_3m,
            Horizon::SixMonths => self.fwd_6m,
            Horizon::OneYear => self.fwd_1y,
        }
    }
}

/// The assembled panel: scored records across many entities, ordered
/// ascending by period end.
///
/// Built once by the pipeline, which is its sole mutator; downstream
/// consumers only read. Missing numeric cells stay missing (`None` in the
/// typed rows, null in the exported frame) and are never substituted with
/// zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Panel {
    records: Vec<ScoredRecord>,
}

impl Panel {
    /// Pipeline-internal constructor.
    pub(crate) const fn from_records(records: Vec<ScoredRecord>) -> Self {
        Self { records }
    }

    /// All records, ordered ascending by period end.
    pub fn records(&self) -> &[ScoredRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the panel holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Export to a DataFrame for downstream grouping and aggregation.
    ///
    /// One row per record; missing values become nulls.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let records = &self.records;
        let entities: Vec<&str> = records.iter().map(|r| r.record.entity.as_str()).collect();
        let period_ends: Vec<String> = records
            .iter()
            .map(|r| r.record.period_end.format("%Y-%m-%d").to_string())
            .collect();

        let mut frame = df![
            "entity" => entities,
            "period_end" => period_ends,
            "profit_margin" => records.iter().map(|r| r.record.profit_margin).collect::<Vec<_>>(),
            "asset_turnover" => records.iter().map(|r| r.record.asset_turnover).collect::<Vec<_>>(),
            "financial_leverage" => records.iter().map(|r| r.record.financial_leverage).collect::<Vec<_>>(),
            "roe" => records.iter().map(|r| r.record.roe).collect::<Vec<_>>()
        ]?;

        for horizon in Horizon::ALL {
            let stem = match horizon {
                Horizon::ThreeMonths => "fwd_3m",
                Horizon::SixMonths => "fwd_6m",
                Horizon::OneYear => "fwd_1y",
            };
            let returns: Vec<Option<f64>> =
                records.iter().map(|r| r.forward(horizon).ret).collect();
            let alphas: Vec<Option<f64>> =
                records.iter().map(|r| r.forward(horizon).alpha).collect();
            frame.with_column(Column::new(format!("{stem}_return").into(), returns))?;
            frame.with_column(Column::new(format!("{stem}_alpha").into(), alphas))?;
        }

        let scores: Vec<Option<f64>> = records.iter().map(|r| r.quality_score).collect();
        frame.with_column(Column::new("quality_score".into(), scores))?;
        Ok(frame)
    }
}

impl<'a> IntoIterator for &'a Panel {
    type Item = &'a ScoredRecord;
    type IntoIter = std::slice::Iter<'a, ScoredRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scored(entity: &str, year: i32, score: Option<f64>) -> ScoredRecord {
        ScoredRecord {
            record: FactorRecord {
                entity: entity.to_string(),
                period_end: NaiveDate::from_ymd_opt(year, 3, 31).unwrap(),
                profit_margin: Some(0.2),
                asset_turnover: Some(0.5),
                financial_leverage: Some(2.0),
                roe: Some(0.2),
            },
            fwd_3m: ForwardMetrics { ret: Some(0.05), alpha: Some(0.01) },
            fwd_6m: ForwardMetrics::default(),
            fwd_1y: ForwardMetrics { ret: Some(0.12), alpha: None },
            quality_score: score,
        }
    }

    #[test]
    fn test_to_frame_shape_and_nulls() {
        let panel = Panel::from_records(vec![
            scored("A", 2024, Some(1.0)),
            scored("B", 2024, None),
        ]);

        let frame = panel.to_frame().unwrap();
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.width(), 13);

        // Missing values surface as nulls, not zeros
        assert_eq!(frame.column("fwd_1y_alpha").unwrap().null_count(), 2);
        assert_eq!(frame.column("fwd_6m_return").unwrap().null_count(), 2);
        assert_eq!(frame.column("quality_score").unwrap().null_count(), 1);
        assert_eq!(frame.column("fwd_3m_return").unwrap().null_count(), 0);
    }

    #[test]
    fn test_to_frame_empty_panel() {
        let frame = Panel::default().to_frame().unwrap();
        assert_eq!(frame.height(), 0);
        assert_eq!(frame.width(), 13);
    }

    #[test]
    fn test_forward_accessor() {
        let record = scored("A", 2024, None);
        assert_eq!(record.forward(Horizon::ThreeMonths), record.fwd_3m);
        assert_eq!(record.forward(Horizon::SixMonths), record.fwd_6m);
        assert_eq!(record.forward(Horizon::OneYear), record.fwd_1y);
    }
}
