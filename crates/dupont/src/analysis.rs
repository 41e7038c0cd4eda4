//! Descriptive panel statistics.
//!
//! Read-only aggregations over an assembled [`Panel`]: latest-record
//! rankings, the intra-entity hit rate, quintile mean alphas, and the
//! ROE-versus-quality matrix. Every function ignores missing cells rather
//! than letting them contaminate an aggregate, and no-ops gracefully on an
//! empty panel.

use crate::{Panel, ScoredRecord};
use std::collections::BTreeMap;

/// Number of quality-score buckets in the quintile analysis.
pub const QUINTILES: usize = 5;

/// Intra-entity hit-rate counts.
///
/// Computed over each entity's latest two periods: the denominator counts
/// entities whose quality score improved, the numerator those whose
/// one-year forward alpha improved as well. Entities with fewer than two
/// periods contribute to neither count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitRate {
    /// Entities whose quality score improved period over period
    pub improvers: usize,
    /// Improvers whose 1Y forward alpha also improved
    pub hits: usize,
}

impl HitRate {
    /// Hits over improvers, `None` when there are no improvers.
    pub fn ratio(&self) -> Option<f64> {
        (self.improvers > 0).then(|| self.hits as f64 / self.improvers as f64)
    }
}

/// Mean 1Y alpha within one quality-score bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuintileStat {
    /// Bucket number, 1 (lowest scores) through [`QUINTILES`] (highest)
    pub quintile: usize,
    /// Records in the bucket
    pub count: usize,
    /// Mean of the defined 1Y alphas in the bucket
    pub mean_alpha: Option<f64>,
}

/// Mean 1Y alpha for one cell of the ROE-versus-quality matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellStat {
    /// Records in the cell
    pub count: usize,
    /// Mean of the defined 1Y alphas in the cell
    pub mean_alpha: Option<f64>,
}

/// Median-split matrix of mean 1Y alpha by ROE level and quality score.
///
/// Separates entities whose high ROE rests on operating quality from those
/// whose ROE is leverage-driven.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QualityMatrix {
    /// Above-median quality, above-median ROE
    pub high_quality_high_roe: CellStat,
    /// Above-median quality, ROE at or below median
    pub high_quality_low_roe: CellStat,
    /// Quality at or below median, above-median ROE
    pub low_quality_high_roe: CellStat,
    /// Quality at or below median, ROE at or below median
    pub low_quality_low_roe: CellStat,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Records grouped by entity, preserving the panel's period order.
fn by_entity(panel: &Panel) -> BTreeMap<&str, Vec<&ScoredRecord>> {
    let mut groups: BTreeMap<&str, Vec<&ScoredRecord>> = BTreeMap::new();
    for record in panel {
        groups.entry(record.record.entity.as_str()).or_default().push(record);
    }
    groups
}

/// Latest record per entity with a defined quality score, best first.
pub fn latest_rankings(panel: &Panel) -> Vec<&ScoredRecord> {
    let mut ranked: Vec<(f64, &ScoredRecord)> = by_entity(panel)
        .into_values()
        .filter_map(|records| {
            let latest = *records.last()?;
            latest.quality_score.map(|score| (score, latest))
        })
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.into_iter().map(|(_, record)| record).collect()
}

/// Intra-entity hit rate over the latest two periods of each entity.
///
/// An entity qualifies as an improver only when both of its latest two
/// quality scores are defined and the newer one is higher; a hit
/// additionally requires both 1Y alphas defined with the newer one higher.
pub fn hit_rate(panel: &Panel) -> HitRate {
    let mut result = HitRate::default();
    for records in by_entity(panel).into_values() {
        if records.len() < 2 {
            continue;
        }
        let previous = records[records.len() - 2];
        let latest = records[records.len() - 1];

        let (Some(old_score), Some(new_score)) = (previous.quality_score, latest.quality_score)
        else {
            continue;
        };
        if new_score <= old_score {
            continue;
        }
        result.improvers += 1;
        if let (Some(old_alpha), Some(new_alpha)) = (previous.fwd_1y.alpha, latest.fwd_1y.alpha) {
            if new_alpha > old_alpha {
                result.hits += 1;
            }
        }
    }
    result
}

/// Mean 1Y alpha per quality-score quintile.
///
/// Records with a defined score are rank-ordered and split into
/// [`QUINTILES`] near-equal buckets (remainder spread over the lowest
/// buckets). Undefined alphas are excluded from each bucket's mean. Empty
/// input yields an empty result.
pub fn quintile_mean_alpha(panel: &Panel) -> Vec<QuintileStat> {
    let mut scored: Vec<(f64, Option<f64>)> = panel
        .records()
        .iter()
        .filter_map(|r| r.quality_score.map(|score| (score, r.fwd_1y.alpha)))
        .collect();
    if scored.is_empty() {
        return Vec::new();
    }
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    let base = scored.len() / QUINTILES;
    let remainder = scored.len() % QUINTILES;
    let mut stats = Vec::with_capacity(QUINTILES);
    let mut offset = 0;
    for quintile in 0..QUINTILES {
        let size = base + usize::from(quintile < remainder);
        let bucket = &scored[offset..offset + size];
        offset += size;
        stats.push(QuintileStat {
            quintile: quintile + 1,
            count: bucket.len(),
            mean_alpha: mean(bucket.iter().filter_map(|(_, alpha)| *alpha)),
        });
    }
    stats
}

/// Median-split ROE-versus-quality matrix of mean 1Y alphas.
///
/// Only records with both ROE and quality score defined participate;
/// medians are computed over those records. Returns `None` when no record
/// qualifies.
pub fn quality_matrix(panel: &Panel) -> Option<QualityMatrix> {
    let records: Vec<(&ScoredRecord, f64, f64)> = panel
        .records()
        .iter()
        .filter_map(|r| Some((r, r.record.roe?, r.quality_score?)))
        .collect();
    if records.is_empty() {
        return None;
    }

    let median_roe = median(records.iter().map(|(_, roe, _)| *roe).collect())?;
    let median_score = median(records.iter().map(|(_, _, score)| *score).collect())?;

    let cell = |high_quality: bool, high_roe: bool| {
        let members: Vec<&&ScoredRecord> = records
            .iter()
            .filter(|(_, roe, score)| {
                (*score > median_score) == high_quality && (*roe > median_roe) == high_roe
            })
            .map(|(record, _, _)| record)
            .collect();
        CellStat {
            count: members.len(),
            mean_alpha: mean(members.iter().filter_map(|r| r.fwd_1y.alpha)),
        }
    };

    Some(QualityMatrix {
        high_quality_high_roe: cell(true, true),
        high_quality_low_roe: cell(true, false),
        low_quality_high_roe: cell(false, true),
        low_quality_low_roe: cell(false, false),
    })
}
