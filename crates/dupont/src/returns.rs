//! Forward returns and benchmark-relative alphas.
//!
//! A forward return is measured between two aligned trading dates: the
//! as-of date snapped forward onto the series, and that start date plus the
//! horizon's calendar-day span, snapped forward again. When either snap
//! finds no trading date within the available history the value is missing
//! rather than an error, and missing cells are ignored by every downstream
//! aggregate.

use crate::{Horizon, PriceSeries};
use chrono::Duration;
use chrono::NaiveDate;

/// Realized return of `series` over `horizon`, starting at the first
/// trading date on or after `as_of`.
///
/// Returns `None` when the as-of date or the horizon end falls past the end
/// of the available history.
pub fn forward_return(series: &PriceSeries, as_of: NaiveDate, horizon: Horizon) -> Option<f64> {
    let start = series.align(as_of)?;
    let end = series.align(start + Duration::days(horizon.days()))?;
    let start_close = series.close_on(start)?;
    let end_close = series.close_on(end)?;
    Some((end_close - start_close) / start_close)
}

/// Excess return of an entity over the benchmark for the matched horizon.
///
/// The entity leg is the precomputed `entity_return`; the benchmark leg is
/// aligned independently against the benchmark's own trading dates, so the
/// two legs need not share dates. Missing on either leg yields `None`.
pub fn forward_alpha(
    entity_return: Option<f64>,
    benchmark: &PriceSeries,
    as_of: NaiveDate,
    horizon: Horizon,
) -> Option<f64> {
    Some(entity_return? - forward_return(benchmark, as_of, horizon)?)
}
