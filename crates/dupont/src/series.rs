//! Price series and trading-calendar alignment.
//!
//! A [`PriceSeries`] is the ordered close-price history of one instrument.
//! Its single nontrivial operation is [`PriceSeries::align`]: snapping an
//! arbitrary calendar date to the earliest trading date actually present in
//! the series. All forward-return and alpha computation is built on this
//! primitive.

use crate::{DupontError, Result};
use chrono::NaiveDate;
use polars::prelude::*;

/// Date-ordered close prices for a single instrument.
///
/// Invariant: dates are strictly increasing, so there are no duplicates and
/// "first date ≥ target" is a binary search. Construction rejects any input
/// that violates this, since unordered price history indicates a broken
/// upstream feed rather than a business-as-usual data gap.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from `(date, close)` observations.
    ///
    /// # Errors
    ///
    /// Returns [`DupontError::NonMonotonicDates`] if dates are not strictly
    /// increasing (out of order or duplicated).
    pub fn new(observations: impl IntoIterator<Item = (NaiveDate, f64)>) -> Result<Self> {
        let mut dates = Vec::new();
        let mut closes = Vec::new();
        for (position, (date, close)) in observations.into_iter().enumerate() {
            if let Some(&last) = dates.last() {
                if date <= last {
                    return Err(DupontError::NonMonotonicDates { position });
                }
            }
            dates.push(date);
            closes.push(close);
        }
        Ok(Self { dates, closes })
    }

    /// Build a series from a frame with `date` (`%Y-%m-%d` strings) and
    /// `close` (f64) columns, as handed over by the data-acquisition layer.
    ///
    /// # Errors
    ///
    /// Fails on missing columns, null cells, unparseable dates, or dates
    /// that are not strictly increasing.
    pub fn from_frame(frame: &DataFrame) -> Result<Self> {
        let dates = frame
            .column("date")
            .map_err(|_| DupontError::MissingColumn("date".to_string()))?
            .str()?;
        let closes = frame
            .column("close")
            .map_err(|_| DupontError::MissingColumn("close".to_string()))?
            .f64()?;

        let mut observations = Vec::with_capacity(frame.height());
        for (date, close) in dates.into_iter().zip(closes) {
            let date = date.ok_or_else(|| DupontError::NullColumn("date".to_string()))?;
            let close = close.ok_or_else(|| DupontError::NullColumn("close".to_string()))?;
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| DupontError::InvalidDate(date.to_string()))?;
            observations.push((date, close));
        }
        Self::new(observations)
    }

    /// Earliest date in the series on or after `target`.
    ///
    /// Returns `None` when `target` falls after the last available date.
    /// Never extrapolates or interpolates: the result is always a date that
    /// exists in the series, and a series whose only date equals `target`
    /// returns that date itself.
    pub fn align(&self, target: NaiveDate) -> Option<NaiveDate> {
        let index = self.dates.partition_point(|&date| date < target);
        self.dates.get(index).copied()
    }

    /// Close price on an exact in-series date.
    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        let index = self.dates.binary_search(&date).ok()?;
        Some(self.closes[index])
    }

    /// First date in the series, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Last date in the series, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly_series() -> PriceSeries {
        // Mondays: Jan 6, 13, 20, 27 of 2025
        PriceSeries::new([
            (date(2025, 1, 6), 100.0),
            (date(2025, 1, 13), 102.0),
            (date(2025, 1, 20), 99.0),
            (date(2025, 1, 27), 105.0),
        ])
        .unwrap()
    }

    #[rstest]
    #[case(date(2025, 1, 6), Some(date(2025, 1, 6)))] // exact match
    #[case(date(2025, 1, 7), Some(date(2025, 1, 13)))] // mid-week snaps forward
    #[case(date(2025, 1, 1), Some(date(2025, 1, 6)))] // before history snaps to first
    #[case(date(2025, 1, 27), Some(date(2025, 1, 27)))] // last date self-matches
    #[case(date(2025, 1, 28), None)] // past history
    fn test_align(#[case] target: NaiveDate, #[case] expected: Option<NaiveDate>) {
        assert_eq!(weekly_series().align(target), expected);
    }

    #[test]
    fn test_align_returns_minimum_on_or_after() {
        let series = weekly_series();
        let first = series.first_date().unwrap();
        let last = series.last_date().unwrap();
        let mut target = first;
        while target <= last {
            let aligned = series.align(target).unwrap();
            assert!(aligned >= target);
            assert!(series.close_on(aligned).is_some());
            // no in-series date lies in [target, aligned)
            let mut probe = target;
            while probe < aligned {
                assert!(series.close_on(probe).is_none());
                probe = probe.succ_opt().unwrap();
            }
            target = target.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_single_date_series_self_match() {
        let series = PriceSeries::new([(date(2025, 3, 3), 50.0)]).unwrap();
        assert_eq!(series.align(date(2025, 3, 3)), Some(date(2025, 3, 3)));
        assert_eq!(series.align(date(2025, 3, 4)), None);
    }

    #[test]
    fn test_out_of_order_dates_rejected() {
        let result = PriceSeries::new([
            (date(2025, 1, 13), 100.0),
            (date(2025, 1, 6), 101.0),
        ]);
        assert!(matches!(
            result,
            Err(DupontError::NonMonotonicDates { position: 1 })
        ));
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let result = PriceSeries::new([
            (date(2025, 1, 6), 100.0),
            (date(2025, 1, 6), 101.0),
        ]);
        assert!(matches!(
            result,
            Err(DupontError::NonMonotonicDates { position: 1 })
        ));
    }

    #[test]
    fn test_from_frame() {
        let frame = df![
            "date" => ["2025-01-06", "2025-01-13"],
            "close" => [100.0, 102.0]
        ]
        .unwrap();

        let series = PriceSeries::from_frame(&frame).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.close_on(date(2025, 1, 13)), Some(102.0));
    }

    #[test]
    fn test_from_frame_missing_column() {
        let frame = df!["date" => ["2025-01-06"]].unwrap();
        assert!(matches!(
            PriceSeries::from_frame(&frame),
            Err(DupontError::MissingColumn(column)) if column == "close"
        ));
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::new([]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.align(date(2025, 1, 1)), None);
    }
}
