//! Forward-looking measurement horizons.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Horizon over which forward returns and alphas are measured.
///
/// Horizons are fixed calendar-day spans, an intentional approximation of
/// 3/6/12 months rather than trading-day-exact or month-end-anchored
/// windows. The end of a window is snapped to the next available trading
/// date, so the realized span can be slightly longer than the nominal one.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    /// Three months, approximated as 91 calendar days
    #[display("3M")]
    ThreeMonths,
    /// Six months, approximated as 182 calendar days
    #[display("6M")]
    SixMonths,
    /// One year, approximated as 365 calendar days
    #[display("1Y")]
    OneYear,
}

impl Horizon {
    /// All horizons, in ascending span order.
    pub const ALL: [Self; 3] = [Self::ThreeMonths, Self::SixMonths, Self::OneYear];

    /// Nominal span in calendar days.
    pub const fn days(self) -> i64 {
        match self {
            Self::ThreeMonths => 91,
            Self::SixMonths => 182,
            Self::OneYear => 365,
        }
    }
}
