#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dupont/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod error;
pub mod factors;
pub mod horizon;
pub mod panel;
pub mod pipeline;
pub mod returns;
pub mod score;
pub mod series;
pub mod statements;

// Re-export core types
pub use error::{DupontError, Result};
pub use factors::{FactorRecord, build_factors};
pub use horizon::Horizon;
pub use panel::{ForwardMetrics, Panel, ScoredRecord};
pub use pipeline::{EntityData, build_panel};
pub use returns::{forward_alpha, forward_return};
pub use score::{STANDARDIZE_EPSILON, quality_scores};
pub use series::PriceSeries;
pub use statements::LineItemTable;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
