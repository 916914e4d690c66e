//! Analytics over annotated headlines
//!
//! - [`annotate`] turns raw articles into dated sentiment rows
//! - [`daily`] groups those rows into a per-date mean series

pub mod annotate;
pub mod daily;

pub use annotate::{annotate, annotate_article, trend_series, Annotation};
pub use daily::aggregate_daily;
