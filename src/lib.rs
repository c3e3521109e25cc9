//! texprogress library.
//!
//! Tracks writing progress on a LaTeX document: word, page and change counts
//! per day in a CSV ledger, plus a progress chart.

pub mod chart;
pub mod cli;
pub mod collect;
pub mod config;
pub mod days;
pub mod error;
pub mod ledger;
pub mod tracker;
pub mod validate;

pub use error::Error;
