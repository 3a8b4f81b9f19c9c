//! Synthetic spectrum generation and rule-based interference detection.
//!
//! - [`spectrum`] — frequency sweep producing [`Reading`]s from a caller-supplied RNG
//! - [`band`] — fixed-priority band plan and per-band power models
//! - [`detector`] — pairwise spike / overlap detector
//! - [`analysis`] — band filtering and per-hour interference trends
//!
//! [`Reading`]: specscope_common::models::Reading

pub mod analysis;
pub mod band;
pub mod detector;
pub mod spectrum;
