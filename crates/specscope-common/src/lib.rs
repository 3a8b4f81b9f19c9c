//! Shared types for the SpecScope platform.
//!
//! This crate contains:
//! - **Data models** — `Reading`, `TimePeriod`, replay input and hourly trend rows
//! - **Protocol messages** — request/response pair of the external prediction service

pub mod models;
pub mod protocol;
