#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for aspm-metrics
//!
//! This library turns records fetched from a Fortify SSC server into the fixed-shape
//! statistics shown on an application security dashboard.
//!
//! # Module Organization
//!
//! - [`records`]: Record batches as delivered by the SSC REST API
//! - [`metrics`]: The aggregation engine (classification, extrapolation, intervals, ranking)
//! - [`reports`]: Console and JSON rendering of computed metrics
//! - [`config`]: Configuration file handling
//!
//! The engine never talks to the network. Callers hand it batches that were already
//! retrieved, and every aggregation is a pure function of its input.

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

mod commands;

#[doc(hidden)]
pub mod config;

pub mod metrics;

pub mod records;

#[doc(hidden)]
pub mod reports;

pub use crate::commands::{Host, run};
