//! The find-limit solver: given a single prototype position and a target
//! EVE or NII value, finds the notional/rate/maturity/spread that hits it.
//!
//! This crate is deliberately metric-agnostic — it operates on a
//! caller-supplied `evaluate` closure rather than depending on
//! `alm_aggregate` directly, so the same bisection/linear-solve machinery
//! serves whatever metric (EVE, NII-12M, or a future one) the caller's
//! closure computes.

#![warn(missing_docs)]

mod error;
mod find_limit;

pub use error::SolverError;
pub use find_limit::{
    default_bounds, find_limit, solve_binary_search, solve_notional_linear, FindLimitResult, SolveFor,
    SolverConfig,
};
