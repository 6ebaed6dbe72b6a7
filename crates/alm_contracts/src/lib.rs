//! Cashflow generation: turns banking-book positions into dated,
//! signed interest/principal flows.
//!
//! Product-type state machines (bullet, linear, annuity, scheduled) live
//! under [`generators`]; the non-maturity-deposit behavioural expansion
//! that feeds synthetic flows for `fixed_non_maturity` balances lives in
//! [`nmd`].
#![warn(missing_docs)]

pub mod error;
pub mod generators;
pub mod nmd;
pub mod rate;
pub mod schedule;

pub use error::CashflowError;
pub use generators::generate_cashflows;
pub use nmd::expand_nmd_positions;
pub use schedule::{build_periods, future_periods, Period};
