//! Shared value types and forward-curve model for the ALM/IRRBB
//! computational core: dates, day-count and tenor arithmetic, curves and
//! curve sets, and the position/cashflow/bucket/shock data model every
//! other crate in the workspace builds on.
#![warn(missing_docs)]

pub mod buckets;
pub mod curves;
pub mod nmd_params;
pub mod shock_types;
pub mod types;

pub use buckets::{EveBucket, NmdBucket, DEFAULT_EVE_BUCKETS, DEFAULT_OPEN_ENDED_YEARS, NMD_BUCKETS};
pub use curves::{CurveError, CurvePoint, ForwardCurve, ForwardCurveSet};
pub use nmd_params::NmdBehaviouralParams;
pub use shock_types::{default_shock_parameters, PostShockFloor, ShockParameters};
pub use types::{
    AnnuityPaymentMode, Cashflow, Date, DateError, DayCountConvention, Position, RateType,
    ScheduledPrincipalFlow, Side, SourceContractType, Tenor, TenorError,
};

#[cfg(test)]
mod tests {
    #[test]
    fn smoke() {
        assert_eq!(2 + 2, 4);
    }
}
