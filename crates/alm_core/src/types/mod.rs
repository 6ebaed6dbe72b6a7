//! Shared value types: calendar dates, day-count conventions, tenor
//! arithmetic, and the position/cashflow domain model.

mod daycount;
mod date;
mod error;
mod position;
mod tenor;

pub use date::Date;
pub use daycount::DayCountConvention;
pub use error::{DateError, TenorError};
pub use position::{
    AnnuityPaymentMode, Cashflow, Position, RateType, ScheduledPrincipalFlow, Side,
    SourceContractType,
};
pub use tenor::Tenor;
