//! Cashflow-generator dispatch: routes a position to the state machine
//! matching its `source_contract_type`.

mod annuity;
mod bullet;
mod linear;
mod scheduled;

use alm_core::{Cashflow, Date, ForwardCurveSet, Position, ScheduledPrincipalFlow, SourceContractType};

use crate::error::CashflowError;

/// Generates the remaining cashflows for a single maturing position.
///
/// `fixed_non_maturity` is rejected here — it must be routed through
/// [`crate::nmd::expand_nmd_positions`] instead, which produces synthetic
/// `Cashflow` records directly rather than a schedule this dispatcher could
/// process. `variable_non_maturity` positions pass through the standard
/// float bullet engine unchanged, per spec: they carry a payment/repricing
/// schedule like any other floater and are never behaviourally expanded.
pub fn generate_cashflows(
    position: &Position,
    curves: &ForwardCurveSet,
    analysis_date: Date,
    scheduled_flows: &[ScheduledPrincipalFlow],
) -> Result<Vec<Cashflow>, CashflowError> {
    match position.source_contract_type {
        SourceContractType::FixedBullet
        | SourceContractType::VariableBullet
        | SourceContractType::VariableNonMaturity => bullet::generate(position, curves, analysis_date),
        SourceContractType::FixedLinear | SourceContractType::VariableLinear => {
            linear::generate(position, curves, analysis_date)
        }
        SourceContractType::FixedAnnuity | SourceContractType::VariableAnnuity => {
            annuity::generate(position, curves, analysis_date)
        }
        SourceContractType::FixedScheduled | SourceContractType::VariableScheduled => {
            scheduled::generate(position, curves, analysis_date, scheduled_flows)
        }
        SourceContractType::FixedNonMaturity => Err(CashflowError::UnsupportedContractType {
            contract_id: position.contract_id.clone(),
            source_contract_type: position.source_contract_type,
        }),
    }
}
