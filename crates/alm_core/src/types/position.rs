//! The position and cashflow domain model shared by every downstream
//! crate: a position is pure data describing one banking-book contract,
//! and a cashflow is one dated, signed interest/principal flow derived
//! from it.

use std::fmt;

use super::date::Date;
use super::daycount::DayCountConvention;

/// Which side of the balance sheet a position sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Asset (loan, bond holding, …).
    Asset,
    /// Liability (deposit, issued bond, …).
    Liability,
}

impl Side {
    /// Sign applied to a magnitude when aggregating across the balance sheet:
    /// `+1` for assets, `-1` for liabilities.
    pub fn sign(&self) -> f64 {
        match self {
            Side::Asset => 1.0,
            Side::Liability => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Asset => write!(f, "A"),
            Side::Liability => write!(f, "L"),
        }
    }
}

/// Whether a position's coupon is fixed for life or resets against an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RateType {
    /// Fixed coupon for the life of the contract.
    Fixed,
    /// Floating coupon: index rate plus a spread, subject to periodic reset.
    Float,
}

/// How a variable-rate annuity's instalment is held across a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnuityPaymentMode {
    /// Recompute the level instalment at every reset from the remaining
    /// balance and the freshly observed rate (the default).
    RepriceOnReset,
    /// Keep the instalment fixed at its original-schedule value; only the
    /// principal/interest split moves with the rate.
    FixedPayment,
}

impl Default for AnnuityPaymentMode {
    fn default() -> Self {
        AnnuityPaymentMode::RepriceOnReset
    }
}

/// The tagged sum selecting which cashflow-generation state machine a
/// position is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SourceContractType {
    /// Fixed rate, bullet (single principal repayment at maturity).
    FixedBullet,
    /// Fixed rate, level-instalment annuity.
    FixedAnnuity,
    /// Fixed rate, linear (equal principal instalments).
    FixedLinear,
    /// Fixed rate, externally supplied principal amortisation schedule.
    FixedScheduled,
    /// Fixed-rate non-maturity balance (behaviourally expanded, §NMD).
    FixedNonMaturity,
    /// Floating rate, bullet.
    VariableBullet,
    /// Floating rate, level-instalment annuity.
    VariableAnnuity,
    /// Floating rate, linear.
    VariableLinear,
    /// Floating rate, externally supplied principal amortisation schedule.
    VariableScheduled,
    /// Floating-rate non-maturity balance (behaviourally expanded, §NMD).
    VariableNonMaturity,
}

impl SourceContractType {
    /// `true` for the two non-maturity variants, which never reach the
    /// contractual cashflow generator directly — they are expanded first.
    pub fn is_non_maturity(&self) -> bool {
        matches!(
            self,
            SourceContractType::FixedNonMaturity | SourceContractType::VariableNonMaturity
        )
    }

    /// `true` if this type carries a fixed coupon for life.
    pub fn is_fixed_rate(&self) -> bool {
        matches!(
            self,
            SourceContractType::FixedBullet
                | SourceContractType::FixedAnnuity
                | SourceContractType::FixedLinear
                | SourceContractType::FixedScheduled
                | SourceContractType::FixedNonMaturity
        )
    }
}

impl fmt::Display for SourceContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceContractType::FixedBullet => "fixed_bullet",
            SourceContractType::FixedAnnuity => "fixed_annuity",
            SourceContractType::FixedLinear => "fixed_linear",
            SourceContractType::FixedScheduled => "fixed_scheduled",
            SourceContractType::FixedNonMaturity => "fixed_non_maturity",
            SourceContractType::VariableBullet => "variable_bullet",
            SourceContractType::VariableAnnuity => "variable_annuity",
            SourceContractType::VariableLinear => "variable_linear",
            SourceContractType::VariableScheduled => "variable_scheduled",
            SourceContractType::VariableNonMaturity => "variable_non_maturity",
        };
        write!(f, "{s}")
    }
}

/// One banking-book contract. Pure data; carries no behaviour of its own —
/// the cashflow generator in `alm_contracts` interprets it according to
/// `source_contract_type`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Unique identifier, stable across scenarios.
    pub contract_id: String,
    /// Contract's ISO currency code (drives which shock parameters apply).
    pub currency: String,
    /// Start date of the accrual schedule.
    pub start_date: Date,
    /// Contractual maturity date. `None` only for non-maturity types.
    pub maturity_date: Option<Date>,
    /// Outstanding notional/balance as of the analysis date. Non-negative.
    pub notional: f64,
    /// Balance-sheet side.
    pub side: Side,
    /// Fixed vs. floating coupon.
    pub rate_type: RateType,
    /// Day-count convention for interest accrual.
    pub daycount_base: DayCountConvention,
    /// Which cashflow-generation state machine applies.
    pub source_contract_type: SourceContractType,
    /// Annual coupon rate for fixed-rate contracts (decimal, e.g. 0.05).
    pub fixed_rate: Option<f64>,
    /// Projection/discount curve to resolve a floating coupon against.
    pub index_name: Option<String>,
    /// Spread added to the index rate for floating contracts (decimal).
    pub spread: Option<f64>,
    /// How often the floating coupon resets.
    pub repricing_freq_months: Option<u32>,
    /// How often interest/principal is paid.
    pub payment_freq_months: Option<u32>,
    /// Next date on or after which the floating coupon re-observes the index.
    pub next_reprice_date: Option<Date>,
    /// Floor applied to the floating coupon (decimal), if any.
    pub floor_rate: Option<f64>,
    /// Cap applied to the floating coupon (decimal), if any.
    pub cap_rate: Option<f64>,
    /// Instalment-holding behaviour for variable annuities.
    pub annuity_payment_mode: Option<AnnuityPaymentMode>,
}

/// An externally supplied principal repayment used by the `*_scheduled`
/// product types, in lieu of an amortisation formula.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledPrincipalFlow {
    /// Owning contract (matches [`Position::contract_id`]).
    pub contract_id: String,
    /// Date the principal amount repays.
    pub flow_date: Date,
    /// Principal amount repaid on `flow_date` (unsigned magnitude).
    pub principal_amount: f64,
}

/// One dated interest/principal flow produced by the cashflow generator.
///
/// Amounts are unsigned magnitudes; `side` carries the sign to apply when
/// aggregating across the balance sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cashflow {
    /// Owning contract.
    pub contract_id: String,
    /// Product-type tag, carried through for reporting.
    pub source_contract_type: SourceContractType,
    /// Fixed vs. floating, carried through for margin calibration lookups.
    pub rate_type: RateType,
    /// Balance-sheet side.
    pub side: Side,
    /// Date the flow occurs.
    pub flow_date: Date,
    /// Interest amount for the period ending on `flow_date` (unsigned).
    pub interest_amount: f64,
    /// Principal amount repaid/received on `flow_date` (unsigned).
    pub principal_amount: f64,
    /// Index used to resolve the period's rate, if floating.
    pub index_name: Option<String>,
}

impl Cashflow {
    /// Total signed amount (interest + principal) for EVE/NII aggregation.
    pub fn signed_total(&self) -> f64 {
        self.side.sign() * (self.interest_amount + self.principal_amount)
    }
}
