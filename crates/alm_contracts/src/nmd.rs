//! Non-maturity-deposit behavioural expansion (§4.5): turns a book of
//! `fixed_non_maturity` positions into synthetic cashflow records slotted
//! across the EBA core/non-core buckets, since these balances carry no
//! contractual schedule a generator could walk.
//!
//! `variable_non_maturity` positions never reach this module — per spec
//! they pass through the standard float bullet engine instead (see
//! [`crate::generators::generate_cashflows`]).

use std::collections::HashMap;

use alm_core::{
    Cashflow, Date, DayCountConvention, NmdBehaviouralParams, Position, RateType, Side,
    SourceContractType, NMD_BUCKETS,
};

const NON_CORE_OVERNIGHT_OFFSET_DAYS: i64 = 1;

struct SideAggregate {
    total_notional: f64,
    weighted_rate_numerator: f64,
}

impl SideAggregate {
    fn average_rate(&self) -> f64 {
        if self.total_notional.abs() < 1e-10 {
            0.0
        } else {
            self.weighted_rate_numerator / self.total_notional
        }
    }
}

/// Expands all `fixed_non_maturity` positions in `positions` into synthetic
/// cashflow records. Positions of any other `source_contract_type` are
/// ignored; callers route those through
/// [`crate::generators::generate_cashflows`] instead.
///
/// Aggregates notional and a notional-weighted average client rate per
/// balance-sheet side, then splits the side total into a non-core overnight
/// flow (no interest; it reprices the next day) and a core portion spread
/// across the EBA buckets named in `nmd_params.distribution_pct`.
pub fn expand_nmd_positions(
    positions: &[Position],
    nmd_params: &NmdBehaviouralParams,
    analysis_date: Date,
) -> Vec<Cashflow> {
    let mut aggregates: HashMap<Side, SideAggregate> = HashMap::new();
    for position in positions {
        if position.source_contract_type != SourceContractType::FixedNonMaturity {
            continue;
        }
        let rate = position.fixed_rate.unwrap_or(0.0);
        let entry = aggregates.entry(position.side).or_insert(SideAggregate {
            total_notional: 0.0,
            weighted_rate_numerator: 0.0,
        });
        entry.total_notional += position.notional;
        entry.weighted_rate_numerator += rate * position.notional;
    }

    let mut records = Vec::new();
    for (side, aggregate) in &aggregates {
        if aggregate.total_notional.abs() < 1e-10 {
            continue;
        }
        let average_rate = aggregate.average_rate();
        let core_fraction = nmd_params.core_fraction();
        let non_core_fraction = nmd_params.non_core_fraction();

        let non_core_notional = aggregate.total_notional * non_core_fraction;
        if non_core_notional.abs() > 1e-10 {
            records.push(Cashflow {
                contract_id: format!("NMD_{side}_noncore"),
                source_contract_type: SourceContractType::FixedNonMaturity,
                rate_type: RateType::Fixed,
                side: *side,
                flow_date: analysis_date.add_days(NON_CORE_OVERNIGHT_OFFSET_DAYS),
                interest_amount: 0.0,
                principal_amount: non_core_notional,
                index_name: None,
            });
        }

        let core_total = aggregate.total_notional * core_fraction;
        for (bucket_id, weight_pct) in &nmd_params.distribution_pct {
            if *weight_pct <= 0.0 || bucket_id == "ON" {
                continue;
            }
            let Some(bucket) = NMD_BUCKETS.iter().find(|b| b.id == bucket_id) else {
                continue;
            };
            let notional_k = core_total * (weight_pct / 100.0);
            if notional_k.abs() < 1e-10 {
                continue;
            }
            let midpoint_days = (bucket.midpoint_years * 365.25).round() as i64;
            let flow_date = analysis_date.add_days(midpoint_days);
            let yf = DayCountConvention::Actual365.year_fraction(analysis_date, flow_date);
            let interest_k = notional_k * average_rate * yf;

            records.push(Cashflow {
                contract_id: format!("NMD_{side}_core_{bucket_id}"),
                source_contract_type: SourceContractType::FixedNonMaturity,
                rate_type: RateType::Fixed,
                side: *side,
                flow_date,
                interest_amount: interest_k,
                principal_amount: notional_k,
                index_name: None,
            });
        }
    }

    records.sort_by(|a, b| (a.contract_id.clone(), a.flow_date).cmp(&(b.contract_id.clone(), b.flow_date)));
    records
}
