//! Accrual period grid construction shared by every maturing product type.

use alm_core::Date;

/// One accrual period: interest accrues from `start` to `end`, paid on `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    /// Accrual start date.
    pub start: Date,
    /// Accrual end date (also the payment date).
    pub end: Date,
}

/// Builds the full contractual period grid anchored at `maturity`, stepping
/// backward by `freq_months` months until the next step would reach or pass
/// `start`; the first (earliest) period absorbs any short stub, per
/// `maturity_date, maturity_date − payment_freq, …` (spec §4.4).
pub fn build_periods(start: Date, maturity: Date, freq_months: u32) -> Vec<Period> {
    assert!(freq_months > 0, "freq_months must be positive");
    let mut ends = Vec::new();
    let mut cursor = maturity;
    loop {
        ends.push(cursor);
        let prev = cursor.add_months(-(freq_months as i32));
        if prev <= start {
            break;
        }
        cursor = prev;
    }
    ends.reverse();

    let mut periods = Vec::with_capacity(ends.len());
    let mut period_start = start;
    for end in ends {
        periods.push(Period { start: period_start, end });
        period_start = end;
    }
    periods
}

/// Restricts a period grid to the portion still outstanding as of
/// `analysis_date`: periods ending on or before `analysis_date` are
/// dropped, and a period straddling `analysis_date` has its start clipped
/// forward so only the remaining accrual is valued.
pub fn future_periods(periods: &[Period], analysis_date: Date) -> Vec<Period> {
    periods
        .iter()
        .filter(|p| p.end > analysis_date)
        .map(|p| Period {
            start: p.start.max(analysis_date),
            end: p.end,
        })
        .collect()
}
