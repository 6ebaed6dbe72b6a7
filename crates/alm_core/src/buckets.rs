//! Regulatory EVE maturity buckets and EBA non-maturity-deposit buckets.
//!
//! Both grids are carried as compiled-in constant tables rather than
//! configuration, per the engine's "read-only set of constants" design:
//! they are regulatory fixtures, not something a caller tunes per run.

use std::fmt;

/// One EVE regulatory maturity bucket: `(start_years, end_years]`, inclusive
/// of its upper bound, except the first bucket (`start_years == 0.0`) which
/// is also inclusive of `0`. `end_years = None` marks the open-ended tail
/// bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EveBucket {
    /// Bucket label, e.g. `"0-1M"`, `"20Y+"`.
    pub name: &'static str,
    /// Lower bound, in years; inclusive only when it is `0.0`.
    pub start_years: f64,
    /// Inclusive upper bound, in years; `None` for the open-ended tail.
    pub end_years: Option<f64>,
}

impl EveBucket {
    /// Whether `t_years` falls within this bucket.
    ///
    /// The upper bound is inclusive (spec §4.6: "inclusive of end"). The
    /// lower bound is exclusive, except for the bucket starting at `0.0`,
    /// which is inclusive there too — this is what makes a flow landing
    /// exactly on a shared boundary between two contiguous buckets fall
    /// into the lower one, matching the original's `t <= end_years` check.
    pub fn contains(&self, t_years: f64) -> bool {
        let above_lower_bound = if self.start_years == 0.0 {
            t_years >= self.start_years
        } else {
            t_years > self.start_years
        };
        above_lower_bound
            && match self.end_years {
                Some(end) => t_years <= end,
                None => true,
            }
    }

    /// The representative year-fraction used when discounting a bucketed
    /// aggregate, rather than every individual flow. For the open-ended
    /// tail bucket this is `start_years + open_ended_years / 2`.
    pub fn representative_t(&self, open_ended_years: f64) -> f64 {
        match self.end_years {
            Some(end) => (self.start_years + end) / 2.0,
            None => self.start_years + open_ended_years / 2.0,
        }
    }
}

impl fmt::Display for EveBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The default 18-bucket EVE regulatory grid (BCBS-368 / EBA-GL-2022/14
/// style maturity ladder), open-ended beyond 20 years.
pub const DEFAULT_EVE_BUCKETS: &[EveBucket] = &[
    EveBucket { name: "0-1M", start_years: 0.0, end_years: Some(1.0 / 12.0) },
    EveBucket { name: "1-3M", start_years: 1.0 / 12.0, end_years: Some(3.0 / 12.0) },
    EveBucket { name: "3-6M", start_years: 3.0 / 12.0, end_years: Some(6.0 / 12.0) },
    EveBucket { name: "6-9M", start_years: 6.0 / 12.0, end_years: Some(9.0 / 12.0) },
    EveBucket { name: "9-12M", start_years: 9.0 / 12.0, end_years: Some(1.0) },
    EveBucket { name: "1-1.5Y", start_years: 1.0, end_years: Some(1.5) },
    EveBucket { name: "1.5-2Y", start_years: 1.5, end_years: Some(2.0) },
    EveBucket { name: "2-3Y", start_years: 2.0, end_years: Some(3.0) },
    EveBucket { name: "3-4Y", start_years: 3.0, end_years: Some(4.0) },
    EveBucket { name: "4-5Y", start_years: 4.0, end_years: Some(5.0) },
    EveBucket { name: "5-6Y", start_years: 5.0, end_years: Some(6.0) },
    EveBucket { name: "6-7Y", start_years: 6.0, end_years: Some(7.0) },
    EveBucket { name: "7-8Y", start_years: 7.0, end_years: Some(8.0) },
    EveBucket { name: "8-9Y", start_years: 8.0, end_years: Some(9.0) },
    EveBucket { name: "9-10Y", start_years: 9.0, end_years: Some(10.0) },
    EveBucket { name: "10-15Y", start_years: 10.0, end_years: Some(15.0) },
    EveBucket { name: "15-20Y", start_years: 15.0, end_years: Some(20.0) },
    EveBucket { name: "20Y+", start_years: 20.0, end_years: None },
];

/// Convention used for the open-ended tail bucket's representative point
/// (`start + 10/2` years, i.e. 25y for the `20Y+` bucket).
pub const DEFAULT_OPEN_ENDED_YEARS: f64 = 10.0;

/// One EBA non-maturity-deposit behavioural bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NmdBucket {
    /// Stable bucket identifier, used in synthetic contract IDs.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Midpoint tenor, in years, used to compute the synthetic flow date.
    pub midpoint_years: f64,
}

/// The 19 EBA-aligned non-maturity-deposit buckets, carried verbatim with
/// their exact midpoints (`ON = 0.003y` through `20Y+ = 25.0y`).
pub const NMD_BUCKETS: &[NmdBucket] = &[
    NmdBucket { id: "ON", label: "Overnight", midpoint_years: 0.003 },
    NmdBucket { id: "ON_1M", label: "O/N - 1M", midpoint_years: 0.042 },
    NmdBucket { id: "1M_3M", label: "1M - 3M", midpoint_years: 0.167 },
    NmdBucket { id: "3M_6M", label: "3M - 6M", midpoint_years: 0.375 },
    NmdBucket { id: "6M_9M", label: "6M - 9M", midpoint_years: 0.625 },
    NmdBucket { id: "9M_1Y", label: "9M - 1Y", midpoint_years: 0.875 },
    NmdBucket { id: "1Y_1H", label: "1Y - 18M", midpoint_years: 1.25 },
    NmdBucket { id: "1H_2Y", label: "18M - 2Y", midpoint_years: 1.75 },
    NmdBucket { id: "2Y_3Y", label: "2Y - 3Y", midpoint_years: 2.5 },
    NmdBucket { id: "3Y_4Y", label: "3Y - 4Y", midpoint_years: 3.5 },
    NmdBucket { id: "4Y_5Y", label: "4Y - 5Y", midpoint_years: 4.5 },
    NmdBucket { id: "5Y_6Y", label: "5Y - 6Y", midpoint_years: 5.5 },
    NmdBucket { id: "6Y_7Y", label: "6Y - 7Y", midpoint_years: 6.5 },
    NmdBucket { id: "7Y_8Y", label: "7Y - 8Y", midpoint_years: 7.5 },
    NmdBucket { id: "8Y_9Y", label: "8Y - 9Y", midpoint_years: 8.5 },
    NmdBucket { id: "9Y_10Y", label: "9Y - 10Y", midpoint_years: 9.5 },
    NmdBucket { id: "10Y_15Y", label: "10Y - 15Y", midpoint_years: 12.5 },
    NmdBucket { id: "15Y_20Y", label: "15Y - 20Y", midpoint_years: 17.5 },
    NmdBucket { id: "20Y_PLUS", label: "20Y+", midpoint_years: 25.0 },
];

/// Looks up an NMD bucket by its stable `id`.
pub fn nmd_bucket_by_id(id: &str) -> Option<&'static NmdBucket> {
    NMD_BUCKETS.iter().find(|b| b.id == id)
}
