//! Aggregation engine: pure views over a time-filtered simulation list.
//!
//! Every function here:
//!   - takes simulations that the caller has already restricted to a window
//!   - never mutates its input and never fails
//!   - returns zero-valued metrics (never NaN) on an empty input
//!
//! Means are rounded to one decimal, whole percentages half away from zero.

mod criterion;
mod distribution;
mod global;
mod individual;
mod ranking;
mod timeline;

#[cfg(test)]
pub(crate) mod test_support;

pub use criterion::{compute_criterion_ranking, CriterionMetrics, CriterionRanking, CriterionRankingEntry};
pub use distribution::{compute_criteria_distribution, CriterionDistribution};
pub use global::{compute_global_metrics, GlobalMetrics, TopCsr};
pub use individual::{
    compute_individual_view, IndividualMetrics, IndividualTimelinePoint, IndividualView,
    RadarPoint, INDIVIDUAL_RECENT_SIMULATIONS, INDIVIDUAL_TIMELINE_POINTS,
};
pub use ranking::{compute_csr_ranking, CsrRankingEntry};
pub use timeline::{compute_timeline, TimelinePoint, TIMELINE_MAX_POINTS};

use crate::{model::Simulation, types::CsrId};
use chrono::{DateTime, Utc};

/// Arithmetic mean; 0 for an empty input.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// `part / total * 100`; 0 when `total` is 0.
pub(crate) fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

pub(crate) fn whole_percent(part: usize, total: usize) -> u32 {
    percent(part, total).round() as u32
}

pub(crate) fn sims_for_csr<'a>(sims: &[&'a Simulation], csr_id: CsrId) -> Vec<&'a Simulation> {
    sims.iter().copied().filter(|s| s.csr_id == csr_id).collect()
}

pub(crate) const DATE_LABEL_FORMAT: &str = "%d %b";

/// Day + short month, no year: "05 Dec".
pub fn date_label(timestamp: DateTime<Utc>) -> String {
    timestamp.format(DATE_LABEL_FORMAT).to_string()
}
