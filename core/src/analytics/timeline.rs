use super::{mean, DATE_LABEL_FORMAT};
use crate::model::{round_to, Simulation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const TIMELINE_MAX_POINTS: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub date: String,
    pub avg_score: f64,
    pub count: usize,
}

/// Daily mean total score.
///
/// Buckets appear in first-seen order of the input, which the query
/// surface hands over newest-first; the bucket list is then reversed and
/// only the last `TIMELINE_MAX_POINTS` are kept, yielding the most recent
/// days oldest-to-newest.
pub fn compute_timeline(sims: &[&Simulation]) -> Vec<TimelinePoint> {
    let mut order: Vec<NaiveDate> = Vec::new();
    let mut buckets: HashMap<NaiveDate, Vec<f64>> = HashMap::new();

    for sim in sims {
        let day = sim.timestamp.date_naive();
        buckets
            .entry(day)
            .or_insert_with(|| {
                order.push(day);
                Vec::new()
            })
            .push(sim.total_score);
    }

    let mut points: Vec<TimelinePoint> = order
        .into_iter()
        .rev()
        .map(|day| {
            let scores = buckets.remove(&day).unwrap_or_default();
            TimelinePoint {
                date: day.format(DATE_LABEL_FORMAT).to_string(),
                avg_score: round_to(mean(scores.iter().copied()), 2),
                count: scores.len(),
            }
        })
        .collect();

    let skip = points.len().saturating_sub(TIMELINE_MAX_POINTS);
    points.drain(..skip);
    points
}
