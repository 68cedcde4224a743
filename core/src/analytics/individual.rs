use super::{date_label, mean, percent, sims_for_csr};
use crate::model::{round_to, Criterion, Csr, Simulation};
use crate::types::CriterionKey;
use serde::{Deserialize, Serialize};

/// Simulations plotted on the individual timeline.
pub const INDIVIDUAL_TIMELINE_POINTS: usize = 20;
/// Raw records returned for the recent-simulations table.
pub const INDIVIDUAL_RECENT_SIMULATIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualTimelinePoint {
    /// "#1" is the oldest plotted simulation.
    pub sim: String,
    pub score: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarPoint {
    pub key: CriterionKey,
    pub criterion: String,
    pub csr_score: f64,
    pub team_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualMetrics {
    pub total_simulations: usize,
    pub avg_score: f64,
    /// One decimal, unlike the whole percentages elsewhere.
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualView {
    pub csr: Csr,
    pub timeline: Vec<IndividualTimelinePoint>,
    pub radar_data: Vec<RadarPoint>,
    pub simulations: Vec<Simulation>,
    pub metrics: IndividualMetrics,
}

/// Profile bundle for one CSR.
///
/// `sims` and `all_sims` are already restricted to the window; `sims` is
/// further narrowed to `csr` here. The radar compares the CSR against the
/// whole windowed population in `all_sims`.
pub fn compute_individual_view(
    sims: &[&Simulation],
    csr: &Csr,
    all_sims: &[&Simulation],
    criteria: &[Criterion],
) -> IndividualView {
    let mut own = sims_for_csr(sims, csr.id);
    own.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let plotted = own.len().min(INDIVIDUAL_TIMELINE_POINTS);
    let timeline = own[..plotted]
        .iter()
        .rev()
        .enumerate()
        .map(|(idx, sim)| IndividualTimelinePoint {
            sim: format!("#{}", idx + 1),
            score: sim.total_score,
            date: date_label(sim.timestamp),
        })
        .collect();

    let radar_data = criteria
        .iter()
        .map(|criterion| RadarPoint {
            key: criterion.key.clone(),
            criterion: criterion.label(),
            csr_score: round_to(mean(own.iter().map(|s| s.criterion_score(&criterion.key))), 1),
            team_avg: round_to(
                mean(all_sims.iter().map(|s| s.criterion_score(&criterion.key))),
                1,
            ),
        })
        .collect();

    let successes = own.iter().filter(|s| s.is_success()).count();
    let metrics = IndividualMetrics {
        total_simulations: own.len(),
        avg_score: round_to(mean(own.iter().map(|s| s.total_score)), 1),
        success_rate: round_to(percent(successes, own.len()), 1),
    };

    IndividualView {
        csr: csr.clone(),
        timeline,
        radar_data,
        simulations: own
            .iter()
            .take(INDIVIDUAL_RECENT_SIMULATIONS)
            .map(|s| (*s).clone())
            .collect(),
        metrics,
    }
}
