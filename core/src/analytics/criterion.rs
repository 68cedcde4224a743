use super::{mean, sims_for_csr, whole_percent};
use crate::model::{round_to, Criterion, Csr, Outcome, Simulation};
use crate::types::CsrId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionRankingEntry {
    pub id: CsrId,
    pub name: String,
    pub color: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionMetrics {
    /// Whole percentage of `success` results across the window.
    pub success_rate: u32,
    pub total_evaluations: usize,
    pub top_performer: Option<CriterionRankingEntry>,
    /// Human label of the criterion.
    pub criterion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionRanking {
    pub ranking: Vec<CriterionRankingEntry>,
    pub team_avg: f64,
    pub metrics: CriterionMetrics,
}

/// Per-CSR mean score on one criterion, highest first.
///
/// `team_avg` is the mean of the (rounded) per-CSR scores, so every CSR
/// weighs the same regardless of how many simulations they ran.
pub fn compute_criterion_ranking(
    sims: &[&Simulation],
    csrs: &[Csr],
    criterion: &Criterion,
) -> CriterionRanking {
    let key = criterion.key.as_str();

    let mut ranking: Vec<CriterionRankingEntry> = csrs
        .iter()
        .map(|csr| {
            let own = sims_for_csr(sims, csr.id);
            CriterionRankingEntry {
                id: csr.id,
                name: csr.name.clone(),
                color: csr.color.clone(),
                score: round_to(mean(own.iter().map(|s| s.criterion_score(key))), 1),
            }
        })
        .collect();
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));

    let team_avg = round_to(mean(ranking.iter().map(|r| r.score)), 1);

    let successes = sims
        .iter()
        .filter(|s| s.criterion_outcome(key) == Some(Outcome::Success))
        .count();


    CriterionRanking {
        metrics: CriterionMetrics {
            success_rate: whole_percent(successes, sims.len()),
            total_evaluations: sims.len(),
            top_performer: ranking.first().cloned(),
            criterion: criterion.label(),
        },
        ranking,
        team_avg,
    }
}
