use super::{mean, sims_for_csr, whole_percent};
use crate::model::{round_to, Csr, Simulation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrRankingEntry {
    #[serde(flatten)]
    pub csr: Csr,
    pub avg_score: f64,
    pub success_rate: u32,
    pub total_sims: usize,
}

/// Leaderboard by mean total score, highest first.
/// The sort is stable: equal scores keep roster order, and CSRs without
/// simulations (score 0) sink to the bottom.
pub fn compute_csr_ranking(sims: &[&Simulation], csrs: &[Csr]) -> Vec<CsrRankingEntry> {
    let mut ranking: Vec<CsrRankingEntry> = csrs
        .iter()
        .map(|csr| {
            let own = sims_for_csr(sims, csr.id);
            let successes = own.iter().filter(|s| s.is_success()).count();
            CsrRankingEntry {
                csr: csr.clone(),
                avg_score: round_to(mean(own.iter().map(|s| s.total_score)), 1),
                success_rate: whole_percent(successes, own.len()),
                total_sims: own.len(),
            }
        })
        .collect();

    ranking.sort_by(|a, b| b.avg_score.total_cmp(&a.avg_score));
    ranking
}
