use super::{mean, sims_for_csr, whole_percent};
use crate::model::{round_to, Csr, Simulation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCsr {
    #[serde(flatten)]
    pub csr: Csr,
    /// Mean total score over this CSR's simulations in the window, unrounded.
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMetrics {
    pub success_rate: u32,
    pub avg_score: f64,
    pub total_simulations: usize,
    /// `None` when no CSR has a positive mean in the window.
    #[serde(rename = "topCSR")]
    pub top_csr: Option<TopCsr>,
}

/// Team-wide KPIs. The top CSR only changes on a strictly greater mean,
/// so ties go to whoever comes first on the roster.
pub fn compute_global_metrics(sims: &[&Simulation], csrs: &[Csr]) -> GlobalMetrics {
    let successes = sims.iter().filter(|s| s.is_success()).count();
    let avg_score = round_to(mean(sims.iter().map(|s| s.total_score)), 1);

    let mut top_csr: Option<TopCsr> = None;
    let mut top_avg = 0.0;
    for csr in csrs {
        let own = sims_for_csr(sims, csr.id);
        let avg = mean(own.iter().map(|s| s.total_score));
        if avg > top_avg {
            top_avg = avg;
            top_csr = Some(TopCsr {
                csr: csr.clone(),
                avg,
            });
        }
    }

    GlobalMetrics {
        success_rate: whole_percent(successes, sims.len()),
        avg_score,
        total_simulations: sims.len(),
        top_csr,
    }
}
