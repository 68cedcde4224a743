use super::whole_percent;
use crate::model::{Criterion, Outcome, Simulation};
use crate::types::CriterionKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionDistribution {
    pub key: CriterionKey,
    pub name: String,
    pub success_pct: u32,
    pub failure_pct: u32,
    pub unknown_pct: u32,
    pub success_count: usize,
    pub failure_count: usize,
    pub unknown_count: usize,
}

/// Share of success / failure / unknown results per criterion.
/// Each percentage is rounded on its own; the three need not sum to 100.
pub fn compute_criteria_distribution(
    sims: &[&Simulation],
    criteria: &[Criterion],
) -> Vec<CriterionDistribution> {
    criteria
        .iter()
        .map(|criterion| {
            let (mut success, mut failure, mut unknown) = (0, 0, 0);
            for sim in sims {
                match sim.criterion_outcome(&criterion.key) {
                    Some(Outcome::Success) => success += 1,
                    Some(Outcome::Failure) => failure += 1,
                    // A missing entry is reported as unknown.
                    Some(Outcome::Unknown) | None => unknown += 1,
                }
            }
            let total = sims.len();
            CriterionDistribution {
                key: criterion.key.clone(),
                name: criterion.label(),
                success_pct: whole_percent(success, total),
                failure_pct: whole_percent(failure, total),
                unknown_pct: whole_percent(unknown, total),
                success_count: success,
                failure_count: failure,
                unknown_count: unknown,
            }
        })
        .collect()
}
