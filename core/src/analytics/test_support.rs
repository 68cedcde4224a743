//! Hand-built records for the aggregation unit tests.

use crate::model::{CriteriaResult, Criterion, Csr, Difficulty, Simulation};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::BTreeMap;

pub const KEYS: [&str; 5] = ["alpha", "beta", "gamma", "delta", "epsilon"];

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 18, 0, 0).unwrap()
}

pub fn criteria() -> Vec<Criterion> {
    KEYS.iter().copied().map(Criterion::new).collect()
}

pub fn csr(id: u32, name: &str) -> Csr {
    Csr {
        id,
        name: name.into(),
        email: format!("{}@company.com", name.to_lowercase()),
        avatar: name.chars().take(2).collect::<String>().to_uppercase(),
        color: "#3b82f6".into(),
    }
}

/// A simulation where every criterion has the same result and score.
pub fn uniform(id: &str, owner: &Csr, days_ago: i64, result: CriteriaResult) -> Simulation {
    let map: BTreeMap<_, _> = KEYS.iter().map(|k| (k.to_string(), result)).collect();
    at(id, owner, days_ago, map)
}

/// A simulation with explicit per-criterion results, in `KEYS` order.
pub fn mixed(id: &str, owner: &Csr, days_ago: i64, results: [CriteriaResult; 5]) -> Simulation {
    let map: BTreeMap<_, _> = KEYS
        .iter()
        .map(|k| k.to_string())
        .zip(results)
        .collect();
    at(id, owner, days_ago, map)
}

fn at(
    id: &str,
    owner: &Csr,
    days_ago: i64,
    criteria: BTreeMap<String, CriteriaResult>,
) -> Simulation {
    Simulation::from_criteria(
        id,
        owner,
        now() - Duration::days(days_ago),
        300,
        Difficulty::Medium,
        criteria,
        3,
    )
}
