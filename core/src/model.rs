//! Dataset records: CSRs, criteria, simulations.
//!
//! Every record is created once (by the generator or by loading a
//! fixed dataset file) and never mutated afterwards.

use crate::{
    error::{DashboardError, DashboardResult},
    types::{CriterionKey, CsrId, SimulationId, SnapshotId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

// ── Roster ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Csr {
    pub id: CsrId,
    pub name: String,
    pub email: String,
    /// Short initials label, e.g. "AN".
    pub avatar: String,
    /// Display color, e.g. "#10b981".
    pub color: String,
}

// ── Criteria ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criterion {
    pub key: CriterionKey,
}

impl Criterion {
    pub fn new(key: impl Into<CriterionKey>) -> Self {
        Self { key: key.into() }
    }

    pub fn label(&self) -> String {
        format_label(&self.key)
    }
}

/// "objection_handling" → "Objection Handling".
pub fn format_label(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Key plus human label, as listed by `GET /api/criteria`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionInfo {
    pub key: CriterionKey,
    pub label: String,
}

impl From<&Criterion> for CriterionInfo {
    fn from(criterion: &Criterion) -> Self {
        Self {
            key: criterion.key.clone(),
            label: criterion.label(),
        }
    }
}

// ── Simulation ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Medium, Difficulty::High];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriteriaResult {
    pub result: Outcome,
    /// Normalized score in [0, 10]. Always 0 for `Unknown`.
    pub score_normalized: f64,
}

impl CriteriaResult {
    pub fn success(score: f64) -> Self {
        Self { result: Outcome::Success, score_normalized: score }
    }

    pub fn failure(score: f64) -> Self {
        Self { result: Outcome::Failure, score_normalized: score }
    }

    pub fn unknown() -> Self {
        Self { result: Outcome::Unknown, score_normalized: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub simulation_id: SimulationId,
    pub csr_id: CsrId,
    pub csr_name: String,
    pub timestamp: DateTime<Utc>,
    pub duration_seconds: u32,
    pub difficulty: Difficulty,
    pub total_score: f64,
    pub call_status: CallStatus,
    pub criteria: BTreeMap<CriterionKey, CriteriaResult>,
    pub criteria_passed: u32,
    pub criteria_total: u32,
}

impl Simulation {
    /// Assemble a simulation and derive its cached fields
    /// (`total_score`, `call_status`, `criteria_passed`, `criteria_total`)
    /// from the per-criterion results.
    pub fn from_criteria(
        simulation_id: impl Into<SimulationId>,
        csr: &Csr,
        timestamp: DateTime<Utc>,
        duration_seconds: u32,
        difficulty: Difficulty,
        criteria: BTreeMap<CriterionKey, CriteriaResult>,
        majority_threshold: u32,
    ) -> Self {
        let criteria_total = criteria.len() as u32;
        let criteria_passed = count_passed(&criteria);
        let total_score = if criteria.is_empty() {
            0.0
        } else {
            let sum: f64 = criteria.values().map(|c| c.score_normalized).sum();
            round_to(sum / criteria.len() as f64, 1)
        };
        let call_status = if criteria_passed >= majority_threshold {
            CallStatus::Success
        } else {
            CallStatus::Failure
        };

        Self {
            simulation_id: simulation_id.into(),
            csr_id: csr.id,
            csr_name: csr.name.clone(),
            timestamp,
            duration_seconds,
            difficulty,
            total_score,
            call_status,
            criteria,
            criteria_passed,
            criteria_total,
        }
    }

    pub fn is_success(&self) -> bool {
        self.call_status == CallStatus::Success
    }

    /// Score for one criterion; 0 when the key is absent.
    pub fn criterion_score(&self, key: &str) -> f64 {
        self.criteria.get(key).map_or(0.0, |c| c.score_normalized)
    }

    pub fn criterion_outcome(&self, key: &str) -> Option<Outcome> {
        self.criteria.get(key).map(|c| c.result)
    }

    /// Check every per-record invariant against the known criterion set.
    pub fn validate(&self, criteria: &[Criterion], majority_threshold: u32) -> DashboardResult<()> {
        let fail = |reason: String| DashboardError::InvariantViolation {
            simulation_id: self.simulation_id.clone(),
            reason,
        };

        if self.criteria.len() != criteria.len()
            || criteria.iter().any(|c| !self.criteria.contains_key(&c.key))
        {
            return Err(fail("criteria map does not match the criterion set".into()));
        }
        if self.criteria_total as usize != criteria.len() {
            return Err(fail(format!(
                "criteria_total {} != {}",
                self.criteria_total,
                criteria.len()
            )));
        }
        let passed = count_passed(&self.criteria);
        if self.criteria_passed != passed {
            return Err(fail(format!(
                "criteria_passed {} != {passed} successes",
                self.criteria_passed
            )));
        }
        let expect_success = passed >= majority_threshold;
        if self.is_success() != expect_success {
            return Err(fail(format!(
                "call_status {:?} inconsistent with {passed} passed",
                self.call_status
            )));
        }
        if self.duration_seconds == 0 {
            return Err(fail("duration_seconds must be > 0".into()));
        }
        for (key, result) in &self.criteria {
            if !(0.0..=10.0).contains(&result.score_normalized) {
                return Err(fail(format!("score for {key} outside [0, 10]")));
            }
            if result.result == Outcome::Unknown && result.score_normalized != 0.0 {
                return Err(fail(format!("unknown result for {key} carries a score")));
            }
        }
        let mean = if self.criteria.is_empty() {
            0.0
        } else {
            self.criteria.values().map(|c| c.score_normalized).sum::<f64>()
                / self.criteria.len() as f64
        };
        if (self.total_score - mean).abs() > 0.05 + f64::EPSILON {
            return Err(fail(format!(
                "total_score {} is not the mean {mean:.3} of criterion scores",
                self.total_score
            )));
        }
        Ok(())
    }
}

fn count_passed(criteria: &BTreeMap<CriterionKey, CriteriaResult>) -> u32 {
    criteria
        .values()
        .filter(|c| c.result == Outcome::Success)
        .count() as u32
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ── Dataset ──────────────────────────────────────────────────────────────────

/// The immutable in-memory snapshot every query reads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub snapshot_id: SnapshotId,
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
    pub majority_threshold: u32,
    pub csrs: Vec<Csr>,
    pub criteria: Vec<Criterion>,
    /// Sorted by timestamp, newest first.
    pub simulations: Vec<Simulation>,
}

impl Dataset {
    pub fn csr(&self, id: CsrId) -> Option<&Csr> {
        self.csrs.iter().find(|c| c.id == id)
    }

    pub fn criterion(&self, key: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.key == key)
    }

    /// Check roster/criteria uniqueness and every simulation invariant.
    pub fn validate(&self) -> DashboardResult<()> {
        let mut ids = HashSet::new();
        for csr in &self.csrs {
            if !ids.insert(csr.id) {
                return Err(DashboardError::InvalidConfig {
                    reason: format!("duplicate CSR id {}", csr.id),
                });
            }
        }
        let mut keys = HashSet::new();
        for criterion in &self.criteria {
            if !keys.insert(criterion.key.as_str()) {
                return Err(DashboardError::InvalidConfig {
                    reason: format!("duplicate criterion key {}", criterion.key),
                });
            }
        }
        let mut sim_ids = HashSet::new();
        for sim in &self.simulations {
            if !sim_ids.insert(sim.simulation_id.as_str()) {
                return Err(DashboardError::InvariantViolation {
                    simulation_id: sim.simulation_id.clone(),
                    reason: "duplicate simulation id".into(),
                });
            }
            if !ids.contains(&sim.csr_id) {
                return Err(DashboardError::InvariantViolation {
                    simulation_id: sim.simulation_id.clone(),
                    reason: format!("unknown csr_id {}", sim.csr_id),
                });
            }
            sim.validate(&self.criteria, self.majority_threshold)?;
        }
        Ok(())
    }

    /// Load a fixed dataset (the static deployment variant) and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut dataset: Dataset = serde_json::from_str(&content)?;
        dataset
            .simulations
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        dataset.validate()?;
        log::info!(
            "loaded dataset {} from {}: {} csrs, {} simulations",
            dataset.snapshot_id,
            path.as_ref().display(),
            dataset.csrs.len(),
            dataset.simulations.len()
        );
        Ok(dataset)
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> DashboardResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
