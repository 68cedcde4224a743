//! Record generator: builds the synthetic dataset served by the dashboard.
//!
//! For each CSR on the roster:
//!   1. Draw a simulation count in [sims_per_csr_min, sims_per_csr_max)
//!   2. Spread timestamps uniformly over the trailing window
//!   3. Roll each criterion independently against the CSR's probability
//!      plus a recency bonus that grows toward the present
//!   4. Independently mark a criterion unknown with `unknown_probability`
//!
//! Runs once per process. The resulting Dataset is never mutated.

use crate::{
    config::{CsrProfile, GeneratorConfig},
    error::DashboardResult,
    model::{round_to, CriteriaResult, Criterion, Csr, Dataset, Difficulty, Simulation},
    name_generator::NameGenerator,
    rng::{RngBank, StreamRng, StreamSlot},
    types::CriterionKey,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

const SECONDS_PER_DAY: u64 = 86_400;

/// Generate a dataset whose window ends at `now`.
pub fn generate(config: &GeneratorConfig, now: DateTime<Utc>) -> DashboardResult<Dataset> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(seed_from_clock);
    let bank = RngBank::new(seed);
    let mut roster_rng = bank.for_stream(StreamSlot::Roster);
    let mut sim_rng = bank.for_stream(StreamSlot::Simulations);
    let mut identity_rng = bank.for_stream(StreamSlot::Identity);

    let profiles = build_roster(config, &mut roster_rng);
    let criteria: Vec<Criterion> = config.criteria.iter().map(Criterion::new).collect();

    let mut simulations = Vec::new();
    let mut next_id: u64 = 1;
    for profile in &profiles {
        let csr = csr_from_profile(profile);
        let count = sim_rng.range_u64(config.sims_per_csr_min, config.sims_per_csr_max);
        for _ in 0..count {
            let sim = generate_simulation(config, profile, &csr, next_id, now, &mut sim_rng);
            simulations.push(sim);
            next_id += 1;
        }
        log::debug!(
            "generator: csr={} ({}) simulations={count} skill={:.2}",
            csr.id,
            csr.name,
            profile.skill_multiplier
        );
    }

    // Newest first. Stable, so equal timestamps keep generation order.
    simulations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let snapshot_id = uuid::Builder::from_random_bytes(identity_rng.next_bytes_16())
        .into_uuid()
        .to_string();

    log::info!(
        "generated dataset {snapshot_id}: seed={seed} csrs={} simulations={} window={}d",
        profiles.len(),
        simulations.len(),
        config.window_days
    );

    Ok(Dataset {
        snapshot_id,
        seed,
        generated_at: now,
        majority_threshold: config.majority_threshold,
        csrs: profiles.iter().map(csr_from_profile).collect(),
        criteria,
        simulations,
    })
}

/// Explicit roster followed by `generated_csrs` drawn identities.
fn build_roster(config: &GeneratorConfig, rng: &mut StreamRng) -> Vec<CsrProfile> {
    let mut profiles = config.roster.clone();
    let mut next_id = profiles.iter().map(|p| p.id).max().unwrap_or(0) + 1;

    for _ in 0..config.generated_csrs {
        let identity = NameGenerator::generate_identity(rng);
        profiles.push(CsrProfile {
            id: next_id,
            name: identity.name,
            email: identity.email,
            avatar: identity.avatar,
            color: identity.color,
            skill_multiplier: rng.range_f64(0.6, 1.4),
            base_probability: None,
            criterion_probability: Default::default(),
        });
        next_id += 1;
    }
    profiles
}

fn csr_from_profile(profile: &CsrProfile) -> Csr {
    Csr {
        id: profile.id,
        name: profile.name.clone(),
        email: profile.email.clone(),
        avatar: profile.avatar.clone(),
        color: profile.color.clone(),
    }
}

fn generate_simulation(
    config: &GeneratorConfig,
    profile: &CsrProfile,
    csr: &Csr,
    id: u64,
    now: DateTime<Utc>,
    rng: &mut StreamRng,
) -> Simulation {
    let window_seconds = u64::from(config.window_days) * SECONDS_PER_DAY;
    let offset = rng.next_u64_below(window_seconds);
    let timestamp = now - Duration::seconds(offset as i64);

    let days_ago = offset as f64 / SECONDS_PER_DAY as f64;
    let window = f64::from(config.window_days);
    let bonus = (window - days_ago) / window * config.recency_bonus;

    let criteria: BTreeMap<CriterionKey, CriteriaResult> = config
        .criteria
        .iter()
        .map(|key| {
            let probability = profile.probability_for(key) + bonus;
            let is_success = rng.chance(probability);
            let is_unknown = rng.chance(config.unknown_probability);
            let result = if is_unknown {
                CriteriaResult::unknown()
            } else if is_success {
                let (lo, hi) = config.success_score_range;
                CriteriaResult::success(round_to(rng.range_f64(lo, hi), 2))
            } else {
                let (lo, hi) = config.failure_score_range;
                CriteriaResult::failure(round_to(rng.range_f64(lo, hi), 2))
            };
            (key.clone(), result)
        })
        .collect();

    let duration = rng.range_u32(config.duration_seconds_min, config.duration_seconds_max);
    let difficulty = rng
        .pick(&Difficulty::ALL)
        .copied()
        .unwrap_or(Difficulty::Medium);

    Simulation::from_criteria(
        format!("sim_{id}"),
        csr,
        timestamp,
        duration,
        difficulty,
        criteria,
        config.majority_threshold,
    )
}

fn seed_from_clock() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn generated_csrs_extend_the_roster() {
        let config = GeneratorConfig {
            seed: Some(5),
            generated_csrs: 3,
            ..GeneratorConfig::default()
        };
        let dataset = generate(&config, now()).unwrap();
        assert_eq!(dataset.csrs.len(), 9);
        let ids: Vec<_> = dataset.csrs.iter().map(|c| c.id).collect();
        assert_eq!(&ids[6..], &[7, 8, 9]);
    }

    #[test]
    fn unknown_probability_one_zeroes_every_score() {
        let config = GeneratorConfig {
            seed: Some(11),
            unknown_probability: 1.0,
            ..GeneratorConfig::default()
        };
        let dataset = generate(&config, now()).unwrap();
        for sim in &dataset.simulations {
            assert_eq!(sim.total_score, 0.0);
            assert_eq!(sim.criteria_passed, 0);
            assert!(!sim.is_success());
        }
    }
}
