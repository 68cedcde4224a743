//! Aggregation properties over generated data and hand-built scenarios.

use chrono::{DateTime, Duration, TimeZone, Utc};
use coachdash_core::{
    analytics::{
        compute_criteria_distribution, compute_csr_ranking, compute_global_metrics,
        compute_timeline, TIMELINE_MAX_POINTS,
    },
    config::GeneratorConfig,
    generator::generate,
    model::{CriteriaResult, Csr, Dataset, Difficulty, Simulation},
};
use std::collections::BTreeMap;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 20, 16, 0, 0).unwrap()
}

fn dataset(seed: u64) -> Dataset {
    let config = GeneratorConfig {
        seed: Some(seed),
        ..GeneratorConfig::default()
    };
    generate(&config, now()).expect("generate dataset")
}

fn csr(id: u32, name: &str) -> Csr {
    Csr {
        id,
        name: name.into(),
        email: format!("{}@company.com", name.to_lowercase()),
        avatar: name[..2].to_uppercase(),
        color: "#10b981".into(),
    }
}

fn scored(id: &str, owner: &Csr, days_ago: i64, score: f64) -> Simulation {
    let criteria: BTreeMap<_, _> = ["a", "b", "c", "d", "e"]
        .into_iter()
        .map(|k| (k.to_string(), CriteriaResult::success(score)))
        .collect();
    Simulation::from_criteria(
        id,
        owner,
        now() - Duration::days(days_ago),
        240,
        Difficulty::High,
        criteria,
        3,
    )
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn global_metrics_on_empty_window_are_zero() {
    let dataset = dataset(1);
    let metrics = compute_global_metrics(&[], &dataset.csrs);
    assert_eq!(metrics.success_rate, 0);
    assert_eq!(metrics.avg_score, 0.0);
    assert_eq!(metrics.total_simulations, 0);
    assert!(metrics.top_csr.is_none());

    let json = serde_json::to_string(&metrics).unwrap();
    assert!(!json.contains("NaN"));
    assert!(json.contains("\"topCSR\":null"), "{json}");
}

#[test]
fn two_simulations_average_to_seven() {
    let a = csr(1, "Ana");
    let s1 = scored("sim_1", &a, 1, 8.0);
    let s2 = scored("sim_2", &a, 2, 6.0);
    let metrics = compute_global_metrics(&[&s1, &s2], &[a]);
    assert_eq!(metrics.avg_score, 7.0);
    assert_eq!(format!("{:.1}", metrics.avg_score), "7.0");
}

#[test]
fn ranking_is_non_increasing_with_idle_csrs_last() {
    let mut dataset = dataset(5);
    dataset.csrs.push(csr(77, "Idle"));
    let sims: Vec<&Simulation> = dataset.simulations.iter().collect();

    let ranking = compute_csr_ranking(&sims, &dataset.csrs);
    assert_eq!(ranking.len(), dataset.csrs.len());
    assert!(ranking.windows(2).all(|w| w[0].avg_score >= w[1].avg_score));

    let idle_pos = ranking.iter().position(|r| r.csr.id == 77).unwrap();
    assert_eq!(ranking[idle_pos].avg_score, 0.0);
    assert_eq!(ranking[idle_pos].total_sims, 0);
    assert!(ranking[..idle_pos].iter().all(|r| r.avg_score > 0.0));
}

#[test]
fn timeline_is_capped_and_chronological() {
    let dataset = dataset(8);
    let sims: Vec<&Simulation> = dataset.simulations.iter().collect();

    let timeline = compute_timeline(&sims);
    assert!(timeline.len() <= TIMELINE_MAX_POINTS);
    assert_eq!(timeline.len(), TIMELINE_MAX_POINTS, "90 days of data fill every slot");

    // Labels carry no year; map them back to dates inside the data range.
    let days: Vec<_> = sims.iter().map(|s| s.timestamp.date_naive()).collect();
    let mut unique = days.clone();
    unique.dedup();
    let expected: Vec<String> = unique
        .iter()
        .take(TIMELINE_MAX_POINTS)
        .rev()
        .map(|d| d.format("%d %b").to_string())
        .collect();
    let labels: Vec<_> = timeline.iter().map(|p| p.date.clone()).collect();
    assert_eq!(labels, expected);

    let total: usize = timeline.iter().map(|p| p.count).sum();
    let recent = days.iter().filter(|d| unique[..TIMELINE_MAX_POINTS].contains(d)).count();
    assert_eq!(total, recent);
}

#[test]
fn distribution_counts_cover_every_simulation() {
    let dataset = dataset(13);
    let sims: Vec<&Simulation> = dataset.simulations.iter().collect();

    let distribution = compute_criteria_distribution(&sims, &dataset.criteria);
    assert_eq!(distribution.len(), dataset.criteria.len());
    for d in &distribution {
        assert_eq!(d.success_count + d.failure_count + d.unknown_count, sims.len());
        assert!(d.success_pct <= 100 && d.failure_pct <= 100 && d.unknown_pct <= 100);
        let sum = d.success_pct + d.failure_pct + d.unknown_pct;
        assert!((99..=101).contains(&sum), "independent rounding drifts at most 1: {sum}");
    }
    assert_eq!(distribution[0].name, "Product Knowledge");
}
