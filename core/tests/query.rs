//! Query surface: window filtering, not-found handling, empty windows.

use chrono::{DateTime, Duration, TimeZone, Utc};
use coachdash_core::{
    model::{CriteriaResult, Criterion, Csr, Dataset, Difficulty, Simulation},
    DashboardError, DashboardQuery, FixedClock,
};
use std::collections::BTreeMap;
use std::sync::Arc;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 10, 9, 0, 0).unwrap()
}

fn csr(id: u32, name: &str) -> Csr {
    Csr {
        id,
        name: name.into(),
        email: format!("{}@company.com", name.to_lowercase()),
        avatar: name[..2].to_uppercase(),
        color: "#f59e0b".into(),
    }
}

fn keys() -> Vec<Criterion> {
    ["product_knowledge", "persuasion", "personalization"]
        .into_iter()
        .map(Criterion::new)
        .collect()
}

fn sim(id: &str, owner: &Csr, days_ago: i64, score: f64, success: bool) -> Simulation {
    let result = if success {
        CriteriaResult::success(score)
    } else {
        CriteriaResult::failure(score)
    };
    let criteria: BTreeMap<_, _> = keys().into_iter().map(|c| (c.key, result)).collect();
    Simulation::from_criteria(
        id,
        owner,
        now() - Duration::days(days_ago),
        200,
        Difficulty::Low,
        criteria,
        2,
    )
}

/// Two CSRs, all simulations between 10 and 40 days old, oldest first.
fn query() -> DashboardQuery {
    let ana = csr(1, "Ana");
    let bo = csr(2, "Bo");
    let simulations = vec![
        sim("sim_1", &ana, 40, 9.0, true),
        sim("sim_2", &bo, 25, 4.0, false),
        sim("sim_3", &ana, 20, 8.0, true),
        sim("sim_4", &bo, 10, 6.0, true),
    ];
    let dataset = Dataset {
        snapshot_id: "fixture".into(),
        seed: 0,
        generated_at: now(),
        majority_threshold: 2,
        csrs: vec![ana, bo],
        criteria: keys(),
        simulations,
    };
    dataset.validate().expect("fixture is valid");
    DashboardQuery::new(Arc::new(dataset), Arc::new(FixedClock::new(now())))
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn window_filters_and_resorts_newest_first() {
    let q = query();
    let ids: Vec<_> = q.window(30).iter().map(|s| s.simulation_id.clone()).collect();
    assert_eq!(ids, vec!["sim_4", "sim_3", "sim_2"]);
    assert_eq!(q.window(90).len(), 4);
}

#[test]
fn cutoff_is_inclusive() {
    let q = query();
    assert_eq!(q.window(10).len(), 1, "a record exactly `days` old is inside the window");
}

#[test]
fn empty_window_profile_is_zero_not_nan() {
    let q = query();
    let view = q.csr_profile(1, 7).expect("csr exists");
    assert_eq!(view.metrics.total_simulations, 0);
    assert_eq!(view.metrics.avg_score, 0.0);
    assert_eq!(view.metrics.success_rate, 0.0);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["metrics"]["avgScore"], 0.0);
    assert_eq!(json["metrics"]["successRate"], 0.0);
}

#[test]
fn empty_window_global_metrics_are_zero() {
    let q = query();
    let global = q.global_metrics(7);
    assert_eq!(global.date_range, 7);
    assert_eq!(global.metrics.total_simulations, 0);
    assert_eq!(global.metrics.avg_score, 0.0);
    assert_eq!(global.metrics.success_rate, 0);
    assert!(global.metrics.top_csr.is_none());
    assert!(q.timeline(7).is_empty());
}

#[test]
fn nonexistent_csr_is_not_found() {
    let q = query();
    match q.csr_profile(999, 30) {
        Err(DashboardError::CsrNotFound { id }) => assert_eq!(id, 999),
        other => panic!("expected CsrNotFound, got {other:?}"),
    }
}

#[test]
fn nonexistent_criterion_is_not_found() {
    let q = query();
    let err = q.criterion_ranking("empathy", 30).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Criterion not found: empathy");
}

#[test]
fn views_follow_the_window() {
    let q = query();

    let global = q.global_metrics(30);
    assert_eq!(global.metrics.total_simulations, 3);
    assert_eq!(global.metrics.avg_score, 6.0);
    assert_eq!(global.metrics.success_rate, 67);
    assert_eq!(global.metrics.top_csr.as_ref().unwrap().csr.id, 1);

    let ranking = q.csr_ranking(30);
    assert_eq!(ranking[0].csr.id, 1);
    assert_eq!(ranking[0].avg_score, 8.0);
    assert_eq!(ranking[1].avg_score, 5.0);
    assert_eq!(ranking[1].success_rate, 50);

    let by_criterion = q.criterion_ranking("persuasion", 90).unwrap();
    assert_eq!(by_criterion.ranking[0].score, 8.5);
    assert_eq!(by_criterion.ranking[1].score, 5.0);
    assert_eq!(by_criterion.team_avg, 6.8);
    assert_eq!(by_criterion.metrics.success_rate, 75);
    assert_eq!(by_criterion.metrics.criterion, "Persuasion");

    let profile = q.csr_profile(2, 90).unwrap();
    assert_eq!(profile.timeline.len(), 2);
    assert_eq!(profile.timeline[0].score, 4.0);
    assert_eq!(profile.timeline[1].sim, "#2");
    assert_eq!(profile.simulations[0].simulation_id, "sim_4");
}
