//! Query surface: the read-only entry point shared by the HTTP server
//! and the static snapshot exporter.
//!
//! Each call:
//!   1. Resolves the window (malformed `days` → default window)
//!   2. Keeps simulations with `timestamp >= now - days`, newest first
//!   3. Delegates to the aggregation engine
//!
//! The dataset is held behind an Arc and never mutated.

use crate::{
    analytics::{
        compute_criteria_distribution, compute_criterion_ranking, compute_csr_ranking,
        compute_global_metrics, compute_individual_view, compute_timeline,
        CriterionDistribution, CriterionRanking, CsrRankingEntry, GlobalMetrics, IndividualView,
        TimelinePoint,
    },
    clock::Clock,
    error::{DashboardError, DashboardResult},
    model::{CriterionInfo, Csr, Dataset, Simulation},
    types::{CsrId, Days},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_WINDOW_DAYS: Days = 30;

/// Global KPIs plus the window they were computed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMetricsResponse {
    #[serde(flatten)]
    pub metrics: GlobalMetrics,
    pub date_range: Days,
}

#[derive(Clone)]
pub struct DashboardQuery {
    dataset: Arc<Dataset>,
    clock: Arc<dyn Clock>,
    default_window: Days,
}

impl DashboardQuery {
    pub fn new(dataset: Arc<Dataset>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dataset,
            clock,
            default_window: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn with_default_window(mut self, days: Days) -> Self {
        self.default_window = days;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn default_window(&self) -> Days {
        self.default_window
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Parse a raw `days` parameter. Absent, negative, or non-numeric
    /// values fall back to the default window.
    pub fn resolve_window(&self, raw: Option<&str>) -> Days {
        match raw.map(str::trim) {
            None | Some("") => self.default_window,
            Some(text) => text.parse::<Days>().unwrap_or_else(|_| {
                log::warn!(
                    "query: malformed days={text:?}, using default {}",
                    self.default_window
                );
                self.default_window
            }),
        }
    }

    /// Simulations inside the trailing window, newest first.
    pub fn window(&self, days: Days) -> Vec<&Simulation> {
        let cutoff = self.clock.cutoff(days);
        let mut sims: Vec<&Simulation> = self
            .dataset
            .simulations
            .iter()
            .filter(|s| s.timestamp >= cutoff)
            .collect();
        sims.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        log::debug!("query: window={days}d cutoff={cutoff} matched={}", sims.len());
        sims
    }

    pub fn global_metrics(&self, days: Days) -> GlobalMetricsResponse {
        let sims = self.window(days);
        GlobalMetricsResponse {
            metrics: compute_global_metrics(&sims, &self.dataset.csrs),
            date_range: days,
        }
    }

    pub fn timeline(&self, days: Days) -> Vec<TimelinePoint> {
        compute_timeline(&self.window(days))
    }

    pub fn criteria_distribution(&self, days: Days) -> Vec<CriterionDistribution> {
        compute_criteria_distribution(&self.window(days), &self.dataset.criteria)
    }

    pub fn csr_ranking(&self, days: Days) -> Vec<CsrRankingEntry> {
        compute_csr_ranking(&self.window(days), &self.dataset.csrs)
    }

    pub fn csr_profile(&self, id: CsrId, days: Days) -> DashboardResult<IndividualView> {
        let csr = self
            .dataset
            .csr(id)
            .ok_or(DashboardError::CsrNotFound { id })?;
        let sims = self.window(days);
        Ok(compute_individual_view(&sims, csr, &sims, &self.dataset.criteria))
    }

    pub fn criterion_ranking(&self, key: &str, days: Days) -> DashboardResult<CriterionRanking> {
        let criterion = self
            .dataset
            .criterion(key)
            .ok_or_else(|| DashboardError::CriterionNotFound { key: key.to_string() })?;
        Ok(compute_criterion_ranking(
            &self.window(days),
            &self.dataset.csrs,
            criterion,
        ))
    }

    pub fn csrs(&self) -> &[Csr] {
        &self.dataset.csrs
    }

    pub fn criteria(&self) -> Vec<CriterionInfo> {
        self.dataset.criteria.iter().map(CriterionInfo::from).collect()
    }
}
