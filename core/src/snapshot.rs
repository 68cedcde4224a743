//! Static snapshot export: every dashboard view, precomputed.
//!
//! A snapshot evaluates the query surface once per export window and
//! bundles the results with the roster and criteria list, so a static
//! deployment can render the dashboard without a backend.

use crate::{
    analytics::{
        CriterionDistribution, CriterionRanking, CsrRankingEntry, IndividualView, TimelinePoint,
    },
    error::DashboardResult,
    model::{CriterionInfo, Csr, Simulation},
    query::{DashboardQuery, GlobalMetricsResponse},
    types::{CriterionKey, CsrId, Days, SnapshotId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// All views for one trailing window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowViews {
    pub days: Days,
    pub global: GlobalMetricsResponse,
    pub timeline: Vec<TimelinePoint>,
    pub criteria_distribution: Vec<CriterionDistribution>,
    pub csr_ranking: Vec<CsrRankingEntry>,
    pub profiles: BTreeMap<CsrId, IndividualView>,
    pub criterion_rankings: BTreeMap<CriterionKey, CriterionRanking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticSnapshot {
    pub snapshot_id: SnapshotId,
    pub generated_at: DateTime<Utc>,
    pub exported_at: DateTime<Utc>,
    pub default_window: Days,
    pub csrs: Vec<Csr>,
    pub criteria: Vec<CriterionInfo>,
    pub windows: Vec<WindowViews>,
    /// Raw records, only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulations: Option<Vec<Simulation>>,
}

impl StaticSnapshot {
    pub fn build(query: &DashboardQuery, windows: &[Days], include_simulations: bool) -> DashboardResult<Self> {
        let dataset = query.dataset();
        let mut views = Vec::with_capacity(windows.len());

        for &days in windows {
            let mut profiles = BTreeMap::new();
            for csr in &dataset.csrs {
                profiles.insert(csr.id, query.csr_profile(csr.id, days)?);
            }
            let mut criterion_rankings = BTreeMap::new();
            for criterion in &dataset.criteria {
                criterion_rankings.insert(
                    criterion.key.clone(),
                    query.criterion_ranking(&criterion.key, days)?,
                );
            }
            views.push(WindowViews {
                days,
                global: query.global_metrics(days),
                timeline: query.timeline(days),
                criteria_distribution: query.criteria_distribution(days),
                csr_ranking: query.csr_ranking(days),
                profiles,
                criterion_rankings,
            });
        }

        log::info!(
            "snapshot {}: {} windows, {} csrs, {} criteria",
            dataset.snapshot_id,
            views.len(),
            dataset.csrs.len(),
            dataset.criteria.len()
        );

        Ok(Self {
            snapshot_id: dataset.snapshot_id.clone(),
            generated_at: dataset.generated_at,
            exported_at: query.now(),
            default_window: query.default_window(),
            csrs: dataset.csrs.clone(),
            criteria: query.criteria(),
            windows: views,
            simulations: include_simulations.then(|| dataset.simulations.clone()),
        })
    }

    pub fn window(&self, days: Days) -> Option<&WindowViews> {
        self.windows.iter().find(|w| w.days == days)
    }

    pub fn to_json(&self) -> DashboardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> DashboardResult<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("snapshot {} written to {}", self.snapshot_id, path.as_ref().display());
        Ok(())
    }
}
