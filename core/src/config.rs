use crate::{
    error::{DashboardError, DashboardResult},
    types::{CriterionKey, CsrId, Days},
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

// ── Roster profiles ─────────────────────────────────────────────────────────

/// One explicitly configured CSR and the bias applied to their outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrProfile {
    pub id: CsrId,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub color: String,
    /// Scales the neutral 0.5 per-criterion success probability.
    pub skill_multiplier: f64,
    /// Flat per-criterion probability; replaces `0.5 * skill_multiplier`.
    #[serde(default)]
    pub base_probability: Option<f64>,
    /// Per-criterion probability, highest precedence.
    #[serde(default)]
    pub criterion_probability: HashMap<CriterionKey, f64>,
}

impl CsrProfile {
    /// Success probability for one criterion before the recency bonus.
    pub fn probability_for(&self, criterion: &str) -> f64 {
        self.criterion_probability
            .get(criterion)
            .copied()
            .or(self.base_probability)
            .unwrap_or(0.5 * self.skill_multiplier)
    }
}

// ── Generator ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Master seed. `None` derives one from the wall clock.
    #[serde(default)]
    pub seed: Option<u64>,
    pub window_days: Days,
    pub sims_per_csr_min: u64,
    /// Exclusive.
    pub sims_per_csr_max: u64,
    pub unknown_probability: f64,
    /// Success-probability bonus for a simulation recorded right now,
    /// decaying linearly to zero at the far edge of the window.
    pub recency_bonus: f64,
    pub majority_threshold: u32,
    pub duration_seconds_min: u32,
    /// Exclusive.
    pub duration_seconds_max: u32,
    pub success_score_range: (f64, f64),
    pub failure_score_range: (f64, f64),
    pub criteria: Vec<CriterionKey>,
    pub roster: Vec<CsrProfile>,
    /// Extra CSRs drawn by the name generator after the explicit roster.
    #[serde(default)]
    pub generated_csrs: usize,
}

impl GeneratorConfig {
    pub fn validate(&self) -> DashboardResult<()> {
        let invalid = |reason: String| Err(DashboardError::InvalidConfig { reason });

        if self.criteria.is_empty() {
            return invalid("at least one criterion is required".into());
        }
        let mut keys = HashSet::new();
        for key in &self.criteria {
            if key.is_empty() || !keys.insert(key.as_str()) {
                return invalid(format!("empty or duplicate criterion key '{key}'"));
            }
        }
        if self.majority_threshold as usize > self.criteria.len() {
            return invalid(format!(
                "majority_threshold {} exceeds {} criteria",
                self.majority_threshold,
                self.criteria.len()
            ));
        }
        if self.window_days == 0 {
            return invalid("window_days must be > 0".into());
        }
        if self.sims_per_csr_min >= self.sims_per_csr_max {
            return invalid("sims_per_csr_min must be < sims_per_csr_max".into());
        }
        if self.duration_seconds_min == 0 || self.duration_seconds_min >= self.duration_seconds_max
        {
            return invalid("duration range must be non-empty and start above 0".into());
        }
        for (name, (lo, hi)) in [
            ("success_score_range", self.success_score_range),
            ("failure_score_range", self.failure_score_range),
        ] {
            if !(0.0..=10.0).contains(&lo) || !(0.0..=10.0).contains(&hi) || lo >= hi {
                return invalid(format!("{name} must be a non-empty range inside [0, 10]"));
            }
        }
        for (name, p) in [
            ("unknown_probability", self.unknown_probability),
            ("recency_bonus", self.recency_bonus),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} must be in [0, 1]"));
            }
        }
        let mut ids = HashSet::new();
        for profile in &self.roster {
            if !ids.insert(profile.id) {
                return invalid(format!("duplicate CSR id {}", profile.id));
            }
            if profile.skill_multiplier < 0.0 {
                return invalid(format!("CSR {} has a negative skill_multiplier", profile.id));
            }
        }
        if self.roster.is_empty() && self.generated_csrs == 0 {
            return invalid("the roster is empty".into());
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let criteria: Vec<CriterionKey> = [
            "product_knowledge",
            "confidence_security",
            "objection_handling",
            "persuasion",
            "personalization",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let profile = |id: CsrId, name: &str, handle: &str, avatar: &str, color: &str, skill: f64| {
            CsrProfile {
                id,
                name: name.into(),
                email: format!("{handle}@company.com"),
                avatar: avatar.into(),
                color: color.into(),
                skill_multiplier: skill,
                base_probability: None,
                criterion_probability: HashMap::new(),
            }
        };

        let mut star = profile(1, "Lucia Fernandez", "lucia.fernandez", "LF", "#10b981", 1.3);
        star.base_probability = Some(0.85);

        // Strong on rapport, weak on product facts.
        let mut uneven = profile(3, "Tomas", "tomas", "TO", "#8b5cf6", 0.8);
        uneven.base_probability = Some(0.60);
        uneven.criterion_probability = [
            ("confidence_security".to_string(), 0.75),
            ("persuasion".to_string(), 0.75),
            ("product_knowledge".to_string(), 0.45),
        ]
        .into();

        let mut struggling = profile(6, "Diego Morales", "diego.morales", "DM", "#6b7280", 0.6);
        struggling.base_probability = Some(0.30);

        Self {
            seed: None,
            window_days: 90,
            sims_per_csr_min: 30,
            sims_per_csr_max: 50,
            unknown_probability: 0.03,
            recency_bonus: 0.20,
            majority_threshold: 3,
            duration_seconds_min: 180,
            duration_seconds_max: 480,
            success_score_range: (7.0, 10.0),
            failure_score_range: (3.0, 6.0),
            criteria,
            roster: vec![
                star,
                profile(2, "Marcos Vidal", "marcos.vidal", "MV", "#3b82f6", 0.9),
                uneven,
                profile(4, "Elena Castro", "elena.castro", "EC", "#f59e0b", 0.7),
                profile(5, "Raul Ortega", "raul.ortega", "RO", "#ef4444", 0.6),
                struggling,
            ],
            generated_csrs: 0,
        }
    }
}

// ── Server ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub default_window_days: Days,
    /// Windows evaluated by the static snapshot exporter.
    pub export_windows: Vec<Days>,
}

impl ServerConfig {
    pub fn validate(&self) -> DashboardResult<()> {
        if self.bind_addr.trim().is_empty() {
            return Err(DashboardError::InvalidConfig {
                reason: "bind_addr is empty".into(),
            });
        }
        if self.export_windows.is_empty() {
            return Err(DashboardError::InvalidConfig {
                reason: "export_windows is empty".into(),
            });
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".into(),
            default_window_days: 30,
            export_windows: vec![7, 30, 60, 90],
        }
    }
}

// ── Top level ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl DashboardConfig {
    /// Load from a JSON file. Missing sections fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        self.generator.validate()?;
        self.server.validate()
    }
}
