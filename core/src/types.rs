//! Shared primitive types used across the entire dashboard.

/// Stable roster identifier of a CSR.
pub type CsrId = u32;

/// Unique identifier of a single simulation record, e.g. `sim_17`.
pub type SimulationId = String;

/// Stable key of an evaluation criterion, e.g. `objection_handling`.
pub type CriterionKey = String;

/// Identifier of one generated (or loaded) dataset.
pub type SnapshotId = String;

/// Length of a trailing recency window, in days.
pub type Days = u32;
