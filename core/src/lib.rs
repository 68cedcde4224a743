//! Core of the CSR coaching dashboard: dataset model, record generator,
//! aggregation engine, query surface and static snapshot export.

pub mod analytics;
pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod name_generator;
pub mod query;
pub mod rng;
pub mod snapshot;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use model::Dataset;
pub use query::DashboardQuery;
