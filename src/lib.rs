//! Team resource allocation and workload planning.
//!
//! Tracks people (resources), the projects they work on, and the dated,
//! hour-estimated tasks assigned to them. Computes per-person utilization
//! over a date range, classifies availability, and rolls the visible team
//! up into dashboard metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Resource`, `Task`, `Project`, `Caller`,
//!   `DateRange`
//! - **`engine`**: Visibility, filtering, utilization, team metrics, sorting
//! - **`mutation`**: Pure reducers for user actions (`Action`, `apply`)
//! - **`import`**: Bulk CSV-like assignment import with name resolution
//! - **`validation`**: Integrity checks for stored collections
//! - **`storage`**: `Store` trait, JSON file store, seed data
//! - **`analysis`**: `Analyzer` trait with placeholder fallbacks
//! - **`planner`**: Single-writer holder tying store, reducers and engine
//! - **`config`**: TOML-backed thresholds and import defaults
//!
//! # Architecture
//!
//! The engine and reducers are pure and synchronous: collections go in by
//! reference, new collections come out. Only `planner` holds state, and
//! only `storage` and `config` perform I/O.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod import;
pub mod models;
pub mod mutation;
pub mod planner;
pub mod storage;
pub mod validation;

pub use error::{Error, Result};
