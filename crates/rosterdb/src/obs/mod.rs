//! Observability: ephemeral in-process counters for store activity.
//!
//! This module never reaches into store internals; the store reports
//! through `record` at its mutation and read entrypoints.

pub(crate) mod metrics;

pub use metrics::{EventOps, EventState, report, reset};
