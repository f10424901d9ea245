//! Infrastructure layer
//!
//! Hardware drivers, shared node state and the embassy tasks that bind them
//! to the dashboard controllers and the telemetry sampler.

pub mod adapters;
pub mod drivers;
pub mod services;
pub mod tasks;
