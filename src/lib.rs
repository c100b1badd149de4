//! Relay Gateway Core
//!
//! In-process contracts for a configuration gateway: recursive entity
//! dependency analysis with cycle detection, an identity-aware
//! read-through/write-through entity cache, and a small property sampler
//! family for fleet telemetry.

pub mod core;
pub mod dependency;
pub mod entities;
pub mod sampler;
