//! Fleet telemetry property samplers
//!
//! A sampler produces the current value of one named property on one
//! cluster node. Samplers for local properties read the process directly;
//! properties owned by other nodes go through a remote node API handle.
//! Failures always carry a `temporary` flag so polling loops can tell
//! "retry next cycle" apart from "stop asking this host".

pub mod factory;
pub mod named;
pub mod node_api;

pub use factory::SamplerFactory;
pub use named::NamedPropertySampler;
pub use node_api::{NodeApi, NodeApiError, NodeApiFactory, NodeApiTimeouts};

use thiserror::Error;

/// Failure to sample a property
///
/// `temporary` is the contract's core signal: `true` means the caller may
/// retry on its next polling cycle, `false` means the property cannot be
/// sampled on this host and polling should be suppressed.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SamplingError {
    pub temporary: bool,
    pub message: String,
}

impl SamplingError {
    pub fn temporary(message: impl Into<String>) -> Self {
        Self {
            temporary: true,
            message: message.into(),
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            temporary: false,
            message: message.into(),
        }
    }
}

/// Produces the current value of one property
pub trait PropertySampler: Send {
    /// The property this sampler reads
    fn property(&self) -> &str;

    /// Take one sample
    fn sample(&mut self) -> Result<String, SamplingError>;
}
