//! Remote node API seam
//!
//! The actual transport to a peer node is out of scope; these traits are
//! what the samplers program against, with errors pre-classified by the
//! transport so retry policy stays in one place.

use std::time::Duration;
use thiserror::Error;

use crate::core::config::ConfigProvider;

/// Transport-classified failures from a node API call
#[derive(Debug, Error)]
pub enum NodeApiError {
    /// Connection-layer failure; the handle may be stale
    #[error("network failure: {0}")]
    Network(String),

    /// The peer does not expose this property at all
    #[error("property not supported on node: {0}")]
    Unsupported(String),

    /// The peer answered but reported an internal fault
    #[error("node fault: {0}")]
    Fault(String),
}

/// A connected handle to one peer node
pub trait NodeApi: Send {
    fn get_property(&mut self, property: &str) -> Result<String, NodeApiError>;
}

/// Constructs node API handles
pub trait NodeApiFactory: Send + Sync {
    fn create(&self, timeouts: &NodeApiTimeouts) -> Result<Box<dyn NodeApi>, NodeApiError>;
}

/// Connect/read timeouts applied to every handle, sourced from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeApiTimeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl NodeApiTimeouts {
    pub const CONNECT_KEY: &'static str = "node.api.connect.timeout.ms";
    pub const READ_KEY: &'static str = "node.api.read.timeout.ms";

    pub fn from_config(config: &dyn ConfigProvider) -> Self {
        Self {
            connect: config.duration_ms_or(Self::CONNECT_KEY, Duration::from_millis(5_000)),
            read: config.duration_ms_or(Self::READ_KEY, Duration::from_millis(30_000)),
        }
    }
}

impl Default for NodeApiTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_millis(5_000),
            read: Duration::from_millis(30_000),
        }
    }
}
