//! Remote-node property sampler with one-retry handle refresh

use std::sync::Arc;
use tracing::debug;

use crate::sampler::node_api::{NodeApi, NodeApiError, NodeApiFactory, NodeApiTimeouts};
use crate::sampler::{PropertySampler, SamplingError};

/// Samples one named property from a peer node over a cached API handle
///
/// A network-classified failure discards the cached handle and retries
/// exactly once on a freshly constructed one; a failure on the retry is
/// reported non-temporary. `Unsupported` is non-temporary immediately, a
/// node `Fault` is temporary immediately and keeps the handle.
pub struct NamedPropertySampler {
    property: String,
    factory: Arc<dyn NodeApiFactory>,
    timeouts: NodeApiTimeouts,
    handle: Option<Box<dyn NodeApi>>,
}

impl NamedPropertySampler {
    pub fn new(
        property: impl Into<String>,
        factory: Arc<dyn NodeApiFactory>,
        timeouts: NodeApiTimeouts,
    ) -> Self {
        Self {
            property: property.into(),
            factory,
            timeouts,
            handle: None,
        }
    }

    /// Cached handle, connecting on demand; a connect failure is temporary
    fn handle(&mut self) -> Result<&mut dyn NodeApi, SamplingError> {
        if self.handle.is_none() {
            let created = self
                .factory
                .create(&self.timeouts)
                .map_err(|e| SamplingError::temporary(e.to_string()))?;
            self.handle = Some(created);
        }
        match self.handle.as_deref_mut() {
            Some(handle) => Ok(handle),
            None => Err(SamplingError::temporary("node handle unavailable")),
        }
    }
}

impl PropertySampler for NamedPropertySampler {
    fn property(&self) -> &str {
        &self.property
    }

    fn sample(&mut self) -> Result<String, SamplingError> {
        let property = self.property.clone();
        let first = self.handle()?.get_property(&property);
        match first {
            Ok(value) => Ok(value),
            Err(NodeApiError::Unsupported(message)) => {
                Err(SamplingError::permanent(message))
            }
            Err(NodeApiError::Fault(message)) => Err(SamplingError::temporary(message)),
            Err(NodeApiError::Network(message)) => {
                debug!(property, %message, "network failure, retrying with fresh handle");
                // The one retry is the last word for this handle: a failed
                // reconnect counts as the second failure, so it is
                // permanent like any other post-retry error.
                self.handle = None;
                let mut fresh = self
                    .factory
                    .create(&self.timeouts)
                    .map_err(|e| SamplingError::permanent(e.to_string()))?;
                match fresh.get_property(&property) {
                    Ok(value) => {
                        self.handle = Some(fresh);
                        Ok(value)
                    }
                    Err(e) => Err(SamplingError::permanent(e.to_string())),
                }
            }
        }
    }
}
