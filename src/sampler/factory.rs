//! Sampler construction with capability dispatch

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::core::config::ConfigProvider;
use crate::sampler::named::NamedPropertySampler;
use crate::sampler::node_api::{NodeApiFactory, NodeApiTimeouts};
use crate::sampler::PropertySampler;

type SamplerConstructor = Box<dyn Fn(&str) -> Box<dyn PropertySampler> + Send + Sync>;

/// Builds the right sampler for a property
///
/// Properties with a registered local constructor are sampled in-process;
/// everything else is treated as a remote-node property and handed to a
/// `NamedPropertySampler` sharing one node API factory and one set of
/// configured timeouts.
pub struct SamplerFactory {
    local: HashMap<String, SamplerConstructor>,
    node_factory: Arc<dyn NodeApiFactory>,
    timeouts: NodeApiTimeouts,
}

impl SamplerFactory {
    pub fn new(node_factory: Arc<dyn NodeApiFactory>, config: &dyn ConfigProvider) -> Self {
        Self {
            local: HashMap::new(),
            node_factory,
            timeouts: NodeApiTimeouts::from_config(config),
        }
    }

    /// Register a local constructor for one property; last registration wins
    pub fn register_local<F>(&mut self, property: impl Into<String>, constructor: F)
    where
        F: Fn(&str) -> Box<dyn PropertySampler> + Send + Sync + 'static,
    {
        self.local.insert(property.into(), Box::new(constructor));
    }

    /// Construct a sampler for the property
    pub fn make_sampler(&self, property: &str) -> Box<dyn PropertySampler> {
        if let Some(constructor) = self.local.get(property) {
            debug!(property, "using local sampler");
            return constructor(property);
        }
        Box::new(NamedPropertySampler::new(
            property,
            self.node_factory.clone(),
            self.timeouts,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MapConfig;
    use crate::sampler::node_api::{NodeApi, NodeApiError};
    use crate::sampler::SamplingError;

    struct NeverConnect;

    impl NodeApiFactory for NeverConnect {
        fn create(&self, _timeouts: &NodeApiTimeouts) -> Result<Box<dyn NodeApi>, NodeApiError> {
            Err(NodeApiError::Network("unreachable".to_string()))
        }
    }

    struct FixedSampler {
        property: String,
        value: String,
    }

    impl PropertySampler for FixedSampler {
        fn property(&self) -> &str {
            &self.property
        }

        fn sample(&mut self) -> Result<String, SamplingError> {
            Ok(self.value.clone())
        }
    }

    #[test]
    fn test_registered_property_uses_local_sampler() {
        let mut factory = SamplerFactory::new(Arc::new(NeverConnect), &MapConfig::new());
        factory.register_local("cpu.load", |property| {
            Box::new(FixedSampler {
                property: property.to_string(),
                value: "0.5".to_string(),
            })
        });

        let mut sampler = factory.make_sampler("cpu.load");
        assert_eq!(sampler.property(), "cpu.load");
        assert_eq!(sampler.sample().unwrap(), "0.5");
    }

    #[test]
    fn test_unregistered_property_falls_back_to_remote() {
        let factory = SamplerFactory::new(Arc::new(NeverConnect), &MapConfig::new());
        let mut sampler = factory.make_sampler("peer.uptime");

        assert_eq!(sampler.property(), "peer.uptime");
        let err = sampler.sample().unwrap_err();
        assert!(err.temporary);
    }
}
