//! Registry mapping identifiers to system information collectors.

use std::collections::HashMap;

use crate::error::InfoError;

use super::{SystemInfo, SystemInfoCollector};

/// Registry of collectors keyed by identifier.
///
/// The registry is built explicitly by the caller; there is no global instance.
pub struct CollectorRegistry<'a> {
    collectors: HashMap<String, Box<dyn SystemInfoCollector + 'a>>,
}

impl<'a> CollectorRegistry<'a> {
    pub fn new() -> Self {
        Self {
            collectors: HashMap::new(),
        }
    }

    /// Register a collector under its own identifier.
    ///
    /// If a collector is already registered for this identifier, it will be replaced.
    pub fn register(&mut self, collector: Box<dyn SystemInfoCollector + 'a>) {
        let identifier = collector.identifier().to_string();
        self.collectors.insert(identifier, collector);
    }

    /// Get a collector by identifier.
    pub fn get(&self, identifier: &str) -> Result<&(dyn SystemInfoCollector + 'a), InfoError> {
        self.collectors
            .get(identifier)
            .map(|c| c.as_ref())
            .ok_or_else(|| InfoError::ServiceLookupFailure {
                identifier: identifier.to_string(),
            })
    }

    /// Look up a collector and run it.
    pub fn collect(&self, identifier: &str) -> Result<SystemInfo, InfoError> {
        self.get(identifier)?.collect()
    }

    /// Run every collector, ordered by identifier.
    pub fn collect_all(&self) -> Result<Vec<(String, SystemInfo)>, InfoError> {
        self.identifiers()
            .into_iter()
            .map(|id| {
                let info = self.collect(&id)?;
                Ok((id, info))
            })
            .collect()
    }

    pub fn has(&self, identifier: &str) -> bool {
        self.collectors.contains_key(identifier)
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.collectors.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }
}

impl Default for CollectorRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}
