//! Registry of reference search services
//!
//! Picker columns name their service by the `ref_aggregate` key from field
//! metadata; the caller registers one service instance per key.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::traits::ReferenceSearchService;

#[derive(Clone, Default)]
pub struct SearchServiceRegistry {
    services: HashMap<String, Rc<dyn ReferenceSearchService>>,
}

impl SearchServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register service under key, replacing a previous one
    pub fn register(&mut self, key: impl Into<String>, service: Rc<dyn ReferenceSearchService>) {
        self.services.insert(key.into(), service);
    }

    pub fn with(mut self, key: impl Into<String>, service: Rc<dyn ReferenceSearchService>) -> Self {
        self.register(key, service);
        self
    }

    pub fn resolve(&self, key: &str) -> Option<Rc<dyn ReferenceSearchService>> {
        self.services.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.services.contains_key(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.services.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl fmt::Debug for SearchServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchServiceRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CustomerSearch;

    #[test]
    fn test_resolve_registered_service() {
        let registry =
            SearchServiceRegistry::new().with("customers", Rc::new(CustomerSearch::sample()));
        assert!(registry.resolve("customers").is_some());
        assert!(registry.resolve("banks").is_none());
        assert_eq!(registry.keys(), vec!["customers"]);
    }
}
