use crate::core::engine::{DerivedFinancials, compute};
use crate::core::error::BudgetError;
use crate::core::params::BudgetParameters;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

#[derive(Clone)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Mutex<HashMap<K, V>>>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let cache = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let value = cache.get(key).cloned();
        if value.is_some() {
            debug!("Cache HIT");
        } else {
            debug!("Cache MISS");
        }
        value
    }

    pub fn put(&self, key: K, value: V) {
        let mut cache = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        debug!("Cache PUT");
        cache.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Structural fingerprint of a snapshot: its canonical JSON form.
///
/// Two snapshots share a fingerprint only when every field serializes the
/// same, so any edit produces a new key.
pub fn fingerprint(params: &BudgetParameters) -> String {
    // Serializing plain structs of numbers, strings and bools cannot fail.
    serde_json::to_string(params).unwrap_or_default()
}

/// Memoizes [`compute`] by snapshot fingerprint. Errors are never stored.
#[derive(Clone, Default)]
pub struct DerivationCache {
    plans: Cache<String, Arc<DerivedFinancials>>,
}

impl DerivationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn derive(&self, params: &BudgetParameters) -> Result<Arc<DerivedFinancials>, BudgetError> {
        let key = fingerprint(params);
        if let Some(plan) = self.plans.get(&key) {
            return Ok(plan);
        }
        let plan = Arc::new(compute(params)?);
        self.plans.put(key, Arc::clone(&plan));
        Ok(plan)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_get_put() {
        let cache = Cache::<String, i32>::new();

        assert!(cache.get(&"key1".to_string()).is_none());

        cache.put("key1".to_string(), 123);

        assert_eq!(cache.get(&"key1".to_string()), Some(123));
        assert!(cache.get(&"key2".to_string()).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_derivation_reused_for_same_snapshot() {
        let cache = DerivationCache::new();
        let params = BudgetParameters::with_defaults();

        let first = cache.derive(&params).unwrap();
        let second = cache.derive(&params.clone()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_any_edit_invalidates() {
        let cache = DerivationCache::new();
        let params = BudgetParameters::with_defaults();

        let base = cache.derive(&params).unwrap();
        let edited = cache
            .derive(&params.with_monthly_ad_spend(0, 13000.0).unwrap())
            .unwrap();

        assert!(!Arc::ptr_eq(&base, &edited));
        assert_ne!(base.monthly_breakdown[0].overhead, edited.monthly_breakdown[0].overhead);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = DerivationCache::new();
        let params = BudgetParameters::with_defaults().with_overhead_pct(0.0);

        assert!(cache.derive(&params).is_err());
        assert!(cache.is_empty());
    }
}
