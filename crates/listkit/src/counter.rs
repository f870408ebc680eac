//! Named counters backing list numbering.
//!
//! A [`CounterStore`] belongs to one document render. Counters start at 0 and
//! are advanced once per automatically numbered item. Declaring a name twice
//! is an error rather than a silent reset.

use std::collections::HashMap;

use crate::error::{ListError, Result};

/// Process-wide (per document) table of named integer counters.
///
/// # Example
///
/// ```rust
/// use listkit::CounterStore;
///
/// let mut counters = CounterStore::new();
/// counters.declare("item").unwrap();
/// assert_eq!(counters.increment("item").unwrap(), 1);
/// assert_eq!(counters.increment("item").unwrap(), 2);
/// assert_eq!(counters.current("item").unwrap(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CounterStore {
    counters: HashMap<String, i64>,
}

impl CounterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new counter at 0.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::DuplicateCounter`] if `name` is already declared.
    pub fn declare(&mut self, name: &str) -> Result<()> {
        if self.counters.contains_key(name) {
            return Err(ListError::DuplicateCounter(name.to_string()));
        }
        self.counters.insert(name.to_string(), 0);
        Ok(())
    }

    /// Advances the counter by one and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::CounterOverflow`] at `i64::MAX`; the value is left
    /// unchanged.
    pub fn increment(&mut self, name: &str) -> Result<i64> {
        let value = self
            .counters
            .get_mut(name)
            .ok_or_else(|| ListError::UnknownCounter(name.to_string()))?;
        *value = value
            .checked_add(1)
            .ok_or_else(|| ListError::CounterOverflow(name.to_string()))?;
        Ok(*value)
    }

    /// Returns the present value without changing it.
    pub fn current(&self, name: &str) -> Result<i64> {
        self.counters
            .get(name)
            .copied()
            .ok_or_else(|| ListError::UnknownCounter(name.to_string()))
    }

    /// Overwrites the counter, returning the previous value.
    ///
    /// This is the hook for host numbering policy (restarting a list, restoring
    /// an outer list's count when a nested one closes).
    pub fn set(&mut self, name: &str, value: i64) -> Result<i64> {
        let slot = self
            .counters
            .get_mut(name)
            .ok_or_else(|| ListError::UnknownCounter(name.to_string()))?;
        Ok(std::mem::replace(slot, value))
    }

    /// Sets the counter back to 0, returning the previous value.
    pub fn reset(&mut self, name: &str) -> Result<i64> {
        self.set(name, 0)
    }

    /// Returns true if `name` has been declared.
    pub fn contains(&self, name: &str) -> bool {
        self.counters.contains_key(name)
    }

    /// Returns the number of declared counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Returns true if no counters are declared.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_starts_at_zero() {
        let mut counters = CounterStore::new();
        counters.declare("item").unwrap();
        assert_eq!(counters.current("item").unwrap(), 0);
        assert_eq!(counters.len(), 1);
    }

    #[test]
    fn test_declare_twice_fails() {
        let mut counters = CounterStore::new();
        counters.declare("item").unwrap();
        counters.increment("item").unwrap();

        let err = counters.declare("item").unwrap_err();
        assert_eq!(err, ListError::DuplicateCounter("item".to_string()));
        // The existing value survives the failed redeclaration
        assert_eq!(counters.current("item").unwrap(), 1);
    }

    #[test]
    fn test_increment_returns_new_value() {
        let mut counters = CounterStore::new();
        counters.declare("item").unwrap();
        assert_eq!(counters.increment("item").unwrap(), 1);
        assert_eq!(counters.increment("item").unwrap(), 2);
        assert_eq!(counters.increment("item").unwrap(), 3);
    }

    #[test]
    fn test_unknown_counter() {
        let mut counters = CounterStore::new();
        assert_eq!(
            counters.increment("missing"),
            Err(ListError::UnknownCounter("missing".to_string()))
        );
        assert_eq!(
            counters.current("missing"),
            Err(ListError::UnknownCounter("missing".to_string()))
        );
        assert!(counters.reset("missing").is_err());
    }

    #[test]
    fn test_counters_are_independent() {
        let mut counters = CounterStore::new();
        counters.declare("a").unwrap();
        counters.declare("b").unwrap();
        counters.increment("a").unwrap();
        counters.increment("a").unwrap();
        counters.increment("b").unwrap();
        assert_eq!(counters.current("a").unwrap(), 2);
        assert_eq!(counters.current("b").unwrap(), 1);
    }

    #[test]
    fn test_set_and_reset_return_previous() {
        let mut counters = CounterStore::new();
        counters.declare("item").unwrap();
        counters.increment("item").unwrap();
        assert_eq!(counters.set("item", 10).unwrap(), 1);
        assert_eq!(counters.increment("item").unwrap(), 11);
        assert_eq!(counters.reset("item").unwrap(), 11);
        assert_eq!(counters.current("item").unwrap(), 0);
    }

    #[test]
    fn test_increment_at_max_overflows() {
        let mut counters = CounterStore::new();
        counters.declare("item").unwrap();
        counters.set("item", i64::MAX).unwrap();
        assert_eq!(
            counters.increment("item"),
            Err(ListError::CounterOverflow("item".to_string()))
        );
        assert_eq!(counters.current("item").unwrap(), i64::MAX);
    }

    #[test]
    fn test_empty_store() {
        let counters = CounterStore::new();
        assert!(counters.is_empty());
        assert!(!counters.contains("item"));
    }
}
