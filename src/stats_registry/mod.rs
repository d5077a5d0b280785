//! StatsRegistry - operational counters
//!
//! ## Responsibilities
//!
//! - Process-wide name -> counter mapping (add / read / snapshot / reset)
//!
//! Side-channel observability only: counters never block or fail a
//! protocol operation, so this module knows nothing about sessions or
//! the broker.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::error::{Error, Result};

/// StatsRegistry instance
pub struct StatsRegistry {
    counters: RwLock<HashMap<String, i64>>,
}

impl StatsRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            counters: RwLock::new(HashMap::new()),
        }
    }

    /// Increment (or initialize) a counter. Atomic with respect to
    /// concurrent callers.
    pub async fn add(&self, name: &str, delta: i64) {
        let mut counters = self.counters.write().await;
        *counters.entry(name.to_string()).or_insert(0) += delta;
    }

    /// Current value of a counter. A counter that was never set is
    /// reported as not found rather than zero.
    pub async fn get_current(&self, name: &str) -> Result<i64> {
        self.counters
            .read()
            .await
            .get(name)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("statistic not found: {}", name)))
    }

    /// Snapshot of all counters
    pub async fn get_all(&self) -> HashMap<String, i64> {
        self.counters.read().await.clone()
    }

    /// Replace the entire counter set (used for resets and tests)
    pub async fn global_load(&self, initial: HashMap<String, i64>) {
        let mut counters = self.counters.write().await;
        *counters = initial;
    }
}

impl Default for StatsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
