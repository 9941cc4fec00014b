use serde::{Deserialize, Serialize};

use crate::constants;

/// Tuning knobs for the cobweb driver, carried on the tree instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CobwebConfig {
    /// Minimum category utility a structural edit must exceed to be committed.
    /// When no candidate operation beats this, the current subtree is collapsed
    /// back into a leaf instead.
    pub min_cu: f64,
}

impl Default for CobwebConfig {
    fn default() -> Self {
        Self {
            min_cu: constants::DEFAULT_MIN_CU,
        }
    }
}
