//! Effort selector and its research policy table

use serde::{Deserialize, Serialize};

/// Coarse effort selector exposed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// Policy parameters derived from an effort level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffortPolicy {
    /// Number of initial search queries to generate.
    pub query_count: u32,
    /// Maximum number of research loops before finalizing.
    pub max_loops: u32,
}

impl EffortLevel {
    /// Fixed mapping from effort to policy parameters.
    pub fn policy(self) -> EffortPolicy {
        match self {
            EffortLevel::Low => EffortPolicy {
                query_count: 1,
                max_loops: 1,
            },
            EffortLevel::Medium => EffortPolicy {
                query_count: 3,
                max_loops: 3,
            },
            EffortLevel::High => EffortPolicy {
                query_count: 5,
                max_loops: 10,
            },
        }
    }
}
