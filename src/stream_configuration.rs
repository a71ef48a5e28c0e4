//! Configuration types for stream buffering
//!
//! Only the combinators that must hold elements (`tee`, `unique`, `repeat`)
//! consult this. Values are capacity hints; they never change what a stream
//! yields.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Buffer configuration for a buffering combinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    pub initial_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self { initial_capacity: 16 }
    }
}

impl BufferConfig {
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }
}

/// Per-stream configuration, inherited by every stream derived from it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Per-branch queue used by `tee`
    pub tee_buffer: BufferConfig,
    /// Seen-set used by `unique`
    pub unique_buffer: BufferConfig,
    /// Replay buffer used by `repeat`
    pub repeat_buffer: BufferConfig,
}

impl StreamConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}
