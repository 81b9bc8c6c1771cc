use serde::{Deserialize, Serialize};

/// Maximum sensor samples retained per live session
pub const MAX_SAMPLES: usize = 1000;

/// Maximum keyframes retained per live session
pub const MAX_KEYFRAMES: usize = 100;

pub const DEFAULT_TITLE: &str = "Untitled Meeting";

/// Limits applied to every live session in a registry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionLimits {
    /// Sensor samples kept before the oldest is evicted
    pub max_samples: usize,

    /// Keyframes kept before the oldest is evicted
    pub max_keyframes: usize,

    /// Title used when session-start carries none
    pub default_title: String,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_samples: MAX_SAMPLES,
            max_keyframes: MAX_KEYFRAMES,
            default_title: DEFAULT_TITLE.to_string(),
        }
    }
}
