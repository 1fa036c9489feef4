use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Configuration parameters for the inbound native event channel
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EventChannelConfig {
    /// Bounded queue depth between the native event intake and the router.
    /// When full, the bridge-side sender backpressures.
    /// Default value is set via default_queue_capacity() function
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_queue_capacity() -> usize {
    1024
}

impl Default for EventChannelConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl EventChannelConfig {
    /// Validates event channel parameters
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(Error::Config(ConfigError::Message(
                "queue_capacity must be greater than 0".into(),
            )));
        }
        Ok(())
    }
}
