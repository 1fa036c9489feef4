use serde::Deserialize;
use serde::Serialize;

/// Configuration defaults for the native driver path
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DriverConfig {
    /// Whether value nodes created from configuration use the native path.
    /// Nodes constructed with an explicit flag are unaffected.
    /// Default value is set via default_use_native_driver() function
    #[serde(default = "default_use_native_driver")]
    pub use_native_driver: bool,
}

fn default_use_native_driver() -> bool {
    true
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            use_native_driver: default_use_native_driver(),
        }
    }
}
