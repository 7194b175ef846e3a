//! Client-visible plugin configuration

use serde::{Deserialize, Serialize};

/// The slice of plugin configuration the backend exposes to clients.
///
/// Fetched once at plugin activation. When the fetch fails the integration
/// behaves as if every flag were off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Whether per-file edit permissions are enforced at all
    #[serde(default)]
    pub file_edit_permissions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_defaults_missing_flags_off() {
        let config: FeatureConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.file_edit_permissions);
    }
}
