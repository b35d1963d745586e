use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizerConfig {
    /// Joins paragraphs of abstract, description and claims text.
    pub paragraph_separator: String,
    /// Emit a `warn` event for every diagnostic as it is recorded.
    pub log_diagnostics: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            paragraph_separator: "\n\n".to_string(),
            log_diagnostics: true,
        }
    }
}

impl NormalizerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse {}: {e}", path.display()))
    }
}
