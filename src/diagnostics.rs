use serde::{Deserialize, Serialize};

/// A non-fatal anomaly met while normalizing one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub field: String,
    pub raw: String,
    pub reason: String,
}

/// Collects diagnostics for a single document, optionally echoing each to the log.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    log: bool,
}

impl Diagnostics {
    pub fn new(log: bool) -> Self {
        Self {
            entries: Vec::new(),
            log,
        }
    }

    pub fn record(&mut self, field: &str, raw: &str, reason: impl Into<String>) {
        let reason = reason.into();
        if self.log {
            tracing::warn!(field, raw, reason = %reason, "normalization anomaly");
        }
        self.entries.push(Diagnostic {
            field: field.to_string(),
            raw: raw.to_string(),
            reason,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
