use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)v?(\d+)[-.](\d+)(?:[-.](\d+))?\s*$").expect("regex is valid")
});

/// Known document schema revisions. Informational only: field lookup never
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    V1_0,
    V1_01,
    V1_1,
    V1_2,
    V1_3,
    V1_4,
    V1_5,
    V1_5_1,
    Unknown,
}

impl Dialect {
    /// Reads a `dtd-version` style tag, e.g. `ep-patent-document-v1-5-1`.
    pub fn from_tag(tag: &str) -> Self {
        let Some(caps) = VERSION_RE.captures(tag) else {
            return Dialect::Unknown;
        };
        let patch = caps.get(3).map(|m| m.as_str());
        match (&caps[1], &caps[2], patch) {
            ("1", "0", None) => Dialect::V1_0,
            ("1", "01", None) => Dialect::V1_01,
            ("1", "1", None) => Dialect::V1_1,
            ("1", "2", None) => Dialect::V1_2,
            ("1", "3", None) => Dialect::V1_3,
            ("1", "4", None) => Dialect::V1_4,
            ("1", "5", None) => Dialect::V1_5,
            ("1", "5", Some("1")) => Dialect::V1_5_1,
            _ => Dialect::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dialect::V1_0 => "v1.0",
            Dialect::V1_01 => "v1.01",
            Dialect::V1_1 => "v1.1",
            Dialect::V1_2 => "v1.2",
            Dialect::V1_3 => "v1.3",
            Dialect::V1_4 => "v1.4",
            Dialect::V1_5 => "v1.5",
            Dialect::V1_5_1 => "v1.5.1",
            Dialect::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
