#![allow(dead_code)]
use ep_normalize::{normalize_with_config, Normalized, NormalizerConfig};
use std::path::Path;

pub fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

pub fn load_fixture(filename: &str) -> String {
    let path = Path::new(&fixtures_dir()).join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

pub fn load_fixture_bytes(filename: &str) -> Vec<u8> {
    let path = Path::new(&fixtures_dir()).join(filename);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Normalizes a fixture with diagnostics logging off.
pub fn normalize_fixture(filename: &str) -> Normalized {
    let config = NormalizerConfig {
        log_diagnostics: false,
        ..Default::default()
    };
    normalize_with_config(&load_fixture_bytes(filename), &config)
        .unwrap_or_else(|e| panic!("Failed to normalize {}: {}", filename, e))
}

pub const ALL_FIXTURES: &[&str] = &[
    "ep1442058b1_v1-0.xml",
    "ep1300001a1_v1-01.xml",
    "ep1500002a2_v1-1.xml",
    "ep1600003a1_v1-2.xml",
    "ep1700004b1_v1-3.xml",
    "ep1800005a1_v1-4.xml",
    "ep2000006b1_v1-5.xml",
    "ep2200008b1_v1-5-1.xml",
];
