use regex::Regex;
use std::sync::LazyLock;

static ALIAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2})(\d+)([A-Z]\d?)$").expect("regex is valid"));

pub const DEFAULT_ALIAS_PREFIX: &str = "EP";

/// Stable identifiers for a publication. Currently a single alias:
/// prefix + document number + kind, upper-cased.
pub fn derive_aliases(prefix: &str, doc_number: &str, kind: &str) -> Vec<String> {
    vec![format!(
        "{}{}{}",
        prefix.trim().to_uppercase(),
        doc_number.trim().to_uppercase(),
        kind.trim().to_uppercase()
    )]
}

/// Splits an alias such as `EP1442058B1` into country, number and kind.
pub fn split_alias(alias: &str) -> Option<(String, String, String)> {
    let upper = alias.trim().to_uppercase();
    ALIAS_RE
        .captures(&upper)
        .map(|caps| (caps[1].to_string(), caps[2].to_string(), caps[3].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derives_upper_cased_alias() {
        assert_eq!(derive_aliases("EP", "1442058", "B1"), vec!["EP1442058B1"]);
        assert_eq!(derive_aliases("ep", " 1234567 ", "a2"), vec!["EP1234567A2"]);
    }

    #[test]
    fn test_split_alias() {
        assert_eq!(
            split_alias("EP1442058B1"),
            Some(("EP".to_string(), "1442058".to_string(), "B1".to_string()))
        );
        assert_eq!(
            split_alias("ep0000001a"),
            Some(("EP".to_string(), "0000001".to_string(), "A".to_string()))
        );
        assert_eq!(split_alias("1442058B1"), None);
    }
}
