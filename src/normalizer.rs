use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::alias::{derive_aliases, DEFAULT_ALIAS_PREFIX};
use crate::citation::extract_citations;
use crate::classification::{self, Classification};
use crate::config::NormalizerConfig;
use crate::country::CountryCode;
use crate::dates::parse_date;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::NormalizeError;
use crate::locator::{locate, locate_value, Field, Scalar};
use crate::markup::{self, MarkupTree, Node};
use crate::party::{extract_parties, PartyRole};
use crate::types::{CanonicalPatentDocument, ClaimSet, Party, TextEntry};

/// A canonical record plus the anomalies met while building it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalized {
    pub document: CanonicalPatentDocument,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn normalize(bytes: &[u8]) -> Result<Normalized, NormalizeError> {
    normalize_with_config(bytes, &NormalizerConfig::default())
}

/// Builds the canonical record for one raw document. Pure: no I/O, no shared state.
pub fn normalize_with_config(
    bytes: &[u8],
    config: &NormalizerConfig,
) -> Result<Normalized, NormalizeError> {
    let tree = MarkupTree::parse(bytes)?;
    let root = tree.root_element().ok_or(NormalizeError::EmptyDocument)?;
    let mut diagnostics = Diagnostics::new(config.log_diagnostics);

    let doc_number = required(root, Scalar::DocNumber)?;
    let kind = required(root, Scalar::Kind)?.to_uppercase();
    let country_raw = required(root, Scalar::Country)?;
    let country =
        CountryCode::new(&country_raw).map_err(|err| NormalizeError::InvalidIdentity {
            field: Scalar::Country.name(),
            raw: country_raw.clone(),
            reason: err.to_string(),
        })?;
    let id = locate_value(root, Scalar::Id)
        .unwrap_or_else(|| format!("{country}{doc_number}{kind}"));
    let lang = locate_value(root, Scalar::Lang).unwrap_or_default();

    let separator = config.paragraph_separator.as_str();
    let document = CanonicalPatentDocument {
        aliases: derive_aliases(DEFAULT_ALIAS_PREFIX, &doc_number, &kind),
        date_published: date_field(root, Scalar::DatePublished, &mut diagnostics),
        filing_date: date_field(root, Scalar::FilingDate, &mut diagnostics),
        status: locate_value(root, Scalar::Status).unwrap_or_default(),
        schema_version: locate_value(root, Scalar::SchemaVersion).unwrap_or_default(),
        file: locate_value(root, Scalar::File).unwrap_or_default(),
        application_number: locate_value(root, Scalar::ApplicationNumber).unwrap_or_default(),
        titles: titles(root, &lang),
        abstracts: text_blocks(root, Field::Abstract, &lang, separator),
        descriptions: text_blocks(root, Field::Description, &lang, separator),
        claims: claim_sets(root, &lang, separator),
        citations: extract_citations(&locate(root, Field::Citations), &mut diagnostics),
        inventors: parties(root, Field::Inventors, PartyRole::Inventor, &mut diagnostics),
        owners: parties(root, Field::Owners, PartyRole::Owner, &mut diagnostics),
        representatives: parties(
            root,
            Field::Representatives,
            PartyRole::Representative,
            &mut diagnostics,
        ),
        contracting_states: contracting_states(root, &mut diagnostics),
        classifications: classifications(root, &mut diagnostics),
        id,
        doc_number,
        kind,
        country,
        lang,
    };

    tracing::info!(
        id = %document.id,
        schema = %document.schema_version,
        claims = document.claims.len(),
        classifications = document.classifications.len(),
        diagnostics = diagnostics.len(),
        "normalized document"
    );

    Ok(Normalized {
        document,
        diagnostics: diagnostics.into_vec(),
    })
}

fn required(root: Node<'_>, scalar: Scalar) -> Result<String, NormalizeError> {
    locate_value(root, scalar).ok_or(NormalizeError::MissingIdentity {
        field: scalar.name(),
    })
}

fn date_field(
    root: Node<'_>,
    scalar: Scalar,
    diagnostics: &mut Diagnostics,
) -> Option<NaiveDate> {
    let raw = locate_value(root, scalar)?;
    match parse_date(&raw) {
        Ok(date) => date,
        Err(err) => {
            diagnostics.record(scalar.name(), &raw, err.to_string());
            None
        }
    }
}

/// Titles come as `B541` (language) / `B542` (text) sibling pairs.
fn titles(root: Node<'_>, doc_lang: &str) -> Vec<TextEntry> {
    locate(root, Field::Title)
        .iter()
        .filter_map(|node| {
            let text = markup::inline_text(node);
            if text.is_empty() {
                return None;
            }
            let language = markup::prev_element(node)
                .filter(|prev| markup::name(prev) == Some("B541"))
                .map(|prev| markup::inline_text(&prev))
                .filter(|lang| !lang.is_empty())
                .or_else(|| markup::attr(node, "lang").map(str::to_string))
                .unwrap_or_else(|| doc_lang.to_string());
            Some(TextEntry { text, language })
        })
        .collect()
}

fn language_of(node: &Node<'_>, doc_lang: &str) -> String {
    markup::attr(node, "lang")
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .unwrap_or(doc_lang)
        .to_string()
}

fn text_blocks(root: Node<'_>, field: Field, doc_lang: &str, separator: &str) -> Vec<TextEntry> {
    locate(root, field)
        .iter()
        .filter_map(|node| {
            let text = markup::block_text(node, separator);
            (!text.is_empty()).then(|| TextEntry {
                text,
                language: language_of(node, doc_lang),
            })
        })
        .collect()
}

fn claim_sets(root: Node<'_>, doc_lang: &str, separator: &str) -> Vec<ClaimSet> {
    locate(root, Field::Claims)
        .iter()
        .filter_map(|block| {
            let claims: Vec<String> = markup::children_named(block, "claim")
                .map(|claim| markup::inline_text(&claim))
                .filter(|text| !text.is_empty())
                .collect();
            let (text, num) = if claims.is_empty() {
                (markup::block_text(block, separator), 0)
            } else {
                (claims.join(separator), claims.len())
            };
            (!text.is_empty()).then(|| ClaimSet {
                text,
                language: language_of(block, doc_lang),
                block_id: markup::attr(block, "id").unwrap_or_default().to_string(),
                num,
            })
        })
        .collect()
}

fn parties(
    root: Node<'_>,
    field: Field,
    role: PartyRole,
    diagnostics: &mut Diagnostics,
) -> Vec<Party> {
    extract_parties(&locate(root, field), role, diagnostics)
}

/// Accepts one `ctry` per element or a whitespace-separated list in `B840`.
fn contracting_states(root: Node<'_>, diagnostics: &mut Diagnostics) -> Vec<CountryCode> {
    let mut states = Vec::new();
    for node in locate(root, Field::ContractingStates) {
        for token in markup::inline_text(&node).split_whitespace() {
            match CountryCode::new(token) {
                Ok(code) => states.push(code),
                Err(err) => {
                    diagnostics.record(Field::ContractingStates.name(), token, err.to_string())
                }
            }
        }
    }
    states
}

fn classifications(root: Node<'_>, diagnostics: &mut Diagnostics) -> Vec<Classification> {
    locate(root, Field::Classifications)
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let text = markup::raw_text(node);
            let (mut decoded, err) = classification::decode(&text);
            if let Some(err) = err {
                diagnostics.record(Field::Classifications.name(), &text, err.to_string());
            }
            decoded.sequence = index + 1;
            decoded.system = classification_system(node).to_string();
            decoded
        })
        .collect()
}

fn classification_system(node: &Node<'_>) -> &'static str {
    match node.parent().and_then(|parent| markup::name(&parent)) {
        Some("classification-ipcr") => "IPCR",
        _ => "IPC",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<ep-patent-document id="EP1000001A1" lang="en" country="EP"
        doc-number="1000001" kind="a1" date-publ="20000524" status="n"
        dtd-version="ep-patent-document-v1-1"><SDOBI/></ep-patent-document>"#;

    #[test]
    fn test_minimal_document_has_empty_lists() {
        let normalized = normalize(MINIMAL.as_bytes()).unwrap();
        let doc = normalized.document;
        assert_eq!(doc.kind, "A1");
        assert_eq!(doc.aliases, vec!["EP1000001A1"]);
        assert!(doc.titles.is_empty());
        assert!(doc.abstracts.is_empty());
        assert!(doc.claims.is_empty());
        assert!(doc.classifications.is_empty());
        assert!(normalized.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_kind_is_fatal() {
        let xml = r#"<ep-patent-document country="EP" doc-number="1"/>"#;
        assert!(matches!(
            normalize(xml.as_bytes()),
            Err(NormalizeError::MissingIdentity { field: "kind" })
        ));
    }

    #[test]
    fn test_identity_falls_back_to_bibliographic_block() {
        let xml = "<doc><SDOBI><B100><B110>0999999</B110><B130>B1</B130>\
                   <B140><date>19990101</date></B140><B190>EP</B190></B100></SDOBI></doc>";
        let doc = normalize(xml.as_bytes()).unwrap().document;
        assert_eq!(doc.id, "EP0999999B1");
        assert_eq!(doc.doc_number, "0999999");
        assert_eq!(doc.date_published, NaiveDate::from_ymd_opt(1999, 1, 1));
    }

    #[test]
    fn test_unparsable_date_is_a_diagnostic() {
        let xml = MINIMAL.replace("20000524", "2000-05-24");
        let normalized = normalize(xml.as_bytes()).unwrap();
        assert_eq!(normalized.document.date_published, None);
        assert_eq!(normalized.diagnostics.len(), 1);
        assert_eq!(normalized.diagnostics[0].field, "date_published");
        assert_eq!(normalized.diagnostics[0].raw, "2000-05-24");
    }

    #[test]
    fn test_alias_prefix_is_fixed_under_any_config() {
        let config = NormalizerConfig {
            paragraph_separator: " | ".to_string(),
            log_diagnostics: false,
        };
        let padded = MINIMAL.replace("doc-number=\"1000001\"", "doc-number=\" 1000001 \"");
        for xml in [MINIMAL.to_string(), padded] {
            let doc = normalize_with_config(xml.as_bytes(), &config).unwrap().document;
            assert_eq!(doc.primary_alias(), Some("EP1000001A1"));
        }
    }
}
