use regex::Regex;
use std::sync::LazyLock;

use crate::country::CountryCode;
use crate::diagnostics::Diagnostics;
use crate::locator::{select, select_first};
use crate::markup::{self, Node};
use crate::types::Citation;

const FIELD: &str = "citations";

/// `EP-A- 1 234 567`, `US-A- 5 000 000`, `WO-A-98/12345`, `DE-U- 9 112 345`, `JP-62 123 456`.
static LEGACY_CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z]{2})\s*-\s*(?:([A-Za-z]\d?)\s*-\s*)?(\d[\d /]*\d|\d)")
        .expect("regex is valid")
});

/// `dnum` attribute form: `EP1234567A`, `US5000000A1`.
static DNUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z]{2})\s*(\d+)\s*([A-Za-z]\d?)?\s*$").expect("regex is valid")
});

/// Decodes one citation block (`B561`). Non-patent citations and unreadable
/// text yield `None` plus a diagnostic.
pub fn extract_citation(node: Node<'_>, diagnostics: &mut Diagnostics) -> Option<Citation> {
    if let Some(patcit) = select(node, "patcit").into_iter().next() {
        return from_patcit(patcit, diagnostics);
    }
    let text = markup::inline_text(&node);
    parse_legacy_citation(&text, diagnostics)
}

pub fn extract_citations(nodes: &[Node<'_>], diagnostics: &mut Diagnostics) -> Vec<Citation> {
    nodes
        .iter()
        .filter_map(|node| extract_citation(*node, diagnostics))
        .collect()
}

fn from_patcit(patcit: Node<'_>, diagnostics: &mut Diagnostics) -> Option<Citation> {
    if let Some(doc_id) = select_first(patcit, &["document-id"]) {
        let country = child_text(doc_id, "country");
        let doc_number = child_text(doc_id, "doc-number");
        let kind = child_text(doc_id, "kind");
        if !doc_number.is_empty() {
            return build(&country, &doc_number, &kind, diagnostics);
        }
    }
    match markup::attr(&patcit, "dnum") {
        Some(dnum) => match DNUM_RE.captures(dnum) {
            Some(caps) => build(
                &caps[1],
                &caps[2],
                caps.get(3).map(|m| m.as_str()).unwrap_or_default(),
                diagnostics,
            ),
            None => {
                diagnostics.record(FIELD, dnum, "unrecognized dnum layout");
                None
            }
        },
        None => {
            diagnostics.record(
                FIELD,
                &markup::inline_text(&patcit),
                "patent citation without number",
            );
            None
        }
    }
}

/// Reads the free-text citation form used before structured `patcit` blocks.
pub fn parse_legacy_citation(text: &str, diagnostics: &mut Diagnostics) -> Option<Citation> {
    let Some(caps) = LEGACY_CITATION_RE.captures(text) else {
        diagnostics.record(FIELD, text, "not a patent citation");
        return None;
    };
    let doc_number: String = caps[3].chars().filter(char::is_ascii_digit).collect();
    let kind = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    build(&caps[1], &doc_number, kind, diagnostics)
}

fn build(
    country: &str,
    doc_number: &str,
    kind: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Citation> {
    match CountryCode::new(country) {
        Ok(country) => Some(Citation {
            country,
            doc_number: doc_number.trim().to_string(),
            kind: kind.trim().to_uppercase(),
        }),
        Err(err) => {
            diagnostics.record(FIELD, country, err.to_string());
            None
        }
    }
}

fn child_text(node: Node<'_>, tag: &str) -> String {
    select_first(node, &[tag])
        .map(|found| markup::inline_text(&found))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkupTree;

    fn citation(xml: &str) -> (Option<Citation>, usize) {
        let tree = MarkupTree::parse_str(xml).unwrap();
        let mut diagnostics = Diagnostics::new(false);
        let found = extract_citation(tree.root_element().unwrap(), &mut diagnostics);
        (found, diagnostics.len())
    }

    #[test]
    fn test_structured_patcit() {
        let xml = r#"<B561><patcit id="ref-pcit0001" dnum="US5000000A"><document-id>
            <country>US</country><doc-number>5000000</doc-number><kind>A</kind>
            </document-id></patcit></B561>"#;
        let found = citation(xml).0.unwrap();
        assert_eq!(found.country, "US");
        assert_eq!(found.doc_number, "5000000");
        assert_eq!(found.kind, "A");
    }

    #[test]
    fn test_patcit_without_document_id_uses_dnum() {
        let found = citation(r#"<B561><patcit dnum="EP0123456A1"/></B561>"#).0.unwrap();
        assert_eq!(found.country, "EP");
        assert_eq!(found.doc_number, "0123456");
        assert_eq!(found.kind, "A1");

        let found = citation(r#"<B561><patcit dnum="DE19512345"/></B561>"#).0.unwrap();
        assert_eq!(found.kind, "");
    }

    #[test]
    fn test_legacy_text_forms() {
        let found = citation("<B561><text>EP-A- 1 234 567</text></B561>").0.unwrap();
        assert_eq!(found.country, "EP");
        assert_eq!(found.doc_number, "1234567");
        assert_eq!(found.kind, "A");

        let found = citation("<B561><text>WO-A-98/12345</text></B561>").0.unwrap();
        assert_eq!(found.doc_number, "9812345");

        let found = citation("<B561><text>JP-62 123 456</text></B561>").0.unwrap();
        assert_eq!(found.country, "JP");
        assert_eq!(found.kind, "");
        assert_eq!(found.doc_number, "62123456");
    }

    #[test]
    fn test_non_patent_text_is_skipped_with_diagnostic() {
        let (found, diags) =
            citation("<B561><text>SMITH J.: 'A study of widgets', 1999</text></B561>");
        assert!(found.is_none());
        assert_eq!(diags, 1);
    }
}
