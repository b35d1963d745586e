//! Version-tolerant field lookup.
//!
//! Each logical field maps to a list of candidate paths, newest dialect
//! convention first. A path is a `/`-separated list of element names relative
//! to the root element; a step may list alternatives as `a|b`, which keeps
//! matches of either name in document order. The first candidate that yields
//! at least one non-blank node wins.

use crate::markup::{self, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Abstract,
    Description,
    Claims,
    Citations,
    ContractingStates,
    Classifications,
    Inventors,
    Owners,
    Representatives,
}

/// Single-valued fields, read from an attribute or an element's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Id,
    File,
    Lang,
    Country,
    DocNumber,
    Kind,
    DatePublished,
    Status,
    SchemaVersion,
    ApplicationNumber,
    FilingDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Attr(&'static str, &'static str),
    Text(&'static str),
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Abstract => "abstract",
            Field::Description => "description",
            Field::Claims => "claims",
            Field::Citations => "citations",
            Field::ContractingStates => "contracting_states",
            Field::Classifications => "classifications",
            Field::Inventors => "inventors",
            Field::Owners => "owners",
            Field::Representatives => "representatives",
        }
    }

    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Field::Title => &["SDOBI/B500/B540/B542", "SDOBI/B540/B542"],
            Field::Abstract => &["abstract", "SDOBI/B500/B570/abstract"],
            Field::Description => &["description"],
            Field::Claims => &["claims"],
            Field::Citations => &["SDOBI/B500/B560/B561", "SDOBI/B560/B561"],
            Field::ContractingStates => &["SDOBI/B800/B840/ctry", "SDOBI/B800/B840"],
            Field::Classifications => &[
                "SDOBI/B500/B510EP/classification-ipcr/text",
                "SDOBI/B500/B510/B511|B512",
            ],
            Field::Inventors => &["SDOBI/B700/B720/B721"],
            Field::Owners => &["SDOBI/B700/B730/B731", "SDOBI/B700/B710/B711"],
            Field::Representatives => &["SDOBI/B700/B740/B741"],
        }
    }
}

impl Scalar {
    pub fn name(self) -> &'static str {
        match self {
            Scalar::Id => "id",
            Scalar::File => "file",
            Scalar::Lang => "lang",
            Scalar::Country => "country",
            Scalar::DocNumber => "doc_number",
            Scalar::Kind => "kind",
            Scalar::DatePublished => "date_published",
            Scalar::Status => "status",
            Scalar::SchemaVersion => "schema_version",
            Scalar::ApplicationNumber => "application_number",
            Scalar::FilingDate => "filing_date",
        }
    }

    pub fn candidates(self) -> &'static [Source] {
        use Source::{Attr, Text};
        match self {
            Scalar::Id => &[Attr("", "id"), Attr("", "doc-id")],
            Scalar::File => &[Attr("", "file"), Attr("", "file-reference-id")],
            Scalar::Lang => &[
                Attr("", "lang"),
                Attr("SDOBI", "lang"),
                Text("SDOBI/B200/B260"),
                Text("SDOBI/B200/B250"),
            ],
            Scalar::Country => &[Attr("", "country"), Text("SDOBI/B100/B190")],
            Scalar::DocNumber => &[Attr("", "doc-number"), Text("SDOBI/B100/B110")],
            Scalar::Kind => &[Attr("", "kind"), Text("SDOBI/B100/B130")],
            Scalar::DatePublished => &[Attr("", "date-publ"), Text("SDOBI/B100/B140/date")],
            Scalar::Status => &[Attr("", "status")],
            Scalar::SchemaVersion => &[Attr("", "dtd-version"), Attr("", "version")],
            Scalar::ApplicationNumber => &[Text("SDOBI/B200/B210")],
            Scalar::FilingDate => &[Text("SDOBI/B200/B220/date")],
        }
    }
}

/// Evaluates one path below `node`, returning matches in document order.
pub fn select<'a>(node: Node<'a>, path: &str) -> Vec<Node<'a>> {
    let mut frontier = vec![node];
    for step in path.split('/').filter(|step| !step.is_empty()) {
        let names: Vec<&str> = step.split('|').collect();
        frontier = frontier
            .iter()
            .flat_map(|parent| markup::child_elements(parent))
            .filter(|child| markup::name(child).is_some_and(|n| names.contains(&n)))
            .collect();
        if frontier.is_empty() {
            break;
        }
    }
    frontier
}

/// First non-blank match of the first candidate path that yields one.
pub fn select_first<'a>(node: Node<'a>, candidates: &[&str]) -> Option<Node<'a>> {
    candidates.iter().find_map(|path| {
        select(node, path)
            .into_iter()
            .find(|found| !markup::is_blank(found))
    })
}

/// All non-blank nodes for `field`; empty when no dialect convention matches.
pub fn locate<'a>(root: Node<'a>, field: Field) -> Vec<Node<'a>> {
    for path in field.candidates() {
        let found: Vec<Node<'a>> = select(root, path)
            .into_iter()
            .filter(|node| !markup::is_blank(node))
            .collect();
        if !found.is_empty() {
            tracing::debug!(field = field.name(), path, count = found.len(), "located");
            return found;
        }
    }
    Vec::new()
}

/// Trimmed value of `scalar`; `None` when absent or empty in every candidate.
pub fn locate_value(root: Node<'_>, scalar: Scalar) -> Option<String> {
    scalar.candidates().iter().find_map(|source| {
        let value = match *source {
            Source::Attr(path, key) => select(root, path)
                .iter()
                .find_map(|node| markup::attr(node, key).map(str::to_string)),
            Source::Text(path) => select(root, path)
                .iter()
                .filter(|node| !markup::is_blank(node))
                .map(|node| markup::inline_text(node))
                .find(|text| !text.is_empty()),
        }?;
        let value = value.trim().to_string();
        (!value.is_empty()).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkupTree;

    fn with_root<T>(xml: &str, f: impl FnOnce(Node<'_>) -> T) -> T {
        let tree = MarkupTree::parse_str(xml).unwrap();
        f(tree.root_element().unwrap())
    }

    #[test]
    fn test_select_keeps_document_order_across_alternatives() {
        let xml = "<d><B510><B512>b</B512><B511>a</B511><B512>c</B512></B510></d>";
        let texts = with_root(xml, |root| {
            select(root, "B510/B511|B512")
                .iter()
                .map(|n| markup::inline_text(n))
                .collect::<Vec<_>>()
        });
        assert_eq!(texts, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_locate_prefers_newest_candidate() {
        let xml = "<d><SDOBI><B500><B560><B561>new</B561></B560></B500><B560><B561>old</B561></B560></SDOBI></d>";
        let texts = with_root(xml, |root| {
            locate(root, Field::Citations)
                .iter()
                .map(|n| markup::inline_text(n))
                .collect::<Vec<_>>()
        });
        assert_eq!(texts, vec!["new"]);
    }

    #[test]
    fn test_locate_falls_back_to_older_candidate() {
        let xml = "<d><SDOBI><B560><B561>old</B561></B560></SDOBI></d>";
        let count = with_root(xml, |root| locate(root, Field::Citations).len());
        assert_eq!(count, 1);
    }

    #[test]
    fn test_blank_elements_count_as_absent() {
        let xml = "<d><abstract lang=\"en\"/><description>  </description></d>";
        with_root(xml, |root| {
            assert!(locate(root, Field::Abstract).is_empty());
            assert!(locate(root, Field::Description).is_empty());
            assert!(locate(root, Field::Claims).is_empty());
        });
    }

    #[test]
    fn test_locate_value_tries_attribute_then_text() {
        let with_attr = r#"<d doc-number="123"><SDOBI><B100><B110>999</B110></B100></SDOBI></d>"#;
        let without_attr = "<d><SDOBI><B100><B110> 999 </B110></B100></SDOBI></d>";
        assert_eq!(
            with_root(with_attr, |root| locate_value(root, Scalar::DocNumber)),
            Some("123".to_string())
        );
        assert_eq!(
            with_root(without_attr, |root| locate_value(root, Scalar::DocNumber)),
            Some("999".to_string())
        );
        assert_eq!(
            with_root(without_attr, |root| locate_value(root, Scalar::Kind)),
            None
        );
    }

    #[test]
    fn test_locate_value_skips_blank_sibling() {
        let xml = "<d><SDOBI><B200><B260> </B260><B260>de</B260><B250>en</B250></B200></SDOBI></d>";
        assert_eq!(
            with_root(xml, |root| locate_value(root, Scalar::Lang)),
            Some("de".to_string())
        );
    }

    #[test]
    fn test_legacy_attribute_names() {
        let xml = r#"<d doc-id="EP1000000B1" file-reference-id="EP99123456NWB1.xml"/>"#;
        with_root(xml, |root| {
            assert_eq!(locate_value(root, Scalar::Id).as_deref(), Some("EP1000000B1"));
            assert_eq!(
                locate_value(root, Scalar::File).as_deref(),
                Some("EP99123456NWB1.xml")
            );
        });
    }
}
