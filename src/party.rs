use crate::country::CountryCode;
use crate::diagnostics::Diagnostics;
use crate::locator::{select, select_first};
use crate::markup::{self, Node};
use crate::types::Party;

const NAME_PATHS: &[&str] = &["snm", "nam/snm", "name"];
const ADDRESS_PATHS: &[&str] = &["adr", "address"];
const STREET_PATHS: &[&str] = &["str", "street"];
const CITY_PATHS: &[&str] = &["city"];
const COUNTRY_PATHS: &[&str] = &["ctry", "country"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    Inventor,
    Owner,
    Representative,
}

impl PartyRole {
    pub fn field(self) -> &'static str {
        match self {
            PartyRole::Inventor => "inventors",
            PartyRole::Owner => "owners",
            PartyRole::Representative => "representatives",
        }
    }

    /// Office identifiers are only carried for owners and representatives.
    fn carries_office_ids(self) -> bool {
        !matches!(self, PartyRole::Inventor)
    }
}

/// Extracts one party block (`B721`, `B731`, `B741`, ...). Returns `None` for a
/// block with no name and no address.
pub fn extract_party(
    node: Node<'_>,
    role: PartyRole,
    diagnostics: &mut Diagnostics,
) -> Option<Party> {
    let name = first_inline(node, NAME_PATHS);
    let (street, city, country_raw) = match select_first(node, ADDRESS_PATHS) {
        Some(adr) => (
            street_lines(adr),
            first_inline(adr, CITY_PATHS),
            first_inline(adr, COUNTRY_PATHS),
        ),
        None => (String::new(), String::new(), String::new()),
    };

    if name.is_empty() && street.is_empty() && city.is_empty() && country_raw.is_empty() {
        diagnostics.record(
            role.field(),
            &markup::inline_text(&node),
            "party block without name or address",
        );
        return None;
    }

    let country = if country_raw.is_empty() {
        None
    } else {
        match CountryCode::new(&country_raw) {
            Ok(code) => Some(code),
            Err(err) => {
                diagnostics.record(role.field(), &country_raw, err.to_string());
                None
            }
        }
    };

    let (iid, irf) = if role.carries_office_ids() {
        (first_inline(node, &["iid"]), first_inline(node, &["irf"]))
    } else {
        (String::new(), String::new())
    };

    Some(Party {
        name,
        street,
        city,
        country,
        iid,
        irf,
    })
}

/// Extracts every block in order; document order encodes priority.
pub fn extract_parties(
    nodes: &[Node<'_>],
    role: PartyRole,
    diagnostics: &mut Diagnostics,
) -> Vec<Party> {
    nodes
        .iter()
        .filter_map(|node| extract_party(*node, role, diagnostics))
        .collect()
}

fn first_inline(node: Node<'_>, paths: &[&str]) -> String {
    select_first(node, paths)
        .map(|found| markup::inline_text(&found))
        .unwrap_or_default()
}

fn street_lines(adr: Node<'_>) -> String {
    STREET_PATHS
        .iter()
        .map(|path| select(adr, path))
        .find(|found| !found.is_empty())
        .unwrap_or_default()
        .iter()
        .map(|line| markup::line_text(line))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
