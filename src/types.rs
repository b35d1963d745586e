use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classification::Classification;
use crate::country::CountryCode;
use crate::dialect::Dialect;

/// Version-agnostic record built from one source document.
///
/// Empty lists and `None` dates mean the source did not state the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPatentDocument {
    pub id: String,
    pub doc_number: String,
    pub kind: String,
    pub country: CountryCode,
    pub lang: String,
    pub date_published: Option<NaiveDate>,
    pub status: String,
    pub schema_version: String,
    pub file: String,
    pub application_number: String,
    pub filing_date: Option<NaiveDate>,
    pub aliases: Vec<String>,
    pub titles: Vec<TextEntry>,
    pub abstracts: Vec<TextEntry>,
    pub descriptions: Vec<TextEntry>,
    pub claims: Vec<ClaimSet>,
    pub citations: Vec<Citation>,
    pub inventors: Vec<Party>,
    pub owners: Vec<Party>,
    pub representatives: Vec<Party>,
    pub contracting_states: Vec<CountryCode>,
    pub classifications: Vec<Classification>,
}

impl CanonicalPatentDocument {
    pub fn dialect(&self) -> Dialect {
        Dialect::from_tag(&self.schema_version)
    }

    pub fn primary_alias(&self) -> Option<&str> {
        self.aliases.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEntry {
    pub text: String,
    pub language: String,
}

/// One claims block (one per language).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSet {
    pub text: String,
    pub language: String,
    pub block_id: String,
    /// Number of claims in the block.
    pub num: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub country: CountryCode,
    pub doc_number: String,
    /// Empty when the source does not state it.
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: String,
    /// Postal street lines joined by `\n`.
    pub street: String,
    pub city: String,
    pub country: Option<CountryCode>,
    pub iid: String,
    pub irf: String,
}
