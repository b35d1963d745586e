//! Decoder for fixed-layout classification symbols.
//!
//! IPCR layout: `C07K  14/47        20060101AFI20050713BHEP        `
//! (section, class, subclass, main group `/` subgroup, version date, level,
//! first/later, value, action date, original/reclassified, source,
//! generating office). Pre-IPCR symbols (`7C 07K 14/47`) carry an edition
//! prefix and stop after the subgroup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Symbol exactly as written in the source; the decoded fields below derive from it.
    pub text: String,
    pub system: String,
    pub sequence: usize,
    pub section: String,
    pub class: String,
    pub sub_class: String,
    pub main_group: String,
    pub sub_group: String,
    pub version: String,
    pub classification_level: String,
    pub first_later: String,
    pub classification_value: String,
    pub action_date: String,
    pub original_or_reclassified: String,
    pub source: String,
    pub generating_office: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("missing section letter")]
    MissingSection,
    #[error("missing two-digit class")]
    MissingClass,
    #[error("missing subclass letter")]
    MissingSubClass,
    #[error("missing main group")]
    MissingMainGroup,
    #[error("missing '/' between main group and subgroup")]
    MissingSlash,
    #[error("missing subgroup")]
    MissingSubGroup,
    #[error("malformed version date")]
    BadVersion,
    #[error("missing classification level")]
    MissingLevel,
    #[error("missing first/later flag")]
    MissingFirstLater,
    #[error("missing classification value")]
    MissingValue,
    #[error("malformed action date")]
    BadActionDate,
    #[error("missing original/reclassified flag")]
    MissingOriginal,
    #[error("missing source flag")]
    MissingSource,
    #[error("missing generating office")]
    MissingOffice,
    #[error("unexpected text after the symbol")]
    TrailingText,
}

struct Cursor<'a> {
    bytes: &'a [u8],
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            text,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_spaces();
        self.pos >= self.bytes.len()
    }

    fn take_while(&mut self, max: usize, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.pos - start < max && self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &self.text[start..self.pos]
    }

    fn letter(&mut self) -> Option<String> {
        let taken = self.take_while(1, |b| b.is_ascii_alphabetic());
        (!taken.is_empty()).then(|| taken.to_string())
    }

    fn letters(&mut self, count: usize) -> Option<String> {
        let taken = self.take_while(count, |b| b.is_ascii_alphabetic());
        (taken.len() == count).then(|| taken.to_string())
    }

    fn digits(&mut self, min: usize, max: usize) -> Option<String> {
        let start = self.pos;
        let taken = self.take_while(max, |b| b.is_ascii_digit());
        if taken.len() < min || self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos = start;
            return None;
        }
        Some(taken.to_string())
    }

    fn byte(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skips a legacy edition number (`7` in `7C 07K`): digits, then a section
    /// letter, then a two-digit class.
    fn skip_edition(&mut self) {
        let start = self.pos;
        let edition = self.take_while(2, |b| b.is_ascii_digit());
        let section_follows = self.letter().is_some();
        self.skip_spaces();
        let class_follows = self.digits(2, 2).is_some();
        self.pos = if !edition.is_empty() && section_follows && class_follows {
            start + edition.len()
        } else {
            start
        };
    }
}

/// Decodes `text` into its fields. On failure the returned classification
/// still carries `text`; a failure in the section..subgroup head leaves every
/// decoded field empty, a failure in the tail keeps the head and whatever tail
/// fields were read before it.
pub fn decode(text: &str) -> (Classification, Option<SymbolError>) {
    let mut classification = Classification {
        text: text.to_string(),
        ..Default::default()
    };

    let mut cursor = Cursor::new(text);
    let head = match decode_head(&mut cursor) {
        Ok(head) => head,
        Err(err) => return (classification, Some(err)),
    };
    classification.section = head.section;
    classification.class = head.class;
    classification.sub_class = head.sub_class;
    classification.main_group = head.main_group;
    classification.sub_group = head.sub_group;

    // Legacy symbols stop after the subgroup.
    if cursor.at_end() {
        return (classification, None);
    }
    if !cursor.peek().is_some_and(|b| b.is_ascii_digit()) {
        return (classification, Some(SymbolError::TrailingText));
    }
    let err = match decode_tail(&mut cursor, &mut classification) {
        Ok(()) if !cursor.at_end() => Some(SymbolError::TrailingText),
        result => result.err(),
    };
    (classification, err)
}

struct Head {
    section: String,
    class: String,
    sub_class: String,
    main_group: String,
    sub_group: String,
}

fn decode_head(cursor: &mut Cursor<'_>) -> Result<Head, SymbolError> {
    cursor.skip_spaces();
    cursor.skip_edition();
    let section = cursor.letter().ok_or(SymbolError::MissingSection)?;
    cursor.skip_spaces();
    let class = cursor.digits(2, 2).ok_or(SymbolError::MissingClass)?;
    cursor.skip_spaces();
    let sub_class = cursor.letter().ok_or(SymbolError::MissingSubClass)?;
    cursor.skip_spaces();
    let main_group = cursor.digits(1, 4).ok_or(SymbolError::MissingMainGroup)?;
    cursor.skip_spaces();
    if !cursor.byte(b'/') {
        return Err(SymbolError::MissingSlash);
    }
    cursor.skip_spaces();
    let sub_group = cursor.digits(1, 6).ok_or(SymbolError::MissingSubGroup)?;
    Ok(Head {
        section: section.to_ascii_uppercase(),
        class,
        sub_class: sub_class.to_ascii_uppercase(),
        main_group,
        sub_group,
    })
}

fn decode_tail(cursor: &mut Cursor<'_>, out: &mut Classification) -> Result<(), SymbolError> {
    out.version = cursor.digits(8, 8).ok_or(SymbolError::BadVersion)?;
    out.classification_level = cursor.letter().ok_or(SymbolError::MissingLevel)?;
    out.first_later = cursor.letter().ok_or(SymbolError::MissingFirstLater)?;
    out.classification_value = cursor.letter().ok_or(SymbolError::MissingValue)?;
    out.action_date = cursor.digits(8, 8).ok_or(SymbolError::BadActionDate)?;
    out.original_or_reclassified = cursor.letter().ok_or(SymbolError::MissingOriginal)?;
    out.source = cursor.letter().ok_or(SymbolError::MissingSource)?;
    out.generating_office = cursor.letters(2).ok_or(SymbolError::MissingOffice)?;
    Ok(())
}
