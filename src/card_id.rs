//! Card ID parsing
//!
//! Parses card slot identifiers like "#3" or "3" into a validated slot index.
//! Every `#` in the input is a marker and is stripped before the numeral is read,
//! so "#3", "3" and "#3#" all name slot 3.

use crate::{ReadoutError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of physical card slots
pub const CARD_SLOT_COUNT: usize = 8;

/// Marker character conventionally prefixed to card IDs
const MARKER: char = '#';

/// A validated card slot index in `[CardId::MIN, CardId::MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(u8);

impl CardId {
    /// Lowest valid slot
    pub const MIN: CardId = CardId(0);
    /// Highest valid slot
    pub const MAX: CardId = CardId(CARD_SLOT_COUNT as u8 - 1);

    /// Create a card ID, returning None if `value` is not a valid slot
    pub fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX.0 {
            Some(CardId(value))
        } else {
            None
        }
    }

    /// The slot number
    pub fn value(self) -> u8 {
        self.0
    }

    /// The slot number as an index, for per-slot tables
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Every valid slot, lowest first
    pub fn all() -> impl Iterator<Item = CardId> {
        (Self::MIN.0..=Self::MAX.0).map(CardId)
    }
}

/// Parse a card ID such as "#3" or "3"
///
/// All `#` characters are removed, wherever they appear. The remainder must be a
/// base-10 integer in `0..=7`.
///
/// # Errors
/// Returns [`ReadoutError::ParseError`] when the remainder is not an integer
/// (empty, non-numeric, overflowing) or when the integer is outside the slot range.
pub fn parse_card_id(input: &str) -> Result<CardId> {
    let numeral: String = input.chars().filter(|&c| c != MARKER).collect();

    let value: i64 = numeral
        .parse()
        .map_err(|_| ReadoutError::ParseError(format!("Malformed card ID: '{input}'")))?;

    CardId::try_from(value)
}

/// Parse a comma-separated list of card IDs like "#0, #3,5"
///
/// Empty entries are skipped. The first invalid entry fails the whole list.
pub fn parse_card_id_list(s: &str) -> Result<Vec<CardId>> {
    s.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_card_id)
        .collect()
}

impl TryFrom<i64> for CardId {
    type Error = ReadoutError;

    fn try_from(value: i64) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .and_then(CardId::new)
            .ok_or_else(|| ReadoutError::ParseError("Card ID out of range".to_string()))
    }
}

impl FromStr for CardId {
    type Err = ReadoutError;

    fn from_str(s: &str) -> Result<Self> {
        parse_card_id(s)
    }
}

impl From<CardId> for u8 {
    fn from(id: CardId) -> Self {
        id.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MARKER}{}", self.0)
    }
}

impl Serialize for CardId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept both the bare integer and any textual form the parser accepts
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum CardIdData {
            Number(i64),
            Text(String),
        }

        let parsed = match CardIdData::deserialize(deserializer)? {
            CardIdData::Number(n) => CardId::try_from(n),
            CardIdData::Text(s) => parse_card_id(&s),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
