//! Pure byte-level decoding of raw contract storage values.
//!
//! On-chain integers and hashes arrive as little-endian hex strings; names and
//! descriptions arrive hex-packed. Nothing in here performs I/O. Malformed
//! input is a [`DecodeError`], which is a hard failure distinct from a value
//! simply being absent on-chain.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid hex in {context}: {source}")]
    InvalidHex {
        context: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("{context} is too short: expected at least {expected} hex chars, got {got}")]
    TooShort { context: &'static str, expected: usize, got: usize },

    #[error("decoded {context} is not valid utf-8")]
    InvalidUtf8 { context: &'static str },

    #[error("{context} does not fit in a u64")]
    Overflow { context: &'static str },
}

fn decode_hex(hex_str: &str, context: &'static str) -> Result<Vec<u8>, DecodeError> {
    hex::decode(hex_str).map_err(|source| DecodeError::InvalidHex { context, source })
}

/// Reverses the byte order of a little-endian hex string, producing the
/// conventional big-endian display hex. Applying it twice round-trips.
pub fn le_hex_to_be_hex(hex_str: &str) -> Result<String, DecodeError> {
    let mut bytes = decode_hex(hex_str, "little-endian value")?;
    bytes.reverse();
    Ok(hex::encode(bytes))
}

/// Interprets a little-endian hex string as an unsigned integer.
pub fn le_hex_to_u64(hex_str: &str, context: &'static str) -> Result<u64, DecodeError> {
    let bytes = decode_hex(hex_str, context)?;
    if bytes.iter().skip(8).any(|b| *b != 0) {
        return Err(DecodeError::Overflow { context });
    }
    Ok(bytes.iter().take(8).rev().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

/// Decodes a hex-packed text field (two hex chars per byte) into a string.
pub fn hex_to_ascii(hex_str: &str) -> Result<String, DecodeError> {
    let bytes = decode_hex(hex_str, "hex-packed text")?;
    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { context: "hex-packed text" })
}

/// Turns a 32-byte little-endian hash from the wire into a `hash-<be-hex>`
/// contract reference.
pub fn contract_ref_from_wire(hex_str: &str) -> Result<String, DecodeError> {
    Ok(format!("hash-{}", le_hex_to_be_hex(hex_str)?))
}

/// A single lootbox item, sliced out of the flat dictionary blob.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LootboxItem {
    pub id: u64,
    pub rarity: u64,
    pub token_id: u64,
    pub name: String,
}

// Offsets below are in hex chars and are part of the wire contract:
// [0, 16) id, [16, 32) rarity, [32, 48) token id, [48, ..) name.
const ID_RANGE: std::ops::Range<usize> = 0..16;
const RARITY_RANGE: std::ops::Range<usize> = 16..32;
const TOKEN_ID_RANGE: std::ops::Range<usize> = 32..48;
const NAME_START: usize = 48;

/// Decodes a lootbox item record from its fixed-offset byte blob.
pub fn decode_lootbox_item(blob_hex: &str) -> Result<LootboxItem, DecodeError> {
    // The whole blob must be valid hex before the fixed-offset slices cut
    // into it; anything else (including multi-byte characters) is rejected
    // here rather than at a slice boundary.
    decode_hex(blob_hex, "lootbox item blob")?;
    if blob_hex.len() < NAME_START {
        return Err(DecodeError::TooShort {
            context: "lootbox item blob",
            expected: NAME_START,
            got: blob_hex.len(),
        });
    }

    Ok(LootboxItem {
        id: le_hex_to_u64(&blob_hex[ID_RANGE], "lootbox item id")?,
        rarity: le_hex_to_u64(&blob_hex[RARITY_RANGE], "lootbox item rarity")?,
        token_id: le_hex_to_u64(&blob_hex[TOKEN_ID_RANGE], "lootbox item token id")?,
        name: hex_to_ascii(&blob_hex[NAME_START..])?,
    })
}
