use assert_matches::assert_matches;
use rstest::rstest;

use crate::decode::{
    contract_ref_from_wire, decode_lootbox_item, hex_to_ascii, le_hex_to_be_hex, le_hex_to_u64, DecodeError,
};

#[rstest]
#[case("01", "01")]
#[case("0102", "0201")]
#[case("0a0b0c0d", "0d0c0b0a")]
fn le_hex_reversal(#[case] le: &str, #[case] be: &str) {
    assert_eq!(le_hex_to_be_hex(le).unwrap(), be);
}

#[rstest]
fn le_hex_reversal_round_trips() {
    let input = "0123456789abcdef";
    let once = le_hex_to_be_hex(input).unwrap();
    assert_eq!(le_hex_to_be_hex(&once).unwrap(), input);
}

#[rstest]
fn reversal_round_trips_for_every_hash_width() {
    for len in 1..=64usize {
        let bytes: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let input = hex::encode(&bytes);
        let once = le_hex_to_be_hex(&input).unwrap();
        assert_eq!(le_hex_to_be_hex(&once).unwrap(), input, "width {len}");
    }
}

#[rstest]
fn le_hex_rejects_non_hex_input() {
    assert_matches!(le_hex_to_be_hex("zz"), Err(DecodeError::InvalidHex { .. }));
}

#[rstest]
#[case("00", 0)]
#[case("2a", 42)]
#[case("0001", 256)]
#[case("2a00000000000000", 42)]
#[case("ffffffffffffffff", u64::MAX)]
fn le_hex_integers(#[case] le: &str, #[case] expected: u64) {
    assert_eq!(le_hex_to_u64(le, "test value").unwrap(), expected);
}

#[rstest]
fn zero_padding_beyond_eight_bytes_is_tolerated() {
    assert_eq!(le_hex_to_u64("2a000000000000000000", "test value").unwrap(), 42);
}

#[rstest]
fn nonzero_ninth_byte_overflows() {
    assert_matches!(le_hex_to_u64("000000000000000001", "test value"), Err(DecodeError::Overflow { .. }));
}

#[rstest]
fn hex_packed_text_decodes_to_utf8() {
    assert_eq!(hex_to_ascii("53776f7264").unwrap(), "Sword");
}

#[rstest]
fn invalid_utf8_is_rejected() {
    assert_matches!(hex_to_ascii("ff"), Err(DecodeError::InvalidUtf8 { .. }));
}

#[rstest]
fn contract_ref_reverses_and_prefixes() {
    let wire = "0100000000000000000000000000000000000000000000000000000000000000";
    assert_eq!(
        contract_ref_from_wire(wire).unwrap(),
        "hash-0000000000000000000000000000000000000000000000000000000000000001"
    );
}

#[rstest]
fn lootbox_item_slices_at_fixed_offsets() {
    // id 1, rarity 2, token id 42, then the hex-packed name.
    let blob = format!("{}{}{}{}", "0100000000000000", "0200000000000000", "2a00000000000000", "53776f7264");

    let item = decode_lootbox_item(&blob).unwrap();

    assert_eq!(item.id, 1);
    assert_eq!(item.rarity, 2);
    assert_eq!(item.token_id, 42);
    assert_eq!(item.name, "Sword");
}

#[rstest]
fn lootbox_item_allows_an_empty_name() {
    let blob = format!("{}{}{}", "0300000000000000", "0100000000000000", "0700000000000000");

    let item = decode_lootbox_item(&blob).unwrap();

    assert_eq!(item.id, 3);
    assert_eq!(item.name, "");
}

#[rstest]
fn truncated_lootbox_blob_is_rejected() {
    assert_matches!(decode_lootbox_item("01000000"), Err(DecodeError::TooShort { expected: 48, got: 8, .. }));
}

#[rstest]
fn multibyte_lootbox_blob_is_rejected_as_bad_hex() {
    // Long enough to pass a raw length check, but not hex at all.
    let blob = "€".repeat(17);
    assert_matches!(decode_lootbox_item(&blob), Err(DecodeError::InvalidHex { .. }));
}
