//! Parameterized failure table for GUID parsing: the parser must tell a
//! structural mismatch apart from a bad hex digit.

use bookcarve::types::errors::GuidError;
use bookcarve::types::Guid;
use rstest::rstest;

#[rstest]
#[case::empty("")]
#[case::too_short("0bc5d13f-2cba-5d74-951f-3f233fe6c90")]
#[case::too_long("0bc5d13f-2cba-5d74-951f-3f233fe6c9088")]
#[case::no_hyphens("0bc5d13f2cba5d74951f3f233fe6c908aaaa")]
#[case::hyphen_off_by_one("0bc5d13f2-cba-5d74-951f-3f233fe6c908")]
#[case::second_hyphen_wrong("0bc5d13f-2cba5-d74-951f-3f233fe6c908")]
#[case::third_hyphen_wrong("0bc5d13f-2cba-5d745-951f3f233fe6c908")]
#[case::braced("{bc5d13f-2cba-5d74-951f-3f233fe6c908}")]
#[case::multibyte_char("0bc5d13f-2cba-5d74-951f-3f233fe6c9ü8")]
fn test_structural_mismatch(#[case] input: &str) {
    assert_eq!(Guid::parse(input), Err(GuidError::InvalidFormat));
}

#[rstest]
#[case::letter_g("gbc5d13f-2cba-5d74-951f-3f233fe6c908")]
#[case::last_char("0bc5d13f-2cba-5d74-951f-3f233fe6c90z")]
#[case::space("0bc5d13f-2cba-5d74-951f-3f233fe6c90 ")]
#[case::both_nibbles_bad("xyc5d13f-2cba-5d74-951f-3f233fe6c908")]
fn test_bad_hex_digit(#[case] input: &str) {
    assert_eq!(Guid::parse(input), Err(GuidError::InvalidHex));
}

#[rstest]
#[case("00000000-0000-0000-0000-000000000000")]
#[case("0bc5d13f-2cba-5d74-951f-3f233fe6c908")]
#[case("FFFFFFFF-FFFF-FFFF-FFFF-FFFFFFFFFFFF")]
#[case("AaBbCcDd-EeFf-0011-2233-445566778899")]
fn test_valid_inputs_canonicalize_lowercase(#[case] input: &str) {
    let g = Guid::parse(input).unwrap();
    assert_eq!(g.to_string(), input.to_lowercase());
}

#[test]
fn test_two_bad_nibbles_report_once() {
    // Both nibbles of a pair invalid is still a single hex failure.
    let err = Guid::parse("zzc5d13f-2cba-5d74-951f-3f233fe6c908").unwrap_err();
    assert_eq!(err, GuidError::InvalidHex);
}
