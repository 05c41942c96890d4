use super::*;
use pretty_assertions::assert_eq;

#[test]
fn new_rejects_out_of_range() {
    assert!(IntValue::new(IntKind::Uint8, 255).is_some());
    assert!(IntValue::new(IntKind::Uint8, 256).is_none());
    assert!(IntValue::new(IntKind::Uint8, -1).is_none());
    assert!(IntValue::new(IntKind::Int8, -128).is_some());
    assert!(IntValue::new(IntKind::Uint64, i128::from(u64::MAX)).is_some());
}

#[test]
fn wrapping_truncates_twos_complement() {
    assert_eq!(IntValue::wrapping(IntKind::Uint8, 256).as_i128(), 0);
    assert_eq!(IntValue::wrapping(IntKind::Uint8, -1).as_i128(), 255);
    assert_eq!(IntValue::wrapping(IntKind::Int8, 200).as_i128(), -56);
    assert_eq!(IntValue::wrapping(IntKind::Int8, -129).as_i128(), 127);
    assert_eq!(
        IntValue::wrapping(IntKind::Int64, i128::from(i64::MAX) + 1).as_i128(),
        i128::from(i64::MIN)
    );
    assert_eq!(
        IntValue::wrapping(IntKind::Uint, -1).as_i128(),
        i128::from(u64::MAX)
    );
}

#[test]
fn saturating_clamps() {
    assert_eq!(IntValue::saturating(IntKind::Int16, 1 << 20).as_i128(), 32767);
    assert_eq!(IntValue::saturating(IntKind::Uint32, -5).as_i128(), 0);
}

#[test]
fn kinds_distinguish_equal_payloads() {
    assert_ne!(IntValue::int(7), IntValue::new(IntKind::Uint8, 7).unwrap());
    assert_eq!(IntValue::int(7), IntValue::new(IntKind::Int, 7).unwrap());
}

#[test]
fn as_i64_fails_for_large_unsigned() {
    let big = IntValue::new(IntKind::Uint64, i128::from(u64::MAX)).unwrap();
    assert_eq!(big.as_i64(), None);
    assert_eq!(IntValue::int(-3).as_i64(), Some(-3));
}

#[test]
fn debug_shows_kind() {
    assert_eq!(
        format!("{:?}", IntValue::new(IntKind::Int32, -4).unwrap()),
        "int32(-4)"
    );
    assert_eq!(IntValue::int(12).to_string(), "12");
}
