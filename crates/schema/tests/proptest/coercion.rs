//! Coercion properties: literal round-trips and integer width boundaries.

use proptest::prelude::*;
use rstest::rstest;
use serde_json::Value as Json;
use sift_schema::{CoerceError, Primitive, parse_str};

fn number(text: &str) -> Json {
    serde_json::from_str(text).unwrap()
}

fn is_overflow<T: std::fmt::Debug>(result: Result<T, CoerceError>) -> bool {
    matches!(result, Err(CoerceError::Overflow { .. }))
}

// ---------------------------------------------------------------------------
// Width boundaries
// ---------------------------------------------------------------------------

macro_rules! width_boundaries {
    (signed: $($sname:ident => $s:ty),*; unsigned: $($uname:ident => $u:ty),*) => {
        $(
            #[test]
            fn $sname() {
                let (max, min) = (i128::from(<$s>::MAX), i128::from(<$s>::MIN));
                assert_eq!(parse_str::<$s>(&max.to_string()), Ok(<$s>::MAX));
                assert_eq!(parse_str::<$s>(&min.to_string()), Ok(<$s>::MIN));
                assert!(is_overflow(parse_str::<$s>(&(max + 1).to_string())));
                assert!(is_overflow(parse_str::<$s>(&(min - 1).to_string())));
                assert!(is_overflow(<$s>::from_json(&number(&(max + 1).to_string()))));
            }
        )*
        $(
            #[test]
            fn $uname() {
                let max = u128::from(<$u>::MAX);
                assert_eq!(parse_str::<$u>(&max.to_string()), Ok(<$u>::MAX));
                assert_eq!(parse_str::<$u>("0"), Ok(0));
                assert!(is_overflow(parse_str::<$u>(&(max + 1).to_string())));
                assert!(is_overflow(parse_str::<$u>("-1")));
                assert!(is_overflow(<$u>::from_json(&number("-1"))));
            }
        )*
    };
}

width_boundaries! {
    signed: i8_boundary => i8, i16_boundary => i16, i32_boundary => i32, i64_boundary => i64;
    unsigned: u8_boundary => u8, u16_boundary => u16, u32_boundary => u32, u64_boundary => u64
}

#[rstest]
#[case::fraction("1.5")]
#[case::exponent("1e3")]
#[case::upper_exponent("2E2")]
fn integer_text_rejects_float_literals(#[case] raw: &str) {
    assert!(matches!(
        parse_str::<i32>(raw),
        Err(CoerceError::FloatToInteger { .. })
    ));
}

#[rstest]
#[case::fraction("1.5", "invalid_format")]
#[case::fraction_with_exponent("1.5e2", "invalid_format")]
#[case::exponent("1e3", "overflow")]
#[case::upper_exponent("2E2", "overflow")]
#[case::negative_zero("-0", "overflow")]
fn json_integers_must_be_canonical(#[case] raw: &str, #[case] code: &str) {
    assert_eq!(i32::from_json(&number(raw)).map_err(|e| e.code()), Err(code));
    assert_eq!(u16::from_json(&number(raw)).map_err(|e| e.code()), Err(code));
}

#[test]
fn unsigned_rejects_negative_json() {
    assert!(is_overflow(u8::from_json(&number("-1"))));
    assert!(is_overflow(u64::from_json(&number("-1"))));
    assert_eq!(u64::from_json(&number("0")), Ok(0));
}

#[test]
fn float_overflow_policy() {
    assert_eq!(f64::from_json(&number("1e400")), Ok(f64::INFINITY));
    assert_eq!(f64::from_json(&number("-1e400")), Ok(f64::NEG_INFINITY));
    assert!(is_overflow(f32::from_json(&number("1e39"))));
    assert!(is_overflow(f32::from_json(&number("1e400"))));
    assert!(is_overflow(f32::from_json(&number("-1e400"))));
    assert!(is_overflow(f32::from_json(&Json::from("-1e400"))));
    assert!(is_overflow(parse_str::<f32>("1e400")));
    assert_eq!(f32::from_json(&number("3.5")), Ok(3.5));
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn i64_literals_round_trip(n in any::<i64>()) {
        prop_assert_eq!(parse_str::<i64>(&n.to_string()), Ok(n));
        prop_assert_eq!(i64::from_json(&Json::from(n)), Ok(n));
    }

    #[test]
    fn u32_literals_round_trip(n in any::<u32>()) {
        prop_assert_eq!(parse_str::<u32>(&n.to_string()), Ok(n));
    }

    #[test]
    fn i16_accepts_exactly_its_range(n in -100_000_i64..100_000) {
        let fits = i16::try_from(n).is_ok();
        let parsed = parse_str::<i16>(&n.to_string());
        prop_assert_eq!(parsed.is_ok(), fits);
        if !fits {
            prop_assert!(is_overflow(parsed));
        }
    }

    #[test]
    fn f64_literals_round_trip(x in -1.0e300_f64..1.0e300) {
        prop_assert_eq!(parse_str::<f64>(&x.to_string()), Ok(x));
    }

    #[test]
    fn strings_pass_through(s in "\\PC*") {
        prop_assert_eq!(parse_str::<String>(&s), Ok(s.clone()));
        prop_assert_eq!(String::from_json(&Json::String(s.clone())), Ok(s));
    }

    #[test]
    fn bools_round_trip(b in any::<bool>()) {
        prop_assert_eq!(parse_str::<bool>(&b.to_string()), Ok(b));
    }

    #[test]
    fn dates_round_trip(y in 1970_i32..2100, m in 1_u32..=12, d in 1_u32..=28) {
        let text = format!("{y:04}-{m:02}-{d:02}");
        let ts = parse_str::<sift_schema::Timestamp>(&text).unwrap();
        prop_assert_eq!(ts.format("%Y-%m-%d").to_string(), text);
    }
}
