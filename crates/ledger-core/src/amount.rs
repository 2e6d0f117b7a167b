//! Serde encoding for transaction amounts.
//!
//! Finite amounts are plain JSON numbers. JSON has no literal for NaN or the
//! infinities (serde_json writes them as `null`), so those are written as the
//! strings `"NaN"`, `"-NaN"`, `"inf"` and `"-inf"`. Every amount therefore has
//! a distinct encoding and parses back.

use serde::{de, Deserialize, Deserializer, Serializer};

const NAN: &str = "NaN";
const NEG_NAN: &str = "-NaN";
const INF: &str = "inf";
const NEG_INF: &str = "-inf";

pub fn serialize<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if amount.is_finite() {
        return serializer.serialize_f64(*amount);
    }
    let tag = match (amount.is_nan(), amount.is_sign_negative()) {
        (true, false) => NAN,
        (true, true) => NEG_NAN,
        (false, false) => INF,
        (false, true) => NEG_INF,
    };
    serializer.serialize_str(tag)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Tag(String),
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => Ok(n),
        Repr::Tag(tag) => match tag.as_str() {
            NAN => Ok(f64::NAN),
            NEG_NAN => Ok(-f64::NAN),
            INF => Ok(f64::INFINITY),
            NEG_INF => Ok(f64::NEG_INFINITY),
            other => Err(de::Error::custom(format!(
                "unknown amount {other:?}, expected a number or one of NaN, -NaN, inf, -inf"
            ))),
        },
    }
}
