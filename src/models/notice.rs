//! Raw draw notices as returned by the data source.
//!
//! The endpoint is loose about JSON types (amounts arrive as strings, numbers
//! or `null` depending on the issue), so every field is read leniently and
//! kept as text until normalization.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One prize tier of a draw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeGrade {
    /// Tier number (1 = first prize)
    #[serde(rename = "type", default, deserialize_with = "lenient_i64")]
    pub grade: i64,
    /// Number of winning tickets, as published
    #[serde(default, deserialize_with = "lenient_string")]
    pub typenum: String,
    /// Prize per winning ticket, as published
    #[serde(default, deserialize_with = "lenient_string")]
    pub typemoney: String,
}

/// A draw notice exactly as the endpoint publishes it.
///
/// Serializing a notice writes the same shape back, which is what the
/// yearly JSON dumps contain and what `import` reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawNotice {
    #[serde(default, deserialize_with = "lenient_string")]
    /// Lottery display name
    pub name: String,
    /// Issue code, e.g. `2025110`
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    /// Draw date with weekday suffix, e.g. `2025-09-25(四)`
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    /// Weekday as published
    pub week: String,
    /// Comma-separated red balls
    #[serde(default, deserialize_with = "lenient_string")]
    pub red: String,
    #[serde(default, deserialize_with = "lenient_string")]
    /// Blue ball
    pub blue: String,
    #[serde(default, deserialize_with = "lenient_string")]
    /// Ticket sales, possibly with thousands separators
    pub sales: String,
    #[serde(default, deserialize_with = "lenient_string")]
    /// Jackpot pool after the draw
    pub poolmoney: String,
    #[serde(default, deserialize_with = "lenient_string")]
    /// Free-text winner summary
    pub content: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    /// Prize tiers
    pub prizegrades: Vec<PrizeGrade>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Reads a string, number, bool or `null` as text (`null` becomes empty).
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(match value {
        None => String::new(),
        Some(Scalar::Str(s)) => s,
        Some(Scalar::Int(i)) => i.to_string(),
        Some(Scalar::Float(f)) => f.to_string(),
        Some(Scalar::Bool(b)) => b.to_string(),
    })
}

/// Reads an integer given as a number or a numeric string (`null`/empty become 0).
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(0),
        Some(Scalar::Int(i)) => Ok(i),
        Some(Scalar::Float(f)) if f.fract() == 0.0 => Ok(f as i64),
        Some(Scalar::Str(s)) if s.trim().is_empty() => Ok(0),
        Some(Scalar::Str(s)) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected an integer, got {:?}", s))),
        Some(Scalar::Float(f)) => Err(D::Error::custom(format!(
            "expected an integer, got {}",
            f
        ))),
        Some(Scalar::Bool(b)) => Err(D::Error::custom(format!(
            "expected an integer, got {}",
            b
        ))),
    }
}

/// Reads a list that may be `null`.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
