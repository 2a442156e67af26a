//! Lenient decoders for row-store values.
//!
//! The hosted store returns `numeric` columns either as JSON numbers or as
//! strings depending on precision, and optional columns as `null`. These
//! helpers are used through `#[serde(deserialize_with = ...)]`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn parse_number(raw: Option<NumberOrText>) -> Option<f64> {
    match raw? {
        NumberOrText::Number(n) => Some(n),
        NumberOrText::Text(s) => s.trim().parse::<f64>().ok(),
    }
}

/// Number or numeric string; `null`, missing and unparsable values become `0.0`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(parse_number(raw).filter(|n| n.is_finite()).unwrap_or(0.0))
}

/// Non-negative whole number; fractions are truncated and negatives clamp to 0.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    let value = parse_number(raw).filter(|n| n.is_finite()).unwrap_or(0.0);
    Ok(value.max(0.0).min(u32::MAX as f64) as u32)
}

/// Percentage clamped into `0..=100`.
pub fn percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    let value = parse_number(raw).filter(|n| n.is_finite()).unwrap_or(0.0);
    Ok(value.clamp(0.0, 100.0).round() as u8)
}

/// `null` or missing falls back to the type's default (its `Unknown` variant
/// for the closed enumerations).
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Blank strings are treated as absent.
pub fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_f64")]
        amount: f64,
        #[serde(default, deserialize_with = "lenient_u32")]
        days: u32,
        #[serde(default, deserialize_with = "percent")]
        score: u8,
        #[serde(default, deserialize_with = "non_blank")]
        note: Option<String>,
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let probe: Probe =
            serde_json::from_value(json!({"amount": "12.50", "days": "7", "score": 88}))
                .unwrap();
        assert_eq!(probe.amount, 12.5);
        assert_eq!(probe.days, 7);
        assert_eq!(probe.score, 88);
    }

    #[test]
    fn test_nulls_and_garbage_fall_back() {
        let probe: Probe = serde_json::from_value(
            json!({"amount": null, "days": -3, "score": 140, "note": "   "}),
        )
        .unwrap();
        assert_eq!(probe.amount, 0.0);
        assert_eq!(probe.days, 0);
        assert_eq!(probe.score, 100);
        assert_eq!(probe.note, None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let probe: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(probe.amount, 0.0);
        assert_eq!(probe.days, 0);
        assert_eq!(probe.score, 0);
    }
}
