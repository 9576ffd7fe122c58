//! Lenient number decoding for backends that serialize decimals as strings.

use serde::Deserialize;
use serde::de::{self, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

pub fn f64_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid number '{s}'"))),
    }
}

pub fn u32_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64_or_string(deserializer)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(de::Error::custom(format!("expected a whole number, got {value}")));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_u32_accepts_decimal_string() {
        assert_eq!(u32_or_string(json!("12")).unwrap(), 12);
        assert_eq!(u32_or_string(json!(" 4.0 ")).unwrap(), 4);
        assert_eq!(u32_or_string(json!(7)).unwrap(), 7);
    }

    #[test]
    fn test_u32_rejects_fractions_and_negatives() {
        assert!(u32_or_string(json!("2.5")).is_err());
        assert!(u32_or_string(json!(-1)).is_err());
        assert!(u32_or_string(json!("many")).is_err());
    }

    #[test]
    fn test_f64_accepts_decimal_string() {
        assert_eq!(f64_or_string(json!("120.5")).unwrap(), 120.5);
        assert_eq!(f64_or_string(json!(80)).unwrap(), 80.0);
    }
}
