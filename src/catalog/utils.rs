use serde::{Deserialize, Deserializer};

/// Placeholder the provider sends in place of missing data.
pub const NOT_AVAILABLE: &str = "N/A";

pub fn is_not_available(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_AVAILABLE)
}

/// Decodes an optional provider string, folding the `"N/A"` sentinel and blanks into `None`.
pub fn deserialize_not_available<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !is_not_available(text)))
}

/// `totalResults` arrives as a decimal string; numbers are accepted too and
/// anything unparsable counts as zero.
pub fn deserialize_total_results<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;

    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a result count as string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.trim().parse().unwrap_or(0))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(u32::try_from(value).unwrap_or(u32::MAX))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(0)
        }
    }

    deserializer.deserialize_any(Visitor)
}
