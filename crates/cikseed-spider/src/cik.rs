use serde::de::{self, Visitor};
use serde::Deserializer;
use std::fmt;

/// Number of digits in a canonical CIK.
pub const CIK_LEN: usize = 10;

/// A Central Index Key in canonical form: exactly 10 ASCII digits, zero-padded on the left.
///
/// The only way to build one is [`Cik::parse`], so anything holding a `Cik` can hand it to the
/// SEC or the database as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cik(String);

impl Cik {
    /// Canonicalize `raw` and validate the result.
    ///
    /// ```rust
    /// use cikseed_spider::cik::Cik;
    ///
    /// assert_eq!(Cik::parse("320193").unwrap().as_str(), "0000320193");
    /// assert!(Cik::parse("32O193").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, InvalidCik> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidCik(raw.to_string()));
        }
        let padded = canon(trimmed);
        if is_valid_cik(&padded) {
            Ok(Self(padded))
        } else {
            Err(InvalidCik(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cik {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("\"{0}\" is not a valid CIK")]
pub struct InvalidCik(pub String);

/// Left-pad `cik` with zeros until it is at least 10 characters long.
///
/// The SEC trims leading zeros in some payloads, e.g. `"320193"` for Apple's `"0000320193"`.
/// Strings already 10 characters or longer come back unchanged.
pub fn canon(cik: &str) -> String {
    let missing = CIK_LEN.saturating_sub(cik.chars().count());
    let mut padded = String::with_capacity(cik.len() + missing);
    padded.extend(std::iter::repeat('0').take(missing));
    padded.push_str(cik);
    padded
}

/// Exactly 10 characters, every one an ASCII decimal digit.
pub fn is_valid_cik(candidate: &str) -> bool {
    candidate.len() == CIK_LEN && candidate.bytes().all(|b| b.is_ascii_digit())
}

/// Deserialize a CIK given either as a JSON string or as a JSON number, returning the raw
/// (not yet padded) digits.
pub(crate) fn de_cik<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct CikVisitor;

    impl<'de> Visitor<'de> for CikVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a CIK as a string or an unsigned integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u64::try_from(value)
                .map(|v| v.to_string())
                .map_err(|_| E::custom(format!("negative CIK {value}")))
        }
    }

    deserializer.deserialize_any(CikVisitor)
}
