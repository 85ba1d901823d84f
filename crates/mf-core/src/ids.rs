//! Country and route identifiers.
//!
//! `CountryCode` is a three-byte inline value (ISO 3166-1 alpha-3 style), so
//! it is `Copy` and hashes as cheaply as an integer.  `RouteKey` pairs two
//! codes and is the key of the per-route congestion table.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// A three-character upper-case country code such as `SYR` or `DEU`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct CountryCode([u8; 3]);

impl CountryCode {
    /// Parse `s`, trimming surrounding whitespace and upper-casing letters.
    pub fn new(s: &str) -> Result<Self, CoreError> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return Err(CoreError::InvalidCountryCode(s.to_owned()));
        }
        Ok(CountryCode([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for CountryCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CountryCode::new(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        CountryCode::new(&s)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> String {
        code.as_str().to_owned()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.as_str())
    }
}

/// An (origin, destination) country pair.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteKey {
    pub origin:      CountryCode,
    pub destination: CountryCode,
}

impl RouteKey {
    #[inline]
    pub fn new(origin: CountryCode, destination: CountryCode) -> Self {
        Self { origin, destination }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.origin, self.destination)
    }
}
