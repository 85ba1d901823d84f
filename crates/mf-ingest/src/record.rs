//! Aggregate input records.

use std::fmt;

use mf_core::CountryCode;

/// One input row: `count` people moved from `origin` to `destination`
/// during `month` (1–12) of `year`.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateRecord {
    pub origin:      CountryCode,
    pub destination: CountryCode,
    /// People, possibly fractional before scaling.
    pub count:       f64,
    pub month:       u32,
    pub year:        i32,
}

/// Which data set a batch of records came from.  Both are merged into one
/// population; the source only shows up in diagnostics.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RecordSource {
    /// Asylum applications lodged in the destination country.
    Asylum,
    /// Refugees hosted in neighbouring countries of the region.
    Regional,
}

impl RecordSource {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordSource::Asylum   => "asylum",
            RecordSource::Regional => "regional",
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
