//! Wire codecs for warehouse scalar types.
//!
//! Every codec produces exactly one canonical textual form and accepts a
//! looser set of input variants. The raw entry point exists for generated
//! record-mapping code that hands over values without knowing their shape.
mod numeric;
mod temporal;


use crate::error::ParseError;
use std::{fmt, str::FromStr};

// re-exports
pub use numeric::NumericCodec;
pub use temporal::{DateCodec, DateTimeCodec, TimeCodec, TimestampCodec};

///
/// WireCodec
///
/// Canonical format plus permissive parse for one logical type.
///

pub trait WireCodec {
    /// Logical type this codec encodes.
    const LOGICAL_TYPE: LogicalType;

    /// Native in-memory value.
    type Value;

    /// Parse failure; every codec can at least fail with a [`ParseError`].
    type Error: From<ParseError>;

    /// Canonical textual encoding. Infallible for well-typed values.
    fn format(value: &Self::Value) -> String;

    /// Parse any accepted textual variant.
    fn parse(text: &str) -> Result<Self::Value, Self::Error>;

    /// Parse a value handed over by generated code.
    ///
    /// Text always goes through [`WireCodec::parse`]; the integer and byte
    /// encodings each codec accepts are documented on the codec.
    fn parse_raw(raw: RawValue<'_>) -> Result<Self::Value, Self::Error>;
}

///
/// RawValue
///
/// Shapes a generated caller may hand to [`WireCodec::parse_raw`].
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RawValue<'a> {
    Text(&'a str),
    Int(i64),
    Bytes(&'a [u8]),
}

impl RawValue<'_> {
    /// Short label used in error messages.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::Bytes(_) => "bytes",
        }
    }

    /// Rendering of the raw value for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Text(s) => (*s).to_string(),
            Self::Int(n) => n.to_string(),
            Self::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for RawValue<'_> {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for RawValue<'_> {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl<'a> From<&'a [u8]> for RawValue<'a> {
    fn from(b: &'a [u8]) -> Self {
        Self::Bytes(b)
    }
}

///
/// LogicalType
///
/// Warehouse type names the wire encodings are keyed by.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum LogicalType {
    Timestamp,
    Date,
    Time,
    DateTime,
    Numeric,
}

impl LogicalType {
    pub const ALL: [Self; 5] = [
        Self::Timestamp,
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::Numeric,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::Numeric => "NUMERIC",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown logical type: {s}"))
    }
}
