use std::{fmt, path::PathBuf};
use thiserror::Error as ThisError;

///
/// ParseTarget
///
/// Grammar a failed parse was attempted against.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParseTarget {
    Timestamp,
    Date,
    Time,
    DateTime,
    Numeric,
    TableSpec,
}

impl ParseTarget {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::Numeric => "NUMERIC",
            Self::TableSpec => "TABLE_SPEC",
        }
    }
}

impl fmt::Display for ParseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// ParseError
///
/// Input text (or raw value) matched no accepted grammar variant for the
/// target type. Always local to the call site.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid {target} input '{input}': {reason}")]
pub struct ParseError {
    pub target: ParseTarget,
    pub input: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(target: ParseTarget, input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            target,
            input: input.into(),
            reason: reason.into(),
        }
    }
}

///
/// PrecisionError
///
/// A NUMERIC value still carries more significant digits than the warehouse
/// allows after scale normalization. Indicates data genuinely out of range.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("numeric precision {precision} exceeds maximum precision {max}")]
pub struct PrecisionError {
    pub precision: u32,
    pub max: u32,
}

///
/// NumericError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NumericError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Precision(#[from] PrecisionError),
}

impl NumericError {
    #[must_use]
    pub const fn is_precision(&self) -> bool {
        matches!(self, Self::Precision(_))
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid destination table: {0}")]
    Table(#[from] ParseError),

    #[error("invalid clustering: {reason}")]
    Clustering { reason: String },
}

impl ConfigError {
    pub(crate) fn clustering(reason: impl Into<String>) -> Self {
        Self::Clustering {
            reason: reason.into(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_message_names_target_and_input() {
        let err = ParseError::new(ParseTarget::Date, "2021-13-01", "month out of range");

        assert_eq!(
            err.to_string(),
            "invalid DATE input '2021-13-01': month out of range"
        );
    }

    #[test]
    fn numeric_error_wraps_precision_transparently() {
        let err: NumericError = PrecisionError {
            precision: 39,
            max: 38,
        }
        .into();

        assert!(err.is_precision());
        assert_eq!(
            err.to_string(),
            "numeric precision 39 exceeds maximum precision 38"
        );
    }
}
