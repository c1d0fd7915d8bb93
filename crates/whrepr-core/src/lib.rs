//! Core runtime for whrepr: scalar wire codecs, the numeric value type, data
//! source references, the write-error channel and write-side configuration.
#![warn(unreachable_pub)]

#[macro_use]
mod macros;

// public exports are one module level down
pub mod codec;
pub mod config;
pub mod error;
pub mod row;
pub mod source;
pub mod types;
pub mod write;

/// re-exports
///
/// macros expand against these so callers do not need serde_json themselves
#[doc(hidden)]
pub mod __reexports {
    pub use serde_json;
}

///
/// CONSTANTS
///

/// Maximum number of significant digits a NUMERIC value may carry.
pub const NUMERIC_MAX_PRECISION: u32 = 38;

/// Maximum number of fractional digits a NUMERIC value may carry.
pub const NUMERIC_MAX_SCALE: u32 = 9;

/// Maximum number of clustering fields a table may declare.
pub const MAX_CLUSTERING_FIELDS: usize = 4;

///
/// Prelude
///
/// Domain vocabulary only: value types, codecs, sources and the write
/// channel.
///

pub mod prelude {
    pub use crate::{
        codec::{
            DateCodec, DateTimeCodec, LogicalType, NumericCodec, RawValue, TimeCodec,
            TimestampCodec, WireCodec,
        },
        config::WriteConfig,
        row::TableRow,
        source::{Query, Source, Table, TableReference},
        types::Numeric,
        write::{
            Disabled, Enabled, ErrorInfoMode, ExecutionContext, ExtendedErrorInfo, LocalContext,
            WriteResult,
        },
    };
}
