//! ## Crate layout
//! - `core`: codecs, the numeric type, sources, rows and the write channel.
//! - `Error`: one error type over every failure the core can report.
//!
//! The `prelude` module carries the vocabulary needed to encode rows and
//! route failed inserts.

pub use whrepr_core as core;
pub use whrepr_core::table_row;

use thiserror::Error as ThisError;
use whrepr_core::error::{ConfigError, NumericError, ParseError, PrecisionError};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Error
///
/// Anything `whrepr` can fail with, for callers that do not need to tell the
/// families apart.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Precision(#[from] PrecisionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<NumericError> for Error {
    fn from(err: NumericError) -> Self {
        match err {
            NumericError::Parse(err) => Self::Parse(err),
            NumericError::Precision(err) => Self::Precision(err),
        }
    }
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{Error, table_row};
    pub use whrepr_core::prelude::*;
    pub use whrepr_core::write::{
        Clustering, CreateDisposition, InsertFailure, PartitionType, TimePartitioning,
        WriteDisposition,
    };
}

///
/// TESTS
///
