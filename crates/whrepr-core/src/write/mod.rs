//! Write-side configuration and the failed-insert channel.
mod disposition;
mod error_info;
mod partitioning;

// re-exports
pub use disposition::{CreateDisposition, WriteDisposition};
pub use error_info::{
    Disabled, Enabled, ErrorInfoMode, ErrorProto, ExecutionContext, ExtendedErrorInfo,
    InsertErrors, InsertFailure, LocalCollection, LocalContext, WriteResult,
};
pub use partitioning::{Clustering, PartitionType, TimePartitioning, TimePartitioningWire};
