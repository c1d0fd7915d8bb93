use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// CreateDisposition
///
/// Whether a write may create its destination table.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreateDisposition {
    #[default]
    #[display("CREATE_IF_NEEDED")]
    CreateIfNeeded,
    #[display("CREATE_NEVER")]
    CreateNever,
}

///
/// WriteDisposition
///
/// What happens to rows already in the destination.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteDisposition {
    #[display("WRITE_EMPTY")]
    WriteEmpty,
    #[display("WRITE_TRUNCATE")]
    WriteTruncate,
    #[default]
    #[display("WRITE_APPEND")]
    WriteAppend,
}

impl WriteDisposition {
    /// True when existing rows survive the write.
    #[must_use]
    pub const fn preserves_rows(self) -> bool {
        !matches!(self, Self::WriteTruncate)
    }
}
