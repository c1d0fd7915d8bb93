use crate::row::TableRow;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

///
/// ErrorProto
///
/// One error the warehouse attached to a rejected row.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorProto {
    pub reason: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
    pub message: String,
}

impl ErrorProto {
    #[must_use]
    pub fn new(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            location: String::new(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

///
/// InsertErrors
///
/// Structured detail for one rejected row: its position in the request and
/// every error reported against it.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsertErrors {
    pub index: u64,
    pub errors: Vec<ErrorProto>,
}

///
/// InsertFailure
///
/// A rejected row together with the reason it was rejected.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct InsertFailure {
    pub row: TableRow,
    pub errors: InsertErrors,
}

impl InsertFailure {
    #[must_use]
    pub const fn new(row: TableRow, errors: InsertErrors) -> Self {
        Self { row, errors }
    }
}

///
/// WriteResult
///
/// Outcome of a streaming insert, produced by the execution client. Both
/// accessors must report the same rows in the same order.
///

pub trait WriteResult {
    fn failed_inserts_with_err(&self) -> impl Iterator<Item = InsertFailure> + '_;

    fn failed_inserts(&self) -> impl Iterator<Item = TableRow> + '_;
}

///
/// ExecutionContext
///
/// Whatever runs the pipeline. It decides what a lazy collection of failures
/// looks like; this crate only hands it an iterator.
///

pub trait ExecutionContext {
    type Collection<'a, T: 'a>;

    fn wrap<'a, T, I>(&self, items: I) -> Self::Collection<'a, T>
    where
        T: 'a,
        I: Iterator<Item = T> + 'a;
}

///
/// LocalContext
///
/// In-process context; failures are produced on demand as the collection is
/// iterated.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalContext;

impl ExecutionContext for LocalContext {
    type Collection<'a, T: 'a> = LocalCollection<'a, T>;

    fn wrap<'a, T, I>(&self, items: I) -> Self::Collection<'a, T>
    where
        T: 'a,
        I: Iterator<Item = T> + 'a,
    {
        LocalCollection(Box::new(items))
    }
}

///
/// LocalCollection
///

pub struct LocalCollection<'a, T>(Box<dyn Iterator<Item = T> + 'a>);

impl<T> Iterator for LocalCollection<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> Debug for LocalCollection<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCollection").finish_non_exhaustive()
    }
}

///
/// ErrorInfoMode
///
/// Runtime mirror of the two selectors, used by configuration and logs. The
/// failure shape itself is always decided by the selector type.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorInfoMode {
    #[display("enabled")]
    Enabled,
    #[default]
    #[display("disabled")]
    Disabled,
}

impl ErrorInfoMode {
    #[must_use]
    pub const fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Shape of each element in the failed-insert collection.
    #[must_use]
    pub const fn failure_shape(self) -> &'static str {
        match self {
            Self::Enabled => "row with insert errors",
            Self::Disabled => "row",
        }
    }
}

pub(crate) mod _priv {
    /// Restricts `ExtendedErrorInfo` to `Enabled` and `Disabled`.
    pub trait Sealed {}
}

///
/// ExtendedErrorInfo
///
/// Selects, at compile time, whether failed inserts carry their error detail.
/// Each selector fixes the element type of the collection `coll` returns.
///

pub trait ExtendedErrorInfo: _priv::Sealed + 'static {
    const MODE: ErrorInfoMode;

    type Failure: Clone + Debug + 'static;

    /// The accessor this selector reads from.
    fn failures<R>(result: &R) -> impl Iterator<Item = Self::Failure> + '_
    where
        R: WriteResult + ?Sized;

    /// Hand the failed inserts of `result` to `ctx` as its lazy collection.
    fn coll<'a, R, C>(result: &'a R, ctx: &C) -> C::Collection<'a, Self::Failure>
    where
        R: WriteResult + ?Sized,
        C: ExecutionContext,
    {
        tracing::debug!(
            mode = %Self::MODE,
            shape = Self::MODE.failure_shape(),
            "collecting failed inserts"
        );

        ctx.wrap(Self::failures(result))
    }
}

///
/// Enabled
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Enabled;

impl _priv::Sealed for Enabled {}

impl ExtendedErrorInfo for Enabled {
    const MODE: ErrorInfoMode = ErrorInfoMode::Enabled;

    type Failure = InsertFailure;

    fn failures<R>(result: &R) -> impl Iterator<Item = InsertFailure> + '_
    where
        R: WriteResult + ?Sized,
    {
        result.failed_inserts_with_err()
    }
}

///
/// Disabled
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Disabled;

impl _priv::Sealed for Disabled {}

impl ExtendedErrorInfo for Disabled {
    const MODE: ErrorInfoMode = ErrorInfoMode::Disabled;

    type Failure = TableRow;

    fn failures<R>(result: &R) -> impl Iterator<Item = TableRow> + '_
    where
        R: WriteResult + ?Sized,
    {
        result.failed_inserts()
    }
}

///
/// TESTS
///
