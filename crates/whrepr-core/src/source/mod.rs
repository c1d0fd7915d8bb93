//! Addressable data sources: a free-form query or a physical table.
mod table;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use table::{Table, TableReference};

///
/// Source
///
/// Closed set of things a read can be issued against. No third variant is
/// valid.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Source {
    Query(Query),
    Table(Table),
}

impl Source {
    #[must_use]
    pub fn query(sql: impl Into<String>) -> Self {
        Self::Query(Query::new(sql))
    }

    #[must_use]
    pub const fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::Query(_) => None,
        }
    }

    #[must_use]
    pub const fn as_query(&self) -> Option<&Query> {
        match self {
            Self::Query(query) => Some(query),
            Self::Table(_) => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(query) => fmt::Display::fmt(query, f),
            Self::Table(table) => fmt::Display::fmt(table, f),
        }
    }
}

impl From<Query> for Source {
    fn from(query: Query) -> Self {
        Self::Query(query)
    }
}

impl From<Table> for Source {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

///
/// Query
///
/// Opaque query text. Accepted verbatim; validation happens when the
/// execution client submits it.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

///
/// TESTS
///
