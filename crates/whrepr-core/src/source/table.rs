use crate::error::{ParseError, ParseTarget};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr, sync::LazyLock};

/// Longest dataset or table identifier the warehouse accepts.
const MAX_IDENTIFIER_LEN: usize = 1_024;

// [project(:|.)]dataset.table; projects may themselves contain ':' or '.'
// (domain-scoped projects), tables may carry a '$' partition decorator.
// Identifier lengths are checked after matching to keep the automaton small.
static TABLE_SPEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<project>[A-Za-z0-9][-A-Za-z0-9_:.]*)[:.])?(?P<dataset>[A-Za-z0-9_]+)\.(?P<table>[\p{L}\p{M}\p{N}\p{Pc}\p{Pd}\p{Zs}$]+)$",
    )
    .expect("table spec pattern compiles")
});

///
/// TableReference
///
/// Structured project / dataset / table triple. The project is optional and
/// resolved by the execution client when absent.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub dataset_id: String,
    pub table_id: String,
}

impl TableReference {
    #[must_use]
    pub fn new(dataset_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self {
            project_id: None,
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }

    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Canonical spec string: `project:dataset.table` or `dataset.table`.
    ///
    /// Ids are joined as given. An id holding a separator (`ds` + `a.b`
    /// gives `ds.a.b`) yields a spec that parses back as a different
    /// reference; see [`TableReference::spec_round_trips`].
    #[must_use]
    pub fn to_spec(&self) -> String {
        match &self.project_id {
            Some(project) => format!("{project}:{}.{}", self.dataset_id, self.table_id),
            None => format!("{}.{}", self.dataset_id, self.table_id),
        }
    }

    /// True when `to_spec` parses back to this exact reference.
    #[must_use]
    pub fn spec_round_trips(&self) -> bool {
        Self::parse_spec(&self.to_spec()).is_ok_and(|parsed| parsed == *self)
    }

    /// Parse `[project:]dataset.table`; `project.dataset.table` is also
    /// accepted.
    pub fn parse_spec(spec: &str) -> Result<Self, ParseError> {
        let err = |reason: &str| ParseError::new(ParseTarget::TableSpec, spec, reason);

        let caps = TABLE_SPEC
            .captures(spec)
            .ok_or_else(|| err("expected [project:]dataset.table"))?;

        let dataset_id = &caps["dataset"];
        let table_id = &caps["table"];
        if dataset_id.len() > MAX_IDENTIFIER_LEN
            || table_id.chars().count() > MAX_IDENTIFIER_LEN
        {
            return Err(err("dataset and table ids are limited to 1024 characters"));
        }

        Ok(Self {
            project_id: caps.name("project").map(|m| m.as_str().to_string()),
            dataset_id: dataset_id.to_string(),
            table_id: table_id.to_string(),
        })
    }
}

///
/// Table
///
/// A resolvable physical table. Built either from a structured reference
/// (never fails) or from a spec string (parsed up front). Both forms are
/// stored, so `spec()` and `reference()` always describe the same table.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Table {
    reference: TableReference,
    spec: String,
}

impl Table {
    /// Never fails. The stored spec is the reference joined as given, so it
    /// only re-parses to the same reference when
    /// [`TableReference::spec_round_trips`] holds.
    #[must_use]
    pub fn from_ref(reference: TableReference) -> Self {
        let spec = reference.to_spec();

        Self { reference, spec }
    }

    /// Parse a spec string. The stored spec is the canonical form, so
    /// `proj.ds.tbl` is kept as `proj:ds.tbl` and `spec()` may differ from
    /// the input.
    pub fn from_spec(spec: &str) -> Result<Self, ParseError> {
        TableReference::parse_spec(spec).map(Self::from_ref)
    }

    /// Canonical spec string.
    #[must_use]
    pub fn spec(&self) -> &str {
        &self.spec
    }

    #[must_use]
    pub const fn reference(&self) -> &TableReference {
        &self.reference
    }

    #[must_use]
    pub fn into_reference(self) -> TableReference {
        self.reference
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

impl From<TableReference> for Table {
    fn from(reference: TableReference) -> Self {
        Self::from_ref(reference)
    }
}

impl FromStr for Table {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_spec(s)
    }
}

// Serde: the spec string.
impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.spec)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_spec(&s).map_err(serde::de::Error::custom)
    }
}

///
/// TESTS
///
