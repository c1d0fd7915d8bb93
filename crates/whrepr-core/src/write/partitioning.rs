use crate::{MAX_CLUSTERING_FIELDS, error::ConfigError};
use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

///
/// PartitionType
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartitionType {
    #[default]
    #[display("DAY")]
    Day,
    #[display("HOUR")]
    Hour,
    #[display("MONTH")]
    Month,
    #[display("YEAR")]
    Year,
}

///
/// TimePartitioning
///
/// How a destination table is split by time. An expiration of zero or below
/// means partitions never expire.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TimePartitioning {
    #[serde(rename = "type")]
    pub partition_type: PartitionType,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub expiration_ms: i64,
    #[serde(default)]
    pub require_partition_filter: bool,
}

impl TimePartitioning {
    #[must_use]
    pub const fn new(partition_type: PartitionType) -> Self {
        Self {
            partition_type,
            field: None,
            expiration_ms: 0,
            require_partition_filter: false,
        }
    }

    /// Partition on this column instead of ingestion time.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub const fn with_expiration_ms(mut self, expiration_ms: i64) -> Self {
        self.expiration_ms = expiration_ms;
        self
    }

    #[must_use]
    pub const fn with_require_partition_filter(mut self, require: bool) -> Self {
        self.require_partition_filter = require;
        self
    }

    #[must_use]
    pub const fn expires(&self) -> bool {
        self.expiration_ms > 0
    }

    /// Wire object; unset options are left out rather than sent as zero.
    #[must_use]
    pub fn to_wire(&self) -> TimePartitioningWire {
        TimePartitioningWire {
            partition_type: self.partition_type,
            field: self.field.clone(),
            expiration_ms: self.expires().then_some(self.expiration_ms),
            require_partition_filter: self.require_partition_filter,
        }
    }
}

///
/// TimePartitioningWire
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePartitioningWire {
    #[serde(rename = "type")]
    pub partition_type: PartitionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_ms: Option<i64>,
    pub require_partition_filter: bool,
}

///
/// Clustering
///
/// Ordered clustering columns, one to four of them, no repeats.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Clustering {
    fields: Vec<String>,
}

impl Clustering {
    pub fn new<I, S>(fields: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();

        if fields.is_empty() {
            return Err(ConfigError::clustering("at least one field is required"));
        }
        if fields.len() > MAX_CLUSTERING_FIELDS {
            return Err(ConfigError::clustering(format!(
                "{} fields given, at most {MAX_CLUSTERING_FIELDS} are allowed",
                fields.len()
            )));
        }

        let mut seen = HashSet::with_capacity(fields.len());
        if let Some(dup) = fields.iter().find(|field| !seen.insert(field.as_str())) {
            return Err(ConfigError::clustering(format!("field '{dup}' repeated")));
        }

        Ok(Self { fields })
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl<'de> Deserialize<'de> for Clustering {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            fields: Vec<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.fields).map_err(serde::de::Error::custom)
    }
}

///
/// TESTS
///
