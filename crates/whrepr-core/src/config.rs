//! TOML-loadable write configuration.
use crate::{
    error::ConfigError,
    source::Table,
    write::{Clustering, CreateDisposition, ErrorInfoMode, TimePartitioning, WriteDisposition},
};
use serde::Deserialize;
use std::{fs, path::Path};

///
/// WriteConfig
///
/// Everything a streaming write needs besides the rows themselves.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WriteConfig {
    pub table: Table,
    pub extended_error_info: bool,
    pub create_disposition: Option<CreateDisposition>,
    pub write_disposition: Option<WriteDisposition>,
    pub time_partitioning: Option<TimePartitioning>,
    pub clustering: Option<Clustering>,
}

// File layout; table and clustering are validated after deserializing so
// their failures keep their own error variants.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WriteConfigFile {
    table: String,
    #[serde(default)]
    extended_error_info: bool,
    #[serde(default)]
    create_disposition: Option<CreateDisposition>,
    #[serde(default)]
    write_disposition: Option<WriteDisposition>,
    #[serde(default)]
    time_partitioning: Option<TimePartitioning>,
    #[serde(default)]
    clustering: Option<ClusteringFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClusteringFile {
    fields: Vec<String>,
}

impl WriteConfig {
    #[must_use]
    pub const fn new(table: Table) -> Self {
        Self {
            table,
            extended_error_info: false,
            create_disposition: None,
            write_disposition: None,
            time_partitioning: None,
            clustering: None,
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: WriteConfigFile = toml::from_str(source)?;

        let config = Self {
            table: Table::from_spec(&file.table)?,
            extended_error_info: file.extended_error_info,
            create_disposition: file.create_disposition,
            write_disposition: file.write_disposition,
            time_partitioning: file.time_partitioning,
            clustering: file
                .clustering
                .map(|clustering| Clustering::new(clustering.fields))
                .transpose()?,
        };

        tracing::debug!(
            table = %config.table,
            error_info = %config.error_info_mode(),
            partitioned = config.time_partitioning.is_some(),
            clustered = config.clustering.is_some(),
            "loaded write config"
        );

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::trace!(path = %path.display(), "reading write config");

        Self::from_toml_str(&source)
    }

    #[must_use]
    pub const fn error_info_mode(&self) -> ErrorInfoMode {
        ErrorInfoMode::from_enabled(self.extended_error_info)
    }
}

///
/// TESTS
///
