use crate::codec::WireCodec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

///
/// TableRow
///
/// A single warehouse row: column names mapped to JSON values, in the order
/// they were added. Scalar columns hold their canonical wire text.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TableRow(Map<String, Value>);

impl TableRow {
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a row from ordered pairs; a repeated key keeps its first position
    /// and its last value.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect()
    }

    /// Set a column, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a column to the canonical wire text of a scalar value.
    pub fn set_encoded<C: WireCodec>(
        &mut self,
        key: impl Into<String>,
        value: &C::Value,
    ) -> Option<Value> {
        self.set(key, C::format(value))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Decode a text column through a codec. `None` when the column is
    /// missing or not a string.
    pub fn get_decoded<C: WireCodec>(&self, key: &str) -> Option<Result<C::Value, C::Error>> {
        self.get(key).and_then(Value::as_str).map(C::parse)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl FromIterator<(String, Value)> for TableRow {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TableRow {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Map<String, Value>> for TableRow {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

///
/// TESTS
///
