//! Field selection and projection
//!
//! Records handed to the display layer are ordered `(name, value)` lists.
//! A [`FieldSelection`] names the fields a user asked to see; [`project`]
//! cuts a record down to those fields while keeping the record's own order.
//! An empty selection means "everything".

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// One `(name, value)` row of a record handed to the display layer
pub type FieldRow = (String, String);

/// Deserialize a string or vec of strings into a set of field names.
/// A single string is split on whitespace, so `fields=handle name` works.
fn tokens_or_vec<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct TokensOrVec;

    impl<'de> Visitor<'de> for TokensOrVec {
        type Value = BTreeSet<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a whitespace separated string or array of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.split_whitespace().map(str::to_string).collect())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut set = BTreeSet::new();
            while let Some(value) = seq.next_element::<String>()? {
                set.insert(value);
            }
            Ok(set)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(BTreeSet::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(BTreeSet::new())
        }
    }

    deserializer.deserialize_any(TokensOrVec)
}

/// A set of requested field names. Empty selects all fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSelection {
    #[serde(deserialize_with = "tokens_or_vec")]
    names: BTreeSet<String>,
}

impl FieldSelection {
    /// The selection that keeps every field
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a selection from whitespace separated user input
    pub fn from_tokens(input: &str) -> Self {
        input.split_whitespace().collect()
    }

    pub fn is_all(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a field with this name should be shown
    pub fn includes(&self, name: &str) -> bool {
        self.is_all() || self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Project an ordered record onto the selected fields.
///
/// Output order follows `record`, never the selection. Selected names with
/// no matching field are ignored.
pub fn project<K, V>(record: &[(K, V)], selection: &FieldSelection) -> Vec<(K, V)>
where
    K: AsRef<str> + Clone,
    V: Clone,
{
    record
        .iter()
        .filter(|(name, _)| selection.includes(name.as_ref()))
        .cloned()
        .collect()
}

/// Project a JSON object, in its key order, onto the selected fields
pub fn project_map(record: &Map<String, Value>, selection: &FieldSelection) -> Vec<(String, Value)> {
    record
        .iter()
        .filter(|(name, _)| selection.includes(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Render a JSON value the way it is shown in a key/value row:
/// strings unquoted, arrays comma-joined, null as empty.
pub fn value_to_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_display)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
