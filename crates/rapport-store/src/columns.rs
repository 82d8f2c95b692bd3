//! Flattening form records into text columns and back.
//!
//! Column names are the snake_case form of the record's serialized keys.
//! Scalars are stored as-is; list fields are stored as JSON text.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Column {
    key: String,
    pub name: String,
    list: bool,
}

/// Column layout of a record type, taken from its default value.
pub(crate) fn layout<T: Serialize + Default>() -> Result<Vec<Column>, StoreError> {
    let fields = as_object(&T::default())?;
    Ok(fields
        .into_iter()
        .map(|(key, value)| Column {
            name: snake_case(&key),
            list: value.is_array(),
            key,
        })
        .collect())
}

/// One text value per column, in layout order.
pub(crate) fn flatten<T: Serialize>(
    record: &T,
    columns: &[Column],
) -> Result<Vec<String>, StoreError> {
    let fields = as_object(record)?;
    columns
        .iter()
        .map(|col| -> Result<String, StoreError> {
            match fields.get(&col.key) {
                Some(Value::String(s)) => Ok(s.clone()),
                Some(Value::Array(items)) => Ok(serde_json::to_string(items)?),
                None if col.list => Ok("[]".to_string()),
                None => Ok(String::new()),
                Some(other) => Err(StoreError::Other(format!(
                    "unexpected value for {}: {other}",
                    col.key
                ))),
            }
        })
        .collect()
}

/// Rebuild a record from text values in layout order.
pub(crate) fn rebuild<T: DeserializeOwned>(
    columns: &[Column],
    values: Vec<String>,
) -> Result<T, StoreError> {
    let mut fields = Map::new();
    for (col, text) in columns.iter().zip(values) {
        let value = if col.list {
            serde_json::from_str(&text)?
        } else {
            Value::String(text)
        };
        fields.insert(col.key.clone(), value);
    }
    Ok(serde_json::from_value(Value::Object(fields))?)
}

fn as_object<T: Serialize>(record: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(StoreError::Other("record did not serialize to an object".into())),
    }
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
