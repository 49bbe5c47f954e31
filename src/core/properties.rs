//! Extra properties attached to a single log call
//!
//! This module provides:
//! - `FieldValue`: a loosely-typed property value
//! - `Properties`: the bag of named values a caller passes along with a message
//! - Reserved property key names shared by the builder, sinks and layout

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Reserved property names
///
/// External log search tooling keys off these exact strings.
pub mod keys {
    pub const TIMESTAMP: &str = "timestamp";
    pub const LOG_LEVEL: &str = "loglevel";
    pub const MESSAGE: &str = "message";
    pub const EXCEPTION: &str = "exception";
    /// Prefix for every entry in an exception's data bag
    pub const EXCEPTION_DATA_PREFIX: &str = "exceptionData_";
    pub const HOST: &str = "host";
    pub const PROCESS_ID: &str = "processId";
    pub const USERNAME: &str = "username";
    pub const ASSEMBLY_COMPANY: &str = "assemblyCompany";
    pub const ASSEMBLY_VERSION: &str = "assemblyVersion";
    pub const ASSEMBLY_FILE_VERSION: &str = "assemblyFileVersion";
    pub const ASSEMBLY_TITLE: &str = "assemblyTitle";
    pub const ASSEMBLY_DESCRIPTION: &str = "assemblyDescription";
    pub const CALLING_CLASS_NAME: &str = "callingClassName";
    pub const CALLING_METHOD_NAME: &str = "callingMethodName";
    pub const CALLING_FILE_NAME: &str = "callingFileName";
    pub const CALLING_LINE_NUMBER: &str = "callingLineNumber";
    /// Added by the backend adapter
    pub const LOGGER_NAME: &str = "LoggerName";
}

/// String written for null values
pub const NULL_MARKER: &str = "null";

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Convert a JSON value, rendering nested structures as compact JSON text
    pub fn from_json_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => n
                    .as_f64()
                    .map(FieldValue::Float)
                    .unwrap_or_else(|| FieldValue::String(n.to_string())),
            },
            serde_json::Value::String(s) => FieldValue::String(s),
            other => FieldValue::String(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => f.write_str(NULL_MARKER),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        i64::try_from(i)
            .map(FieldValue::Int)
            .unwrap_or_else(|_| FieldValue::String(i.to_string()))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Extra key-value properties supplied with a log call
///
/// These are the most specific properties of an entry and overwrite
/// anything the builder derived on its own for the same key.
///
/// # Example
///
/// ```
/// use rust_structured_logger::Properties;
///
/// let props = Properties::new()
///     .with_field("order_id", 1042)
///     .with_field("customer", "acme")
///     .with_field("rush", true);
///
/// assert_eq!(props.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    fields: BTreeMap<String, FieldValue>,
}

impl Properties {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a field (builder version)
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Flatten the top-level fields of any serializable value
    ///
    /// Nested objects and arrays are kept as compact JSON text.
    ///
    /// # Errors
    ///
    /// Fails when serialization fails or the value is not a JSON object.
    ///
    /// ```
    /// use rust_structured_logger::Properties;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Checkout { cart_id: u32, total: f64 }
    ///
    /// let props = Properties::from_serialize(&Checkout { cart_id: 7, total: 19.5 }).unwrap();
    /// assert_eq!(props.get("cart_id").unwrap().to_string(), "7");
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(map) => Ok(Self {
                fields: map
                    .into_iter()
                    .map(|(k, v)| (k, FieldValue::from_json_value(v)))
                    .collect(),
            }),
            serde_json::Value::Null => Ok(Self::new()),
            other => Err(LoggerError::enrichment(format!(
                "extra properties must serialize to an object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        f.write_str(&formatted)
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> From<HashMap<K, V>> for Properties
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from(map: HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> From<BTreeMap<K, V>> for Properties
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for Properties
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_properties_builder() {
        let props = Properties::new()
            .with_field("user_id", 123)
            .with_field("username", "john_doe")
            .with_field("active", true);

        assert_eq!(props.len(), 3);
        assert_eq!(props.get("user_id"), Some(&FieldValue::Int(123)));
    }

    #[test]
    fn test_null_renders_marker() {
        let props = Properties::new().with_field("missing", None::<&str>);
        assert_eq!(props.get("missing").unwrap().to_string(), NULL_MARKER);
    }

    #[test]
    fn test_properties_format() {
        let props = Properties::new()
            .with_field("key1", "value1")
            .with_field("key2", 42);

        let formatted = props.to_string();
        assert!(formatted.contains("key1=value1"));
        assert!(formatted.contains("key2=42"));
    }

    #[test]
    fn test_from_serialize_flattens_top_level() {
        #[derive(Serialize)]
        struct Request<'a> {
            path: &'a str,
            status: u16,
            tags: Vec<&'a str>,
            referrer: Option<&'a str>,
        }

        let props = Properties::from_serialize(&Request {
            path: "/orders",
            status: 201,
            tags: vec!["api", "v2"],
            referrer: None,
        })
        .unwrap();

        assert_eq!(props.get("path").unwrap().to_string(), "/orders");
        assert_eq!(props.get("status"), Some(&FieldValue::Int(201)));
        assert_eq!(props.get("tags").unwrap().to_string(), r#"["api","v2"]"#);
        assert!(props.get("referrer").unwrap().is_null());
    }

    #[test]
    fn test_from_serialize_rejects_scalars() {
        let err = Properties::from_serialize(&42).unwrap_err();
        assert!(matches!(err, LoggerError::Enrichment(_)));
        assert!(err.to_string().contains("a number"));
    }

    #[test]
    fn test_from_collections() {
        let mut map = HashMap::new();
        map.insert("a", 1);
        let props = Properties::from(map);
        assert_eq!(props.get("a"), Some(&FieldValue::Int(1)));

        let props = Properties::from(vec![("b", "two")]);
        assert_eq!(props.get("b").unwrap().to_string(), "two");
    }
}
