//! Single-line JSON rendering with a fixed key prefix

use super::property_bag::PropertyBag;
use crate::core::{keys, Result};
use serde_json::{Map, Value};
use std::io::Write;

/// Keys that always lead the rendered object, in this order
pub const FIRST_PROPERTIES: [&str; 3] = [keys::TIMESTAMP, keys::LOG_LEVEL, keys::MESSAGE];

/// Renders a [`PropertyBag`] as one JSON object per line
///
/// The first properties come first in their fixed order; a first property
/// missing from the bag is written as `null` in its slot. Every other key
/// follows once, in the bag's insertion order.
///
/// ```
/// use rust_structured_logger::layout::{JsonLayout, PropertyBag};
///
/// let bag: PropertyBag = vec![
///     ("foo", "x"),
///     ("timestamp", "t"),
///     ("message", "m"),
///     ("loglevel", "Info"),
///     ("bar", "y"),
/// ]
/// .into_iter()
/// .collect();
///
/// let line = JsonLayout::new().format(&bag).unwrap();
/// assert_eq!(
///     line,
///     "{\"timestamp\":\"t\",\"loglevel\":\"Info\",\"message\":\"m\",\"foo\":\"x\",\"bar\":\"y\"}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct JsonLayout {
    first_properties: Vec<String>,
}

impl JsonLayout {
    pub fn new() -> Self {
        Self {
            first_properties: FIRST_PROPERTIES.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Replace the leading keys
    #[must_use]
    pub fn with_first_properties<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.first_properties = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn first_properties(&self) -> &[String] {
        &self.first_properties
    }

    fn ordered(&self, bag: &PropertyBag) -> Map<String, Value> {
        let mut object = Map::with_capacity(bag.len() + self.first_properties.len());

        for key in &self.first_properties {
            let value = bag.get(key).cloned().unwrap_or(Value::Null);
            object.insert(key.clone(), value);
        }

        for (key, value) in bag.iter() {
            if !object.contains_key(key) {
                object.insert(key.clone(), value.clone());
            }
        }

        object
    }

    /// Render `bag` as a newline-terminated JSON line
    pub fn format(&self, bag: &PropertyBag) -> Result<String> {
        let mut line = serde_json::to_string(&self.ordered(bag))?;
        line.push('\n');
        Ok(line)
    }

    /// Write the rendered line to `writer`
    pub fn format_to<W: Write + ?Sized>(&self, writer: &mut W, bag: &PropertyBag) -> Result<()> {
        serde_json::to_writer(&mut *writer, &self.ordered(bag))?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl Default for JsonLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(line: &str) -> Vec<String> {
        let parsed: Map<String, Value> = serde_json::from_str(line).unwrap();
        parsed.keys().cloned().collect()
    }

    #[test]
    fn test_first_properties_lead() {
        let bag: PropertyBag = vec![
            ("foo", "x"),
            ("timestamp", "t"),
            ("message", "m"),
            ("loglevel", "Info"),
            ("bar", "y"),
        ]
        .into_iter()
        .collect();

        let line = JsonLayout::new().format(&bag).unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
        assert_eq!(
            keys_of(&line),
            vec!["timestamp", "loglevel", "message", "foo", "bar"]
        );
    }

    #[test]
    fn test_missing_first_property_is_null() {
        let bag: PropertyBag = vec![("message", "m"), ("host", "web-1")].into_iter().collect();

        let line = JsonLayout::new().format(&bag).unwrap();
        let parsed: Map<String, Value> = serde_json::from_str(&line).unwrap();

        assert_eq!(keys_of(&line), vec!["timestamp", "loglevel", "message", "host"]);
        assert_eq!(parsed["timestamp"], Value::Null);
        assert_eq!(parsed["loglevel"], Value::Null);
    }

    #[test]
    fn test_empty_bag() {
        let line = JsonLayout::new().format(&PropertyBag::new()).unwrap();
        assert_eq!(line, "{\"timestamp\":null,\"loglevel\":null,\"message\":null}\n");
    }

    #[test]
    fn test_values_are_escaped() {
        let mut bag = PropertyBag::new();
        bag.insert("message", "line one\n\"quoted\"");

        let line = JsonLayout::new().format(&bag).unwrap();
        assert_eq!(line.lines().count(), 1);
        let parsed: Map<String, Value> = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["message"], "line one\n\"quoted\"");
    }

    #[test]
    fn test_format_to_matches_format() {
        let bag: PropertyBag = vec![("loglevel", "Warn"), ("x", "1")].into_iter().collect();
        let layout = JsonLayout::new();

        let mut out = Vec::new();
        layout.format_to(&mut out, &bag).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), layout.format(&bag).unwrap());
    }

    #[test]
    fn test_custom_first_properties() {
        let bag: PropertyBag = vec![("a", "1"), ("level", "Info")].into_iter().collect();
        let layout = JsonLayout::new().with_first_properties(["level"]);

        let line = layout.format(&bag).unwrap();
        assert_eq!(keys_of(&line), vec!["level", "a"]);
    }
}
