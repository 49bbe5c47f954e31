//! Insertion-ordered property map shared by the backend sink and the layout

use serde::Serialize;
use serde_json::{Map, Value};

/// Ordered key/value bag carried on a `log::Record`
///
/// Keys keep the position of their first insertion; inserting an existing
/// key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyBag {
    props: Map<String, Value>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self { props: Map::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.props.insert(key.into(), value.into());
    }

    /// Insert only when the key is not present yet
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.props.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.props.iter()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Collect the key-values of a `log` record, in visit order
    pub fn from_source(source: &dyn log::kv::Source) -> Self {
        let mut bag = PropertyBag::new();
        let mut collector = Collector(&mut bag);
        if let Err(e) = source.visit(&mut collector) {
            eprintln!("[LOGGER WARNING] Failed to read record properties: {}", e);
        }
        bag
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyBag
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut bag = PropertyBag::new();
        for (key, value) in iter {
            bag.insert(key, value);
        }
        bag
    }
}

impl log::kv::Source for PropertyBag {
    fn visit<'kvs>(
        &'kvs self,
        visitor: &mut dyn log::kv::VisitSource<'kvs>,
    ) -> Result<(), log::kv::Error> {
        for (key, value) in &self.props {
            let value = match value {
                Value::String(s) => log::kv::Value::from(s.as_str()),
                other => log::kv::Value::from_display(other),
            };
            visitor.visit_pair(log::kv::Key::from_str(key), value)?;
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.props.len()
    }
}

struct Collector<'a>(&'a mut PropertyBag);

impl<'kvs> log::kv::VisitSource<'kvs> for Collector<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.0.insert(key.as_str(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinsert_keeps_position() {
        let mut bag = PropertyBag::new();
        bag.insert("region", "context");
        bag.insert("host", "web-1");
        bag.insert("region", "entry");

        let keys: Vec<&str> = bag.keys().collect();
        assert_eq!(keys, vec!["region", "host"]);
        assert_eq!(bag.get("region"), Some(&Value::from("entry")));
    }

    #[test]
    fn test_insert_if_absent() {
        let mut bag = PropertyBag::new();
        bag.insert("message", "from record");
        bag.insert_if_absent("message", "fallback");
        bag.insert_if_absent("loglevel", "Info");

        assert_eq!(bag.get("message"), Some(&Value::from("from record")));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn test_source_roundtrip_preserves_order() {
        let bag: PropertyBag = vec![("b", "2"), ("a", "1"), ("c", "3")]
            .into_iter()
            .collect();

        let copy = PropertyBag::from_source(&bag);
        assert_eq!(copy, bag);
        assert_eq!(copy.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }
}
