use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source-format data that has no home in the model, keyed by attribute name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatSpecific(Map<String, Value>);

impl FormatSpecific {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: String, value: Value) {
        self.0.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(|x| x.as_i64())
    }
}
