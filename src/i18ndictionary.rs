use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language key of the entry used when no localized one applies
pub(crate) const DFLT: &str = "dflt";

/// A string with optional per-language alternatives, keyed by Glyphs
/// language tag (`PTG`, `ESP`, ...). Entries keep their insertion order.
#[derive(Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct I18NDictionary(IndexMap<String, String>);

impl I18NDictionary {
    pub fn new() -> Self {
        I18NDictionary::default()
    }

    pub fn get_default(&self) -> Option<&String> {
        self.get(DFLT)
    }

    pub fn get(&self, lang: &str) -> Option<&String> {
        self.0.get(lang)
    }

    pub fn set_default(&mut self, s: String) {
        self.insert(DFLT.to_string(), s);
    }

    pub fn insert(&mut self, lang: String, s: String) {
        self.0.insert(lang, s);
    }

    /// Drop every entry, localized or not
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Debug for I18NDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get_default() {
            Some(s) => write!(f, "<{}>", s),
            None => f.write_str("<no default>"),
        }
    }
}

impl From<String> for I18NDictionary {
    fn from(val: String) -> Self {
        let mut dict = I18NDictionary::new();
        dict.set_default(val);
        dict
    }
}

impl From<&str> for I18NDictionary {
    fn from(val: &str) -> Self {
        val.to_string().into()
    }
}

impl From<&String> for I18NDictionary {
    fn from(val: &String) -> Self {
        val.as_str().into()
    }
}
