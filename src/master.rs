use crate::{common::FormatSpecific, i18ndictionary::I18NDictionary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Master {
    pub name: I18NDictionary,
    pub id: String,
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
}

impl Master {
    pub fn new<T, U>(name: T, id: U) -> Self
    where
        T: Into<I18NDictionary>,
        U: Into<String>,
    {
        Master {
            name: name.into(),
            id: id.into(),
            format_specific: FormatSpecific::default(),
        }
    }

    /// The master's display name, falling back to its id
    pub fn display_name(&self) -> &str {
        self.name
            .get_default()
            .map(|x| x.as_str())
            .unwrap_or(self.id.as_str())
    }
}
