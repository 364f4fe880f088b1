//! Transform scripts applied to documents before they are written.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Language assumed when a script does not name one.
pub const DEFAULT_SCRIPT_LANG: &str = "painless";

/// A transform applied to every copied document. Executed elsewhere; only carried here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub source: String,

    #[serde(default = "default_lang")]
    pub lang: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
}

fn default_lang() -> String {
    DEFAULT_SCRIPT_LANG.to_string()
}

impl Script {
    /// Create an inline script in the default language.
    pub fn inline(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            lang: default_lang(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}
