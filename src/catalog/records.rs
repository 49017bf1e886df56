//! Generated culinary records as they appear in the preset documents.
//!
//! A record is the JSON object the backend produced, kept as-is. Only `name` and, for side
//! dishes, `cookingMethod` are read back; a missing or non-string field just means "no value".

use crate::generation::GeneratedItem;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One generated recipe, main dish or side dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedRecord(Value);

impl GeneratedRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    fn text_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl From<Value> for GeneratedRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl GeneratedItem for GeneratedRecord {
    fn name(&self) -> Option<&str> {
        self.text_field("name")
    }

    fn distribution_label(&self) -> Option<&str> {
        self.text_field("cookingMethod")
            .filter(|label| CookingMethod::from(*label).is_known())
    }
}

/// Side-dish cooking method; values outside the fixed set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookingMethod {
    Kinpira,
    Nimono,
    Aemono,
    Itamemono,
    Yakimono,
    Agemono,
    Mushimono,
    Tsukemono,
    Salad,
    Marinade,
    Other(String),
}

impl CookingMethod {
    pub const KNOWN: [CookingMethod; 10] = [
        CookingMethod::Kinpira,
        CookingMethod::Nimono,
        CookingMethod::Aemono,
        CookingMethod::Itamemono,
        CookingMethod::Yakimono,
        CookingMethod::Agemono,
        CookingMethod::Mushimono,
        CookingMethod::Tsukemono,
        CookingMethod::Salad,
        CookingMethod::Marinade,
    ];

    pub fn label(&self) -> &str {
        match self {
            CookingMethod::Kinpira => "きんぴら",
            CookingMethod::Nimono => "煮物",
            CookingMethod::Aemono => "和え物",
            CookingMethod::Itamemono => "炒め物",
            CookingMethod::Yakimono => "焼き物",
            CookingMethod::Agemono => "揚げ物",
            CookingMethod::Mushimono => "蒸し物",
            CookingMethod::Tsukemono => "漬物",
            CookingMethod::Salad => "サラダ",
            CookingMethod::Marinade => "マリネ",
            CookingMethod::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CookingMethod::Other(_))
    }

    pub fn known_labels() -> Vec<String> {
        Self::KNOWN.iter().map(|m| m.label().to_string()).collect()
    }
}

impl From<&str> for CookingMethod {
    fn from(value: &str) -> Self {
        let value = value.trim();
        Self::KNOWN
            .into_iter()
            .find(|m| m.label() == value)
            .unwrap_or_else(|| CookingMethod::Other(value.to_string()))
    }
}
