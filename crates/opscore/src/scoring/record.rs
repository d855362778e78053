use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value stored in a scoring record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

/// Ephemeral, caller-supplied record of named fields.
///
/// Missing fields never raise: numeric accessors take a caller-specified
/// neutral value, text defaults to the empty string, flags default to false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_number(mut self, name: &str, value: f64) -> Self {
        self.fields
            .insert(name.to_string(), FieldValue::Number(value));
        self
    }

    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(name.to_string(), FieldValue::Text(value.into()));
        self
    }

    pub fn with_flag(mut self, name: &str, value: bool) -> Self {
        self.fields
            .insert(name.to_string(), FieldValue::Flag(value));
        self
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.fields.get(name) {
            Some(FieldValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn number_or(&self, name: &str, neutral: f64) -> f64 {
        self.number(name).unwrap_or(neutral)
    }

    pub fn text(&self, name: &str) -> &str {
        match self.fields.get(name) {
            Some(FieldValue::Text(value)) => value.as_str(),
            _ => "",
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(FieldValue::Flag(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_neutral_values() {
        let record = Record::new().with_number("amount", 42.0);

        assert_eq!(record.number_or("amount", 0.0), 42.0);
        assert_eq!(record.number_or("absent", 7.5), 7.5);
        assert_eq!(record.text("absent"), "");
        assert!(!record.flag("absent"));
    }

    #[test]
    fn typed_accessors_ignore_mismatched_fields() {
        let record = Record::new().with_text("amount", "not a number");

        assert_eq!(record.number("amount"), None);
        assert_eq!(record.text("amount"), "not a number");
    }
}
