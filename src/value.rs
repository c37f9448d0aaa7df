//! The host runtime's value model, as seen at this module's boundary.
//!
//! Orchestration programs hand arguments to a module as a list of values,
//! where each value is either a string or a nested list. Only the two shapes
//! this module consumes are modeled here. Values deserialize from the JSON
//! form used in declarative program text, so `["hostname", "webby"]` parses
//! directly into an option list.

use serde::{Deserialize, Serialize};

/// A single argument value: a string or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    List(Vec<Value>),
}

impl Value {
    /// Returns the string contents, or `None` for lists.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::List(_) => None,
        }
    }

    /// Returns the string contents only if free of embedded null bytes.
    ///
    /// Null bytes cannot cross the engine boundary, so string arguments
    /// containing them are rejected during option parsing.
    pub fn as_str_no_nulls(&self) -> Option<&str> {
        self.as_str().filter(|s| !s.contains('\0'))
    }

    /// Returns the list items, or `None` for strings.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            Value::String(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_no_nulls() {
        assert_eq!(Value::from("eth0").as_str_no_nulls(), Some("eth0"));
        assert_eq!(Value::from("eth\0").as_str_no_nulls(), None);
        assert_eq!(Value::List(vec![]).as_str_no_nulls(), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let json = r#"["hostname", "webby", ["nested"]]"#;
        let value: Value = serde_json::from_str(json).unwrap();
        let items = value.as_list().unwrap();
        assert_eq!(items[0].as_str(), Some("hostname"));
        assert_eq!(items[2].as_list().unwrap().len(), 1);
        assert_eq!(serde_json::to_string(&value).unwrap(), json.replace(", ", ","));
    }
}
