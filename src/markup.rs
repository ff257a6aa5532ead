//! Markup Helpers - Class Lists and Attribute Strings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value side of an HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Text(String),
}

impl AttrValue {
    /// Text to render inside quotes, `None` for the bare boolean form.
    fn quoted(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// Base class followed by one BEM modifier class per entry.
///
/// `with_modifier("btn", &["primary", "lg"])` gives `"btn btn--primary btn--lg"`.
pub fn with_modifier<S: AsRef<str>>(class: &str, modifiers: &[S]) -> String {
    let mut res = class.to_string();
    for modifier in modifiers {
        res.push(' ');
        res.push_str(class);
        res.push_str("--");
        res.push_str(modifier.as_ref());
    }
    res
}

/// Serialize attribute pairs in iteration order.
///
/// Every fragment, the last included, ends in a space. Values are written
/// as-is, callers must pass markup-safe text.
pub fn build_attribute_string<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<AttrValue>,
{
    let mut res = String::new();

    for (key, value) in pairs {
        let key = key.as_ref();
        if key.is_empty() {
            continue;
        }
        let value: AttrValue = value.into();
        match value.quoted() {
            Some(text) => {
                res.push_str(key);
                res.push_str("=\"");
                res.push_str(text);
                res.push_str("\" ");
            }
            None => {
                res.push_str(key);
                res.push(' ');
            }
        }
    }

    res
}

/// Attribute string from a JSON object, keeping its key order.
///
/// Non-string scalars are rendered with their JSON text; `null`, arrays and
/// objects count as empty.
pub fn build_attribute_string_from_map(map: &Map<String, Value>) -> String {
    build_attribute_string(map.iter().map(|(key, value)| {
        let value = match value {
            Value::Bool(b) => AttrValue::Bool(*b),
            Value::String(s) => AttrValue::Text(s.clone()),
            Value::Number(n) => AttrValue::Text(n.to_string()),
            _ => AttrValue::Text(String::new()),
        };
        (key, value)
    }))
}

/// Whether `value` occurs in `items`.
pub fn includes<T: PartialEq>(items: &[T], value: &T) -> bool {
    items.contains(value)
}
