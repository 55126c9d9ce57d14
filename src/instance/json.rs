use serde_json::Value;

use crate::coercion::RawValue;

use super::InstanceNode;

impl InstanceNode for Value {
    fn child(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    fn keys(&self) -> Vec<&str> {
        match self {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        !self.is_object()
    }

    fn raw_value(&self) -> Option<RawValue> {
        match self {
            Value::Null | Value::Object(_) => None,
            Value::Bool(value) => Some(RawValue::Bool(*value)),
            Value::Number(number) => Some(RawValue::Number(number.to_string())),
            Value::String(text) => Some(RawValue::Text(text.clone())),
            Value::Array(items) => Some(RawValue::List(
                items.iter().filter_map(|item| item.raw_value()).collect(),
            )),
        }
    }
}
