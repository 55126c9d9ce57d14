use toml::Value;

use crate::coercion::RawValue;

use super::InstanceNode;

impl InstanceNode for Value {
    fn child(&self, key: &str) -> Option<&Self> {
        self.as_table()?.get(key)
    }

    fn keys(&self) -> Vec<&str> {
        match self {
            Value::Table(table) => table.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        !self.is_table()
    }

    fn raw_value(&self) -> Option<RawValue> {
        match self {
            Value::Table(_) => None,
            Value::String(text) => Some(RawValue::Text(text.clone())),
            Value::Integer(value) => Some(RawValue::Number(value.to_string())),
            Value::Float(value) => Some(RawValue::Number(value.to_string())),
            Value::Boolean(value) => Some(RawValue::Bool(*value)),
            Value::Datetime(datetime) => Some(RawValue::Text(datetime.to_string())),
            Value::Array(items) => Some(RawValue::List(
                items.iter().filter_map(|item| item.raw_value()).collect(),
            )),
        }
    }
}
