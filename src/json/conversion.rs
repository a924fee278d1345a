use super::VariableBindings;
use crate::ast::*;
use serde_json::{Map as JSMap, Number, Value as JSValue};

/// Conversion of a GraphQL literal to a [serde_json::Value], substituting variables.
///
/// A result of `None` marks a missing value, e.g. a variable that hasn't been provided. Inside an
/// object a missing field is left out, inside a list a missing item becomes `null`, which is how
/// JSON encoding treats an absent value.
pub trait LiteralValue {
    fn to_json(&self, variables: Option<&VariableBindings>) -> Option<JSValue>;
}

impl<'a> LiteralValue for Value<'a> {
    fn to_json(&self, variables: Option<&VariableBindings>) -> Option<JSValue> {
        match self {
            Value::Variable(name) => variables.and_then(|vars| vars.get(*name)).cloned(),
            Value::String(value) => Some(JSValue::String(value.to_string())),
            Value::Int(text) | Value::Float(text) => Some(number_from_text(text)),
            Value::Boolean(value) => Some(JSValue::Bool(*value)),
            Value::Null => Some(JSValue::Null),
            Value::Enum(_) => None,
            Value::List(items) => Some(JSValue::Array(
                items
                    .iter()
                    .map(|item| item.to_json(variables).unwrap_or(JSValue::Null))
                    .collect(),
            )),
            Value::Object(fields) => {
                // Later fields override earlier ones with the same name, even when missing
                let mut map = JSMap::new();
                for field in fields.iter() {
                    match field.value.to_json(variables) {
                        Some(value) => map.insert(field.name.to_string(), value),
                        None => map.remove(field.name),
                    };
                }
                Some(JSValue::Object(map))
            }
        }
    }
}

/// Reads the text of an Int or Float literal as a double, so `3` turns into `3.0`.
///
/// Text that doesn't fit a finite double turns into `null`.
#[inline]
fn number_from_text(text: &str) -> JSValue {
    lexical_core::parse::<f64>(text.as_bytes())
        .ok()
        .and_then(Number::from_f64)
        .map_or(JSValue::Null, JSValue::Number)
}

/// Convert a literal to a [serde_json::Value] with the request's [VariableBindings].
///
/// Returns `None` when the literal doesn't resolve to a value.
pub fn value_from_literal(
    value: &Value<'_>,
    variables: Option<&VariableBindings>,
) -> Option<JSValue> {
    tracing::trace!(kind = value.node_name(), "converting literal to JSON");
    value.to_json(variables)
}

#[cfg(test)]
mod tests {
    use super::{value_from_literal, VariableBindings};
    use crate::ast::*;
    use serde_json::{json, Value as JSValue};

    fn convert(source: &str, variables: Option<&VariableBindings>) -> Option<JSValue> {
        let ctx = ASTContext::new();
        let value = Value::parse(&ctx, source).unwrap();
        value_from_literal(value, variables)
    }

    #[test]
    fn scalars() {
        assert_eq!(convert("\"string\"", None), Some(json!("string")));
        assert_eq!(convert("true", None), Some(json!(true)));
        assert_eq!(convert("false", None), Some(json!(false)));
        assert_eq!(convert("null", None), Some(JSValue::Null));
    }

    #[test]
    fn numbers_are_floats() {
        assert_eq!(convert("3", None), Some(json!(3.0)));
        assert_eq!(convert("-3", None), Some(json!(-3.0)));
        assert_eq!(convert("3.14", None), Some(json!(3.14)));
        assert_eq!(convert("1e3", None), Some(json!(1000.0)));
        assert_ne!(convert("3", None), Some(json!(3)));
    }

    #[test]
    fn non_finite_numbers() {
        assert_eq!(convert("1e400", None), Some(JSValue::Null));
    }

    #[test]
    fn enums_are_missing() {
        assert_eq!(convert("RED", None), None);
        assert_eq!(convert("{ color: RED, size: 1 }", None), Some(json!({ "size": 1.0 })));
        assert_eq!(convert("[RED, 1]", None), Some(json!([null, 1.0])));
    }

    #[test]
    fn duplicate_fields() {
        assert_eq!(convert("{ a: 1, a: \"b\" }", None), Some(json!({ "a": "b" })));
        assert_eq!(convert("{ a: 1, a: $missing }", None), Some(json!({})));
    }

    #[test]
    fn strings_are_decoded() {
        assert_eq!(
            convert("\"\"\"\n    block\n      text\n\"\"\"", None),
            Some(json!("block\n  text"))
        );
        assert_eq!(convert("\"\"\"\naé\n  x\n\"\"\"", None), Some(json!("aé\n  x")));
        assert_eq!(convert("\"smile \\ud83d\\ude00\"", None), Some(json!("smile 😀")));
    }

    #[test]
    fn variables() {
        let variables = json!({ "x": { "nested": [1, 2] } });
        let variables = variables.as_object().unwrap();
        assert_eq!(
            convert("$x", Some(variables)),
            Some(json!({ "nested": [1, 2] }))
        );
        assert_eq!(convert("$y", Some(variables)), None);
        assert_eq!(convert("$x", None), None);
        assert_eq!(
            convert("{ a: $x, b: $y }", Some(variables)),
            Some(json!({ "a": { "nested": [1, 2] } }))
        );
    }
}
