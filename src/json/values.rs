use bumpalo::collections::Vec;
use serde_json::Value as JSValue;

use crate::ast::*;

/// Build the literal a user would write in a query to pass `value` inline.
///
/// Integers become [`Value::Int`] and every other number a [`Value::Float`], spelled the way
/// `serde_json` prints them, so the literal can be printed and parsed again.
pub fn ast_from_value_untyped<'a>(ctx: &'a ASTContext, value: &JSValue) -> Value<'a> {
    match value {
        JSValue::Null => Value::Null,
        JSValue::Bool(value) => Value::Boolean(*value),
        JSValue::String(value) => Value::String(ctx.alloc_str(value)),
        JSValue::Number(num) => {
            let text = ctx.alloc_string(num.to_string());
            match num.is_f64() {
                true => Value::Float(text),
                false => Value::Int(text),
            }
        }
        JSValue::Array(items) => Value::List(Vec::from_iter_in(
            items.iter().map(|item| ast_from_value_untyped(ctx, item)),
            &ctx.arena,
        )),
        JSValue::Object(map) => Value::Object(Vec::from_iter_in(
            map.iter().map(|(key, value)| ObjectField {
                name: ctx.alloc_str(key),
                value: ast_from_value_untyped(ctx, value),
            }),
            &ctx.arena,
        )),
    }
}
