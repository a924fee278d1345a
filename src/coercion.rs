//! # Coercion
//!
//! The `graphql_json_scalar::coercion` module contains the steps of a GraphQL engine that hand
//! values to scalars, and the way the engine reports a scalar's errors.
//!
//! - [coerce_variable_values] coerces a request's variables given an operation's
//!   [VariableDefinitions] and calls [`ScalarType::parse_value`].
//! - [coerce_argument_value] coerces an inline argument literal and calls
//!   [`ScalarType::parse_literal`].
//! - [complete_leaf_value] completes a resolver's result for an output field and calls
//!   [`ScalarType::serialize`].
//!
//! Named types that are registered in a [ScalarRegistry] are handled by their scalar. GraphQL's
//! built-in scalars (`Int`, `Float`, `String`, `Boolean`, `ID`) are handled here, and any other
//! named type, like an enum or input object, is passed on without casting.
//!
//! [Reference](https://spec.graphql.org/October2021/#sec-Coercing-Variable-Values)

use crate::ast::*;
use crate::error::{Error, ErrorType, Result};
use crate::json::{value_from_literal, VariableBindings};
use crate::scalar::ScalarRegistry;
use serde_json::{Number, Value as JSValue};

/// Coerce a request's variables given an operation's [VariableDefinitions].
///
/// Variables that aren't passed fall back to their definition's default value, or are left out
/// of the result when there's none, which is distinct from them being `null`.
pub fn coerce_variable_values<'a>(
    registry: &ScalarRegistry,
    var_defs: &VariableDefinitions<'a>,
    input: &JSValue,
) -> Result<VariableBindings> {
    let mut vars = VariableBindings::new();
    if var_defs.is_empty() {
        return Ok(vars);
    }
    let empty = VariableBindings::new();
    let input = match input {
        JSValue::Object(obj) => obj,
        JSValue::Null => &empty,
        _ => {
            return Err(Error::new(
                "Variables expected but received non-object value",
                None,
            ))
        }
    };

    for var_def in var_defs {
        let name = var_def.name;
        let value = match (input.get(name), &var_def.default_value) {
            (Some(JSValue::Null), _) if var_def.of_type.is_nonnull() => {
                return Err(Error::new(
                    format!(
                        "Variable \"${}\" of non-null type \"{}\" must not be null.",
                        name,
                        var_def.of_type.print()
                    ),
                    None,
                ));
            }
            (Some(value), _) => Some(
                coerce_input_value(registry, &var_def.of_type, value.clone()).map_err(|err| {
                    let message = format!(
                        "Variable \"${}\" got invalid value {}; {}",
                        name,
                        value,
                        err.message()
                    );
                    err.with_message(message)
                })?,
            ),
            (None, Some(default_value)) => {
                coerce_argument_value(registry, &var_def.of_type, default_value, None)?
            }
            (None, None) if var_def.of_type.is_nonnull() => {
                return Err(Error::new(
                    format!(
                        "Variable \"${}\" of required type \"{}\" was not provided.",
                        name,
                        var_def.of_type.print()
                    ),
                    None,
                ));
            }
            (None, None) => None,
        };
        if let Some(value) = value {
            vars.insert(name.to_string(), value);
        }
    }

    tracing::trace!(count = vars.len(), "coerced variable values");
    Ok(vars)
}

/// Coerce a JSON value passed as a variable to the given [TypeRef].
///
/// Errors are prefixed with the type that didn't accept the value, e.g. `Expected type Int; ...`.
pub fn coerce_input_value<'a>(
    registry: &ScalarRegistry,
    of_type: &TypeRef<'a>,
    value: JSValue,
) -> Result<JSValue> {
    match (of_type, value) {
        (TypeRef::NonNull(_), JSValue::Null) => Err(Error::new(
            format!("Expected non-nullable type {} not to be null.", of_type.print()),
            None,
        )),
        (TypeRef::NonNull(of_type), value) => coerce_input_value(registry, of_type, value),
        (_, JSValue::Null) => Ok(JSValue::Null),
        (TypeRef::List(of_type), JSValue::Array(list)) => list
            .into_iter()
            .map(|item| coerce_input_value(registry, of_type, item))
            .collect::<Result<Vec<JSValue>>>()
            .map(JSValue::Array),
        (TypeRef::List(of_type), value) => {
            Ok(JSValue::Array(vec![coerce_input_value(registry, of_type, value)?]))
        }
        (TypeRef::Named(name), value) => match registry.get(name) {
            Some(scalar) => scalar.parse_value(Some(value)).map_err(|err| {
                let message = format!("Expected type {}; {}", name, err.message());
                err.with_message(message)
            }),
            None => coerce_builtin_input(name, value),
        },
    }
}

fn coerce_builtin_input(name: &str, value: JSValue) -> Result<JSValue> {
    let invalid = |message: String| {
        Err(Error::new(
            format!("Expected type {}; {}", name, message),
            Some(ErrorType::TypeCheck),
        ))
    };
    match (name, value) {
        ("Int", JSValue::Number(num)) => match num.as_f64() {
            Some(float) if float.fract() != 0.0 => {
                invalid(format!("Int cannot represent non-integer value: {}", num))
            }
            Some(float) if float < i32::MIN as f64 || float > i32::MAX as f64 => invalid(format!(
                "Int cannot represent non 32-bit signed integer value: {}",
                num
            )),
            Some(float) => Ok(JSValue::Number((float as i64).into())),
            None => invalid(format!("Int cannot represent non-integer value: {}", num)),
        },
        ("Int", value) => invalid(format!("Int cannot represent non-integer value: {}", value)),
        ("Float", value @ JSValue::Number(_)) => Ok(value),
        ("Float", value) => invalid(format!("Float cannot represent non numeric value: {}", value)),
        ("String", value @ JSValue::String(_)) => Ok(value),
        ("String", value) => invalid(format!("String cannot represent a non string value: {}", value)),
        ("Boolean", value @ JSValue::Bool(_)) => Ok(value),
        ("Boolean", value) => invalid(format!(
            "Boolean cannot represent a non boolean value: {}",
            value
        )),
        ("ID", value @ JSValue::String(_)) => Ok(value),
        ("ID", JSValue::Number(num)) if !num.is_f64() => Ok(JSValue::String(num.to_string())),
        ("ID", value) => invalid(format!("ID cannot represent value: {}", value)),
        (_, value) => Ok(value),
    }
}

/// Coerce an argument's literal to the given [TypeRef], substituting already coerced variables.
///
/// Returns `None` when the literal is a variable that hasn't been provided, in which case an
/// engine leaves the argument out.
pub fn coerce_argument_value<'a>(
    registry: &ScalarRegistry,
    of_type: &TypeRef<'a>,
    value: &Value<'a>,
    variables: Option<&VariableBindings>,
) -> Result<Option<JSValue>> {
    match (of_type, value) {
        (_, Value::Variable(name)) => Ok(variables.and_then(|vars| vars.get(*name)).cloned()),
        (TypeRef::NonNull(_), Value::Null) => Err(Error::new(
            format!("Expected type {}, found null.", of_type.print()),
            None,
        )),
        (TypeRef::NonNull(of_type), value) => {
            coerce_argument_value(registry, of_type, value, variables)
        }
        (_, Value::Null) => Ok(Some(JSValue::Null)),
        (TypeRef::List(of_type), Value::List(list)) => {
            let mut items = Vec::with_capacity(list.len());
            for item in list.iter() {
                let item = coerce_argument_value(registry, of_type, item, variables)?;
                items.push(item.unwrap_or(JSValue::Null));
            }
            Ok(Some(JSValue::Array(items)))
        }
        (TypeRef::List(of_type), value) => {
            let item = coerce_argument_value(registry, of_type, value, variables)?;
            Ok(Some(JSValue::Array(vec![item.unwrap_or(JSValue::Null)])))
        }
        (TypeRef::Named(name), value) => match registry.get(name) {
            Some(scalar) => scalar.parse_literal(value, variables).map_err(|err| {
                let message = format!(
                    "Expected type {}, found {}; {}",
                    name,
                    value.print(),
                    err.message()
                );
                err.with_message(message)
            }),
            None => coerce_builtin_literal(name, value, variables),
        },
    }
}

fn coerce_builtin_literal(
    name: &str,
    value: &Value<'_>,
    variables: Option<&VariableBindings>,
) -> Result<Option<JSValue>> {
    let coerced = match (name, value) {
        ("Int", Value::Int(text)) => text
            .parse::<i32>()
            .ok()
            .map(|int| JSValue::Number(int.into())),
        ("Float", Value::Int(text) | Value::Float(text)) => text
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(JSValue::Number),
        ("String", Value::String(value)) => Some(JSValue::String(value.to_string())),
        ("Boolean", Value::Boolean(value)) => Some(JSValue::Bool(*value)),
        ("ID", Value::String(text) | Value::Int(text)) => Some(JSValue::String(text.to_string())),
        ("Int" | "Float" | "String" | "Boolean" | "ID", _) => None,
        (_, Value::Enum(name)) => Some(JSValue::String(name.to_string())),
        (_, value) => return Ok(value_from_literal(value, variables)),
    };
    match coerced {
        Some(value) => Ok(Some(value)),
        None => Err(Error::new(
            format!("Expected type {}, found {}.", name, value.print()),
            None,
        )),
    }
}

/// Complete a resolver's result for an output field of the given [TypeRef].
///
/// Missing results and `null` complete to `null` without reaching the scalar. Errors of a
/// scalar's [`ScalarType::serialize`] are returned unchanged, so that an engine can report them
/// next to the field.
pub fn complete_leaf_value<'a>(
    registry: &ScalarRegistry,
    of_type: &TypeRef<'a>,
    result: Option<JSValue>,
) -> Result<JSValue> {
    match (of_type, result) {
        (TypeRef::NonNull(inner), result) => match complete_leaf_value(registry, inner, result)? {
            JSValue::Null => Err(Error::new(
                format!("Cannot return null for non-nullable type {}.", of_type.print()),
                None,
            )),
            value => Ok(value),
        },
        (_, None | Some(JSValue::Null)) => Ok(JSValue::Null),
        (TypeRef::List(of_type), Some(JSValue::Array(list))) => list
            .into_iter()
            .map(|item| complete_leaf_value(registry, of_type, Some(item)))
            .collect::<Result<Vec<JSValue>>>()
            .map(JSValue::Array),
        (TypeRef::List(_), Some(_)) => Err(Error::new(
            format!("Expected Iterable, but did not find one for type {}.", of_type.print()),
            None,
        )),
        (TypeRef::Named(name), Some(value)) => match registry.get(name) {
            Some(scalar) => scalar.serialize(Some(value)),
            None => serialize_builtin(name, value),
        },
    }
}

fn serialize_builtin(name: &str, value: JSValue) -> Result<JSValue> {
    match (name, value) {
        ("Int", JSValue::Number(num)) if num.is_i64() || num.is_u64() => Ok(JSValue::Number(num)),
        ("Float", value @ JSValue::Number(_)) => Ok(value),
        ("String" | "ID", value @ JSValue::String(_)) => Ok(value),
        ("String" | "ID", JSValue::Number(num)) => Ok(JSValue::String(num.to_string())),
        ("String", JSValue::Bool(x)) => Ok(JSValue::String(x.to_string())),
        ("Boolean", value @ JSValue::Bool(_)) => Ok(value),
        ("Int" | "Float" | "String" | "ID" | "Boolean", value) => Err(Error::new(
            format!("{} cannot represent value: {}", name, value),
            Some(ErrorType::TypeCheck),
        )),
        (_, value) => Ok(value),
    }
}
