use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JSValue};

/// Validation policy of a [`JsonScalar`](super::JsonScalar).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationMode {
    /// Only accept values that are already structured (objects or arrays) and pass them on as
    /// they are. Inline literals must be objects.
    #[default]
    Strict,
    /// Accept strings and structured values and decode them from JSON text. Inline literals may
    /// be of any kind.
    Permissive,
}

impl ValidationMode {
    /// Validate a value according to this mode.
    #[inline]
    pub fn validate(self, value: Option<JSValue>) -> Result<JSValue> {
        match self {
            ValidationMode::Strict => validate_structured(value),
            ValidationMode::Permissive => validate_json(value),
        }
    }
}

/// Returns the category of a value as JavaScript's `typeof` reports it.
///
/// `null` is an `"object"`, and a missing value is `"undefined"`.
pub fn type_of(value: Option<&JSValue>) -> &'static str {
    match value {
        None => "undefined",
        Some(JSValue::String(_)) => "string",
        Some(JSValue::Number(_)) => "number",
        Some(JSValue::Bool(_)) => "boolean",
        Some(JSValue::Null | JSValue::Array(_) | JSValue::Object(_)) => "object",
    }
}

/// Formats a number the way JavaScript's `Number#toString` does: integral floats drop their
/// fraction and exponents are only used below `1e-6` and from `1e21` on.
fn js_number(num: &Number) -> String {
    match num.as_f64() {
        Some(float) if num.is_f64() => js_float(float),
        _ => num.to_string(),
    }
}

fn js_float(float: f64) -> String {
    if float == 0.0 {
        return "0".to_string();
    }
    // Shortest digits that round-trip, e.g. `1.5e-7`
    let shortest = format!("{:e}", float.abs());
    let (mantissa, exponent) = match shortest.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return float.to_string(),
    };
    let digits = mantissa.replace('.', "");
    let len = digits.len() as i32;
    let point = exponent + 1;
    let body = if len <= point && point <= 21 {
        digits + &"0".repeat((point - len) as usize)
    } else if 0 < point && point <= 21 {
        let (int, fract) = digits.split_at(point as usize);
        format!("{}.{}", int, fract)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat(-point as usize), digits)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{}", mantissa, sign, exponent.abs())
    };
    if float < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Formats a value the way JavaScript converts it to a string, e.g. when it's interpolated into
/// a template string. Strings aren't quoted.
pub fn display_value(value: Option<&JSValue>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(JSValue::Null) => "null".to_string(),
        Some(JSValue::String(str)) => str.clone(),
        Some(JSValue::Number(num)) => js_number(num),
        Some(JSValue::Bool(x)) => x.to_string(),
        Some(JSValue::Object(_)) => "[object Object]".to_string(),
        Some(JSValue::Array(list)) => list
            .iter()
            .map(|item| match item {
                JSValue::Null => String::new(),
                item => display_value(Some(item)),
            })
            .collect::<Vec<String>>()
            .join(","),
    }
}

/// Accepts objects and arrays unchanged and rejects everything else.
///
/// Nested values aren't inspected.
pub fn validate_structured(value: Option<JSValue>) -> Result<JSValue> {
    match value {
        Some(value @ (JSValue::Object(_) | JSValue::Array(_))) => Ok(value),
        value => Err(Error::type_check(format!(
            "Value is not an instance of Object : {}",
            display_value(value.as_ref())
        ))),
    }
}

#[inline]
fn invalid_json() -> Error {
    Error::type_check("Value is not a valid JSON")
}

/// Accepts JSON text and structured values and returns them decoded.
///
/// Strings are decoded as JSON text, so `"[1, 2]"` turns into an array and `"3"` into a number.
/// Structured values (including `null`) are encoded to JSON text and decoded again. Numbers,
/// booleans, and missing values are rejected with their uppercased `typeof` category.
pub fn validate_json(value: Option<JSValue>) -> Result<JSValue> {
    let text = match value {
        Some(JSValue::String(text)) => text,
        Some(value @ (JSValue::Null | JSValue::Array(_) | JSValue::Object(_))) => {
            serde_json::to_string(&value).map_err(|_| invalid_json())?
        }
        value => {
            return Err(Error::type_check(format!(
                "Value is not a valid type: {}",
                type_of(value.as_ref()).to_uppercase()
            )))
        }
    };

    let decoded: JSValue = serde_json::from_str(&text).map_err(|_| invalid_json())?;
    tracing::debug!(value = %decoded, "decoded JSON scalar value");
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use serde_json::json;

    #[test]
    fn typeof_categories() {
        assert_eq!(type_of(None), "undefined");
        assert_eq!(type_of(Some(&json!("a"))), "string");
        assert_eq!(type_of(Some(&json!(1.5))), "number");
        assert_eq!(type_of(Some(&json!(true))), "boolean");
        assert_eq!(type_of(Some(&json!(null))), "object");
        assert_eq!(type_of(Some(&json!([]))), "object");
        assert_eq!(type_of(Some(&json!({}))), "object");
    }

    #[test]
    fn display_like_string_conversion() {
        assert_eq!(display_value(None), "undefined");
        assert_eq!(display_value(Some(&json!(null))), "null");
        assert_eq!(display_value(Some(&json!("a"))), "a");
        assert_eq!(display_value(Some(&json!(3))), "3");
        assert_eq!(display_value(Some(&json!(3.14))), "3.14");
        assert_eq!(display_value(Some(&json!(false))), "false");
        assert_eq!(display_value(Some(&json!({ "a": 1 }))), "[object Object]");
        assert_eq!(display_value(Some(&json!([1, null, "b"]))), "1,,b");
    }

    #[test]
    fn display_numbers_like_javascript() {
        let cases = [
            (json!(3.0), "3"),
            (json!(-1.5), "-1.5"),
            (json!(123456.0), "123456"),
            (json!(0.1), "0.1"),
            (json!(0.000001), "0.000001"),
            (json!(1e-7), "1e-7"),
            (json!(-2.5e-8), "-2.5e-8"),
            (json!(1e20), "100000000000000000000"),
            (json!(1e21), "1e+21"),
            (json!(1.25e30), "1.25e+30"),
            (json!(0.0), "0"),
            (json!(-7), "-7"),
            (json!(u64::MAX), "18446744073709551615"),
        ];
        for (value, expected) in cases {
            assert_eq!(display_value(Some(&value)), expected);
        }
        assert_eq!(display_value(Some(&json!([1.0, 2.5]))), "1,2.5");
    }

    #[test]
    fn structured_passes_through() {
        let object = json!({ "a": [1, "x", null], "b": { "c": true } });
        assert_eq!(validate_structured(Some(object.clone())).unwrap(), object);
        let array = json!(["string", 3, 3.14, true, false, null]);
        assert_eq!(validate_structured(Some(array.clone())).unwrap(), array);
        assert_eq!(validate_structured(Some(json!({}))).unwrap(), json!({}));
    }

    #[test]
    fn structured_rejects_primitives() {
        let cases = [
            (Some(json!("a")), "Value is not an instance of Object : a"),
            (Some(json!(3)), "Value is not an instance of Object : 3"),
            (Some(json!(3.0)), "Value is not an instance of Object : 3"),
            (Some(json!(true)), "Value is not an instance of Object : true"),
            (Some(json!(null)), "Value is not an instance of Object : null"),
            (None, "Value is not an instance of Object : undefined"),
        ];
        for (value, message) in cases {
            let error = validate_structured(value).unwrap_err();
            assert_eq!(error.message(), message);
            assert_eq!(error.error_type(), ErrorType::TypeCheck);
        }
    }

    #[test]
    fn json_text_is_decoded() {
        assert_eq!(
            validate_json(Some(json!("{\"a\": [1, 2]}"))).unwrap(),
            json!({ "a": [1, 2] })
        );
        assert_eq!(validate_json(Some(json!("3"))).unwrap(), json!(3));
        assert_eq!(validate_json(Some(json!(" \"a\" "))).unwrap(), json!("a"));
        assert_eq!(validate_json(Some(json!("null"))).unwrap(), json!(null));
    }

    #[test]
    fn structured_values_round_trip() {
        let object = json!({ "a": [1, 2.5, "x"], "b": null });
        assert_eq!(validate_json(Some(object.clone())).unwrap(), object);
        assert_eq!(validate_json(Some(json!(null))).unwrap(), json!(null));
    }

    #[test]
    fn malformed_json_text() {
        for text in ["a", "", "{", "{a: 1}", "[1,]"] {
            let error = validate_json(Some(json!(text))).unwrap_err();
            assert_eq!(error.message(), "Value is not a valid JSON");
            assert_eq!(error.error_type(), ErrorType::TypeCheck);
        }
    }

    #[test]
    fn invalid_types() {
        let cases = [
            (Some(json!(3)), "Value is not a valid type: NUMBER"),
            (Some(json!(true)), "Value is not a valid type: BOOLEAN"),
            (None, "Value is not a valid type: UNDEFINED"),
        ];
        for (value, message) in cases {
            assert_eq!(validate_json(value).unwrap_err().message(), message);
        }
    }

    #[test]
    fn modes_dispatch() {
        assert!(ValidationMode::Strict.validate(Some(json!("[]"))).is_err());
        assert_eq!(
            ValidationMode::Permissive.validate(Some(json!("[]"))).unwrap(),
            json!([])
        );
    }
}
