use super::validator::{validate_structured, ValidationMode};
use super::{ScalarType, VariableBindings};
use crate::ast::Value;
use crate::error::{Error, ErrorType, Result};
use crate::json::value_from_literal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

/// Decides what a [JsonScalar] does with variable values.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParseValuePolicy {
    /// Check that the value is an object or an array and pass it on unchanged.
    #[default]
    Validate,
    /// Treat variable values exactly like result values, see [`ScalarType::serialize`].
    ///
    /// In permissive mode this decodes JSON strings passed as variables and re-encodes
    /// everything else.
    Serialize,
}

/// Configuration of a [JsonScalar], which may be deserialized from JSON.
///
/// ```
/// use graphql_json_scalar::scalar::*;
///
/// let config: JsonScalarConfig = serde_json::from_str(r#"{
///     "name": "CrJSON",
///     "mode": "permissive",
///     "parseValue": "serialize"
/// }"#).unwrap();
///
/// assert_eq!(config.mode, ValidationMode::Permissive);
/// assert_eq!(config.parse_value, ParseValuePolicy::Serialize);
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsonScalarConfig {
    /// Name of the scalar type in the schema.
    pub name: String,
    /// Description of the scalar type, as shown in introspection.
    pub description: Option<String>,
    pub mode: ValidationMode,
    pub parse_value: ParseValuePolicy,
}

impl Default for JsonScalarConfig {
    fn default() -> Self {
        JsonScalarConfig {
            name: "JSON".to_string(),
            description: Some("The `JSON` scalar type represents JSON values".to_string()),
            mode: ValidationMode::Strict,
            parse_value: ParseValuePolicy::Validate,
        }
    }
}

/// A scalar type that carries arbitrary JSON values through results, variables, and literals.
///
/// ```
/// use graphql_json_scalar::{ast::*, scalar::*};
/// use serde_json::json;
///
/// let scalar = JsonScalar::strict("CrJson");
/// let ctx = ASTContext::new();
/// let literal = Value::parse(&ctx, "{ list: [1, $x] }").unwrap();
/// let variables = json!({ "x": "y" });
///
/// let value = scalar.parse_literal(literal, variables.as_object()).unwrap();
/// assert_eq!(value, Some(json!({ "list": [1.0, "y"] })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonScalar {
    config: JsonScalarConfig,
}

impl JsonScalar {
    /// Create a scalar from a configuration.
    pub fn new(config: JsonScalarConfig) -> Self {
        JsonScalar { config }
    }

    /// Create an object-only scalar, which passes structured values on unchanged and only accepts
    /// object literals.
    pub fn strict<S: Into<String>>(name: S) -> Self {
        JsonScalar::new(JsonScalarConfig {
            name: name.into(),
            description: Some("Serve Json object".to_string()),
            mode: ValidationMode::Strict,
            parse_value: ParseValuePolicy::Validate,
        })
    }

    /// Create a scalar that accepts JSON text as well as structured values and decodes both.
    ///
    /// Variables are handled like results, so a variable holding JSON text is decoded too. Use
    /// [`JsonScalar::with_parse_value`] with [`ParseValuePolicy::Validate`] to pass variables on
    /// without re-encoding them.
    pub fn permissive<S: Into<String>>(name: S) -> Self {
        JsonScalar::new(JsonScalarConfig {
            name: name.into(),
            description: Some("JSON custom scalar type".to_string()),
            mode: ValidationMode::Permissive,
            parse_value: ParseValuePolicy::Serialize,
        })
    }

    /// Replace the description shown in introspection.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.config.description = Some(description.into());
        self
    }

    /// Switch the [ValidationMode] used for results and, with [`ParseValuePolicy::Serialize`],
    /// for variables. Literals follow the mode too.
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Choose how variable values are handled, see [ParseValuePolicy].
    pub fn with_parse_value(mut self, policy: ParseValuePolicy) -> Self {
        self.config.parse_value = policy;
        self
    }

    #[inline]
    pub fn mode(&self) -> ValidationMode {
        self.config.mode
    }

    #[inline]
    pub fn config(&self) -> &JsonScalarConfig {
        &self.config
    }
}

impl From<JsonScalarConfig> for JsonScalar {
    fn from(config: JsonScalarConfig) -> Self {
        JsonScalar::new(config)
    }
}

impl ScalarType for JsonScalar {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn description(&self) -> Option<&str> {
        self.config.description.as_deref()
    }

    fn serialize(&self, value: Option<JSValue>) -> Result<JSValue> {
        self.config.mode.validate(value)
    }

    fn parse_value(&self, value: Option<JSValue>) -> Result<JSValue> {
        match self.config.parse_value {
            ParseValuePolicy::Validate => validate_structured(value),
            ParseValuePolicy::Serialize => self.serialize(value),
        }
    }

    fn parse_literal(
        &self,
        value: &Value<'_>,
        variables: Option<&VariableBindings>,
    ) -> Result<Option<JSValue>> {
        match (self.config.mode, value) {
            (ValidationMode::Permissive, _) | (ValidationMode::Strict, Value::Object(_)) => {
                Ok(value_from_literal(value, variables))
            }
            (ValidationMode::Strict, value) => Err(Error::new(
                format!(
                    "Can only parse json object but got a: {}",
                    value.node_name()
                ),
                Some(ErrorType::GraphQL),
            )),
        }
    }
}
