//! # JSON Scalar
//!
//! The `graphql_json_scalar::scalar` module contains the [ScalarType] trait, which is the contract
//! between a GraphQL engine and a custom scalar, and [JsonScalar], a scalar that carries arbitrary
//! JSON values.
//!
//! An engine calls a scalar in three places:
//!
//! - [`ScalarType::serialize`] when a resolver's result is written to a response,
//! - [`ScalarType::parse_value`] when a variable's value is coerced,
//! - [`ScalarType::parse_literal`] when a value is written inline in a query.
//!
//! [JsonScalar] supports two [ValidationMode]s. In [`ValidationMode::Strict`] only objects and
//! arrays are accepted and passed on as they are, and inline literals must be objects. In
//! [`ValidationMode::Permissive`] JSON text is accepted as well and every value is decoded from
//! JSON text before it's passed on.
//!
//! Scalars are stateless and may be shared across threads, for instance in a [ScalarRegistry].

mod json_scalar;
mod registry;
mod validator;


pub use crate::json::VariableBindings;
pub use json_scalar::{JsonScalar, JsonScalarConfig, ParseValuePolicy};
pub use registry::ScalarRegistry;
pub use validator::{
    display_value, type_of, validate_json, validate_structured, ValidationMode,
};

use crate::ast::Value;
use crate::error::Result;
use serde_json::Value as JSValue;

/// The contract a custom scalar type fulfills for a GraphQL engine.
///
/// A missing value, like JavaScript's `undefined`, is passed as `None` and is distinct from
/// `Some(Value::Null)`.
pub trait ScalarType: Send + Sync {
    /// Name of the scalar type in the schema.
    fn name(&self) -> &str;

    /// Description of the scalar type, as shown in introspection.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Convert a resolver's result to a value that's written to a response.
    fn serialize(&self, value: Option<JSValue>) -> Result<JSValue>;

    /// Convert a variable's value, as passed alongside a request, to an input value.
    fn parse_value(&self, value: Option<JSValue>) -> Result<JSValue>;

    /// Convert a literal written inline in a query to an input value, substituting the
    /// request's already coerced variables. Returns `None` when the literal doesn't resolve to a
    /// value.
    fn parse_literal(
        &self,
        value: &Value<'_>,
        variables: Option<&VariableBindings>,
    ) -> Result<Option<JSValue>>;
}
