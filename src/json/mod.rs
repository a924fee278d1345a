//! # JSON Conversion
//!
//! The `graphql_json_scalar::json` module converts between AST value literals and `serde_json`
//! values, which is the representation the JSON scalar works with.
//!
//! The [LiteralValue] trait allows conversion to `serde_json` values using a `to_json` method on
//! any given literal node, substituting variables from [VariableBindings]. It reads literals the
//! way JSON scalars have always read them: numbers become floats, unresolved variables and enums
//! become a missing value (`None`), which is distinct from `null`.
//!
//! The module otherwise only contains a handful of utility functions:
//!
//! - [value_from_literal] is the entry point to convert a literal with optional variables.
//! - [ast_from_value_untyped] is used to convert any given JSON value back to an AST literal.

mod conversion;
mod values;

pub use conversion::*;
pub use values::*;

/// Map of already coerced variable values, keyed by variable name without the `$` prefix.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Coercing-Variable-Values)
pub type VariableBindings = serde_json::Map<String, serde_json::Value>;
