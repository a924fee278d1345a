//! `graphql_json_scalar`
//! =========
//!
//! _A `JSON` custom scalar type for GraphQL, built on a fast literal AST._
//!
//! The **`graphql_json_scalar`** library lets a GraphQL server carry arbitrary JSON values through
//! results, variables, and inline query literals:
//!
//! - The [`scalar`] module contains the [`ScalarType`](scalar::ScalarType) contract and the
//!   [`JsonScalar`](scalar::JsonScalar) with its strict and permissive validation modes.
//! - The [`ast`] module parses and prints GraphQL value literals, types, and variable definitions
//!   into an arena allocated AST.
//! - The [`json`] module converts AST literals to `serde_json` values and back.
//! - The [`coercion`] module shows how an engine calls into scalars when it coerces variables,
//!   arguments, and results, and how it reports their errors.
//!
//! The crate doesn't aim to be a GraphQL server. It's the piece an engine plugs in to support a
//! `JSON` scalar, and the minimal amount of the query language it takes to exercise it.
//!
//! [A good place to start learning more about this crate is the `scalar` module...](scalar)

pub mod ast;
pub mod coercion;
pub mod error;
pub mod json;
pub mod scalar;

pub use bumpalo;
