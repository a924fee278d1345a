//! # GraphQL Literals
//!
//! The `graphql_json_scalar::ast` module holds the part of the GraphQL query language that
//! scalars deal with: value literals, type references, and variable definitions.
//! [Reference](https://spec.graphql.org/October2021/#sec-Input-Values)
//!
//! - [`ASTContext`] owns the arena every parsed node lives in.
//! - [`ParseNode`] parses a [`Value`], [`TypeRef`], or [`VariableDefinitions`] from source text.
//! - [`PrintNode`] prints them back.
//!
//! ```
//! use graphql_json_scalar::ast::*;
//!
//! let ctx = ASTContext::new();
//! let ast = Value::parse(&ctx, "{ list: [1, 2.5], ref: $var }").unwrap();
//!
//! assert_eq!(ast.node_name(), "ObjectValue");
//! assert_eq!(ast.print(), "{list: [1, 2.5], ref: $var}");
//! ```

mod lexer;
mod literal;
mod parser;
mod printer;

pub use literal::*;
pub use parser::ParseNode;
pub use printer::PrintNode;
