use super::lexer::{Arena, Token};
use super::literal::*;
use crate::error::{Error, ErrorType, Location, Result};
use bumpalo::collections::Vec;
use logos::{Lexer, Logos};

/// Description of what the parser was looking for when it failed.
type Expected = &'static str;
type ParseResult<T> = std::result::Result<T, Expected>;

pub(crate) mod private {
    use super::{Lexer, ParseResult, Token};

    /// Recursive descent state over a lexer with a single token of lookahead.
    pub struct Parser<'a> {
        pub(crate) arena: &'a bumpalo::Bump,
        pub(crate) lexer: Lexer<'a, Token<'a>>,
        pub(crate) peeked: Option<Token<'a>>,
    }

    /// Nodes that may be parsed on their own from a source text.
    pub trait Parse<'a>: Sized {
        fn parse_from(parser: &mut Parser<'a>) -> ParseResult<Self>;
    }
}

use private::Parser;

impl<'a> Parser<'a> {
    fn new(ctx: &'a ASTContext, source: &'a str) -> Self {
        Parser {
            arena: &ctx.arena,
            lexer: Token::lexer_with_extras(source, Arena(&ctx.arena)),
            peeked: None,
        }
    }

    #[inline]
    fn peek(&mut self) -> Token<'a> {
        let lexer = &mut self.lexer;
        *self
            .peeked
            .get_or_insert_with(|| lexer.next().unwrap_or(Token::End))
    }

    #[inline]
    fn advance(&mut self) -> Token<'a> {
        match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next().unwrap_or(Token::End),
        }
    }

    /// Consumes the next token if it's the given punctuator.
    #[inline]
    fn eat(&mut self, punct: char) -> bool {
        let found = self.peek() == Token::Punct(punct);
        if found {
            self.advance();
        }
        found
    }

    #[inline]
    fn expect(&mut self, punct: char, expected: Expected) -> ParseResult<()> {
        if self.eat(punct) {
            Ok(())
        } else {
            Err(expected)
        }
    }

    /// Parses a value literal. Default values of variables are `constant` and may not reference
    /// other variables.
    fn value(&mut self, constant: bool) -> ParseResult<Value<'a>> {
        let value = match self.advance() {
            Token::Variable(_) if constant => return Err("a constant value"),
            Token::Variable(name) => Value::Variable(name),
            Token::String(value) => Value::String(value),
            Token::Int(text) => Value::Int(text),
            Token::Float(text) => Value::Float(text),
            Token::Name("true") => Value::Boolean(true),
            Token::Name("false") => Value::Boolean(false),
            Token::Name("null") => Value::Null,
            Token::Name(name) => Value::Enum(name),
            Token::Punct('[') => {
                let mut items = Vec::new_in(self.arena);
                while !self.eat(']') {
                    if self.peek() == Token::End {
                        return Err("a list item or `]`");
                    }
                    items.push(self.value(constant)?);
                }
                Value::List(items)
            }
            Token::Punct('{') => {
                let mut fields = Vec::new_in(self.arena);
                while !self.eat('}') {
                    let name = match self.advance() {
                        Token::Name(name) => name,
                        _ => return Err("an object field or `}`"),
                    };
                    self.expect(':', "`:` after an object field's name")?;
                    let value = self.value(constant)?;
                    fields.push(ObjectField { name, value });
                }
                Value::Object(fields)
            }
            _ => return Err("a value"),
        };
        Ok(value)
    }

    fn type_ref(&mut self) -> ParseResult<TypeRef<'a>> {
        let of_type = match self.advance() {
            Token::Name(name) => TypeRef::Named(name),
            Token::Punct('[') => {
                let item = self.type_ref()?;
                self.expect(']', "`]` after a list type")?;
                TypeRef::List(self.arena.alloc(item))
            }
            _ => return Err("a type"),
        };
        if self.eat('!') {
            Ok(TypeRef::NonNull(self.arena.alloc(of_type)))
        } else {
            Ok(of_type)
        }
    }

    fn variable_definitions(&mut self) -> ParseResult<VariableDefinitions<'a>> {
        let mut children = Vec::new_in(self.arena);
        if self.eat('(') {
            while !self.eat(')') {
                let name = match self.advance() {
                    Token::Variable(name) => name,
                    _ => return Err("a variable definition or `)`"),
                };
                self.expect(':', "`:` after a variable's name")?;
                let of_type = self.type_ref()?;
                let default_value = match self.eat('=') {
                    true => Some(self.value(true)?),
                    false => None,
                };
                children.push(VariableDefinition {
                    name,
                    of_type,
                    default_value,
                });
            }
        }
        Ok(VariableDefinitions { children })
    }

    /// Turns a failure into a syntax error pointing at the last token that was read.
    fn error(&self, expected: Expected) -> Error {
        let source = self.lexer.source();
        let span = self.lexer.span();
        Error::new_with_context(
            format!("Expected {}", expected),
            Some(Location::of(source, span.start)),
            Location::snippet(source, span),
            Some(ErrorType::Syntax),
        )
    }
}

impl<'a> private::Parse<'a> for Value<'a> {
    fn parse_from(parser: &mut Parser<'a>) -> ParseResult<Self> {
        parser.value(false)
    }
}

impl<'a> private::Parse<'a> for TypeRef<'a> {
    fn parse_from(parser: &mut Parser<'a>) -> ParseResult<Self> {
        parser.type_ref()
    }
}

impl<'a> private::Parse<'a> for VariableDefinitions<'a> {
    fn parse_from(parser: &mut Parser<'a>) -> ParseResult<Self> {
        parser.variable_definitions()
    }
}

/// Parsing of literals, type references, and variable definitions from source text.
///
/// The whole source text must make up exactly one node, e.g. `Value::parse(&ctx, "{ a: [1] }")`.
/// Failures are [`ErrorType::Syntax`] errors with the location of the offending token.
pub trait ParseNode<'a>: private::Parse<'a> {
    /// Parse `source` and allocate the resulting node in the context's arena.
    fn parse<T: ToString>(ctx: &'a ASTContext, source: T) -> Result<&'a Self> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser = Parser::new(ctx, source);
        let result = Self::parse_from(&mut parser).and_then(|node| match parser.advance() {
            Token::End => Ok(node),
            _ => Err("the end of the input"),
        });
        match result {
            Ok(node) => Ok(ctx.alloc(node)),
            Err(expected) => Err(parser.error(expected)),
        }
    }
}

impl<'a, T: private::Parse<'a>> ParseNode<'a> for T {}

#[cfg(test)]
mod tests {
    use super::ParseNode;
    use crate::ast::*;
    use crate::error::{ErrorType, Location};
    use bumpalo::collections::Vec;
    use indoc::indoc;

    #[test]
    fn error_locations() {
        let ctx = ASTContext::new();
        let error = Value::parse(&ctx, "{ document: { a: $ }}").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Syntax);
        assert_eq!(error.message(), "Expected a value");
        assert_eq!(error.location(), &Some(Location { line: 1, column: 18 }));

        let source = indoc! {"
            {
              document: {
                a: $
              }
            }
        "};
        let error = Value::parse(&ctx, source).unwrap_err();
        assert_eq!(error.location(), &Some(Location { line: 3, column: 8 }));
        assert_eq!(
            error.print(true),
            "Syntax Error: Expected a value\n 3 |     a: $\n   |        ^"
        );
    }

    #[test]
    fn incomplete_input() {
        let ctx = ASTContext::new();
        let expected = [
            ("{} {}", "Expected the end of the input"),
            ("1 2", "Expected the end of the input"),
            ("{ a: 1", "Expected an object field or `}`"),
            ("{ a 1 }", "Expected `:` after an object field's name"),
            ("[1, 2", "Expected a list item or `]`"),
            ("", "Expected a value"),
        ];
        for (source, message) in expected {
            assert_eq!(Value::parse(&ctx, source).unwrap_err().message(), message);
        }
    }

    #[test]
    fn scalars() {
        let ctx = ASTContext::new();
        let parse = |source: &str| Value::parse(&ctx, source).unwrap().clone();
        assert_eq!(parse("true"), Value::Boolean(true));
        assert_eq!(parse("false"), Value::Boolean(false));
        assert_eq!(parse("null"), Value::Null);
        assert_eq!(parse("$var"), Value::Variable("var"));
        assert_eq!(parse("MOBILE_WEB"), Value::Enum("MOBILE_WEB"));
        assert_eq!(parse("-123"), Value::Int("-123"));
        assert_eq!(parse("3.14e-2"), Value::Float("3.14e-2"));
        assert_eq!(parse("\"hello\\nworld\""), Value::String("hello\nworld"));
        assert_eq!(parse("\"\"\"\n  hello\n    world\n\"\"\""), Value::String("hello\n  world"));
    }

    #[test]
    fn lists_and_objects() {
        let ctx = ASTContext::new();
        let list = Value::parse(&ctx, "[null, [], {}]").unwrap();
        let expected = Vec::from_iter_in(
            [
                Value::Null,
                Value::List(Vec::new_in(&ctx.arena)),
                Value::Object(Vec::new_in(&ctx.arena)),
            ],
            &ctx.arena,
        );
        assert_eq!(*list, Value::List(expected));

        let object = Value::parse(&ctx, "{ a: 1, a: 2, null: null }").unwrap();
        let expected = Vec::from_iter_in(
            [
                ObjectField { name: "a", value: Value::Int("1") },
                ObjectField { name: "a", value: Value::Int("2") },
                ObjectField { name: "null", value: Value::Null },
            ],
            &ctx.arena,
        );
        assert_eq!(*object, Value::Object(expected));
    }

    #[test]
    fn type_refs() {
        let ctx = ASTContext::new();
        let named = TypeRef::Named("JSON");
        assert_eq!(*TypeRef::parse(&ctx, "JSON").unwrap(), named);
        assert_eq!(*TypeRef::parse(&ctx, "JSON!").unwrap(), TypeRef::NonNull(&named));
        assert_eq!(
            *TypeRef::parse(&ctx, "[JSON!]").unwrap(),
            TypeRef::List(&TypeRef::NonNull(&named))
        );
        assert_eq!(
            TypeRef::parse(&ctx, "[JSON").unwrap_err().message(),
            "Expected `]` after a list type"
        );
        assert!(TypeRef::parse(&ctx, "!").is_err());
    }

    #[test]
    fn variable_definitions() {
        let ctx = ASTContext::new();
        let defs = VariableDefinitions::parse(&ctx, "($intValue: Int = 3, $input: CrJson!)").unwrap();
        assert_eq!(defs.len(), 2);

        let int_value = &defs.children[0];
        assert_eq!(int_value.name, "intValue");
        assert_eq!(int_value.of_type, TypeRef::Named("Int"));
        assert_eq!(int_value.default_value, Some(Value::Int("3")));

        let input = &defs.children[1];
        assert_eq!(input.name, "input");
        assert!(input.of_type.is_nonnull());
        assert_eq!(input.default_value, None);

        assert!(VariableDefinitions::parse(&ctx, "").unwrap().is_empty());
        assert!(VariableDefinitions::parse(&ctx, "()").unwrap().is_empty());
    }

    #[test]
    fn constant_defaults() {
        let ctx = ASTContext::new();
        for source in ["($a: Int = $b)", "($a: JSON = { b: [$c] })"] {
            let error = VariableDefinitions::parse(&ctx, source).unwrap_err();
            assert_eq!(error.message(), "Expected a constant value");
        }
    }
}
