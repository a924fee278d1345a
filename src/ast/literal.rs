use bumpalo::{collections::Vec, Bump};

/// Owner of the memory behind every node parsed for one request.
///
/// Literals, type references and variable definitions borrow their strings and children from the
/// context's arena, so the whole tree is freed at once when the context is dropped. A context
/// shouldn't outlive the request it was created for.
pub struct ASTContext {
    pub arena: Bump,
}

impl ASTContext {
    pub fn new() -> Self {
        ASTContext { arena: Bump::new() }
    }

    /// Move `item` into the arena.
    #[inline]
    pub fn alloc<T>(&self, item: T) -> &T {
        self.arena.alloc(item)
    }

    /// Copy a string slice into the arena, e.g. a key of a `serde_json::Map`.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }

    /// Move an owned `String` into the arena without copying its contents.
    #[inline]
    pub fn alloc_string(&self, str: String) -> &str {
        self.arena.alloc(str)
    }
}

impl Default for ASTContext {
    fn default() -> Self {
        ASTContext::new()
    }
}

/// Items of a [`Value::List`] literal.
pub type ListValue<'a> = Vec<'a, Value<'a>>;

/// Fields of a [`Value::Object`] literal in source order. Names may repeat.
pub type ObjectValue<'a> = Vec<'a, ObjectField<'a>>;

/// A value written inline in a query, as an argument or as a variable's default.
///
/// Scalars receive literals as they were written, before anything has been coerced. Number
/// variants keep their source text, since how they're read depends on the scalar that reads them.
/// String variants hold the decoded string, without quotes or escapes.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Values)
#[derive(Debug, PartialEq, Clone)]
pub enum Value<'a> {
    /// A `$name` reference to one of the request's variables. Holds the name without `$`.
    Variable(&'a str),
    String(&'a str),
    Int(&'a str),
    Float(&'a str),
    Boolean(bool),
    Enum(&'a str),
    List(ListValue<'a>),
    Object(ObjectValue<'a>),
    Null,
}

impl<'a> Value<'a> {
    /// Returns the name GraphQL engines use for this kind of literal in error messages, e.g.
    /// `StringValue` for `"a"` or `Variable` for `$a`.
    pub fn node_name(&self) -> &'static str {
        match self {
            Value::Variable(_) => "Variable",
            Value::String(_) => "StringValue",
            Value::Int(_) => "IntValue",
            Value::Float(_) => "FloatValue",
            Value::Boolean(_) => "BooleanValue",
            Value::Enum(_) => "EnumValue",
            Value::List(_) => "ListValue",
            Value::Object(_) => "ObjectValue",
            Value::Null => "NullValue",
        }
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }
}

/// One `name: value` entry of an object literal.
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectField<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

/// Reference to an input type, as written in a variable definition, e.g. `[JSON!]!`.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-References)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TypeRef<'a> {
    Named(&'a str),
    List(&'a TypeRef<'a>),
    NonNull(&'a TypeRef<'a>),
}

impl<'a> TypeRef<'a> {
    #[inline]
    pub fn is_nonnull(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }
}

/// A single `$name: Type = default` entry of an operation's variable definitions.
#[derive(Debug, PartialEq, Clone)]
pub struct VariableDefinition<'a> {
    /// Name of the variable without `$`.
    pub name: &'a str,
    pub of_type: TypeRef<'a>,
    /// `None` when there's no default at all, which is different from `= null`.
    pub default_value: Option<Value<'a>>,
}

/// The parenthesized variable definitions of an operation, e.g. `($input: JSON, $n: Int = 3)`.
#[derive(Debug, PartialEq, Clone)]
pub struct VariableDefinitions<'a> {
    pub children: Vec<'a, VariableDefinition<'a>>,
}

impl<'a> VariableDefinitions<'a> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }
}

impl<'a, 'b> IntoIterator for &'b VariableDefinitions<'a> {
    type Item = &'b VariableDefinition<'a>;
    type IntoIter = std::slice::Iter<'b, VariableDefinition<'a>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}
