use super::literal::*;
use std::fmt::{self, Write};

/// Printing of nodes back to source text that parses to the same node.
///
/// Printed literals show up in engine errors such as `Expected type JSON, found "a"; ...`, so the
/// output stays close to what a user would have typed: one line, `, ` between items.
pub trait PrintNode {
    fn write_to_buffer(&self, buffer: &mut dyn Write) -> fmt::Result;

    fn print(&self) -> String {
        let mut out = String::new();
        match self.write_to_buffer(&mut out) {
            Ok(()) => out,
            Err(_) => String::new(),
        }
    }
}

impl fmt::Display for dyn PrintNode + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to_buffer(f)
    }
}

/// Writes a quoted string. Only `"`, `\` and control characters are escaped, so every other
/// character, including those outside the Basic Multilingual Plane, is written as it is.
fn write_string(value: &str, buffer: &mut dyn Write) -> fmt::Result {
    buffer.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => buffer.write_str("\\\"")?,
            '\\' => buffer.write_str("\\\\")?,
            '\n' => buffer.write_str("\\n")?,
            '\r' => buffer.write_str("\\r")?,
            '\t' => buffer.write_str("\\t")?,
            '\u{8}' => buffer.write_str("\\b")?,
            '\u{c}' => buffer.write_str("\\f")?,
            c if c < ' ' => write!(buffer, "\\u{:04x}", c as u32)?,
            c => buffer.write_char(c)?,
        }
    }
    buffer.write_char('"')
}

fn write_list<T>(
    open: char,
    items: &[T],
    close: char,
    buffer: &mut dyn Write,
    mut write_item: impl FnMut(&T, &mut dyn Write) -> fmt::Result,
) -> fmt::Result {
    buffer.write_char(open)?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            buffer.write_str(", ")?;
        }
        write_item(item, buffer)?;
    }
    buffer.write_char(close)
}

impl<'a> PrintNode for Value<'a> {
    fn write_to_buffer(&self, buffer: &mut dyn Write) -> fmt::Result {
        match self {
            Value::Variable(name) => write!(buffer, "${}", name),
            Value::String(value) => write_string(value, buffer),
            Value::Int(text) | Value::Float(text) | Value::Enum(text) => buffer.write_str(text),
            Value::Boolean(value) => write!(buffer, "{}", value),
            Value::Null => buffer.write_str("null"),
            Value::List(items) => write_list('[', items, ']', buffer, |item, buffer| {
                item.write_to_buffer(buffer)
            }),
            Value::Object(fields) => write_list('{', fields, '}', buffer, |field, buffer| {
                write!(buffer, "{}: ", field.name)?;
                field.value.write_to_buffer(buffer)
            }),
        }
    }
}

impl<'a> PrintNode for TypeRef<'a> {
    fn write_to_buffer(&self, buffer: &mut dyn Write) -> fmt::Result {
        match self {
            TypeRef::Named(name) => buffer.write_str(name),
            TypeRef::List(item) => {
                buffer.write_char('[')?;
                item.write_to_buffer(buffer)?;
                buffer.write_char(']')
            }
            TypeRef::NonNull(of_type) => {
                of_type.write_to_buffer(buffer)?;
                buffer.write_char('!')
            }
        }
    }
}

impl<'a> PrintNode for VariableDefinitions<'a> {
    fn write_to_buffer(&self, buffer: &mut dyn Write) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write_list('(', &self.children, ')', buffer, |def, buffer| {
            write!(buffer, "${}: ", def.name)?;
            def.of_type.write_to_buffer(buffer)?;
            match &def.default_value {
                Some(value) => {
                    buffer.write_str(" = ")?;
                    value.write_to_buffer(buffer)
                }
                None => Ok(()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;

    fn reprint(source: &str) -> String {
        let ctx = ASTContext::new();
        Value::parse(&ctx, source).unwrap().print()
    }

    #[test]
    fn values() {
        assert_eq!(reprint("{ a: true, b: [1, 2] }"), "{a: true, b: [1, 2]}");
        assert_eq!(reprint("123.23e20"), "123.23e20");
        assert_eq!(reprint("[$x, ENUM, null, {}]"), "[$x, ENUM, null, {}]");
    }

    #[test]
    fn strings() {
        assert_eq!(reprint(r#""say \"hi\"\t""#), r#""say \"hi\"\t""#);
        assert_eq!(reprint(r#""a\\b\/c""#), r#""a\\b/c""#);
        assert_eq!(reprint("\"\\u0001\\u001F\""), "\"\\u0001\\u001f\"");
        assert_eq!(reprint("\"smile 😀 é\""), "\"smile 😀 é\"");
        assert_eq!(reprint("\"\\ud83d\\ude00\""), "\"😀\"");
        assert_eq!(reprint("\"\"\"\n  two\n    lines\n\"\"\""), "\"two\\n  lines\"");
    }

    #[test]
    fn strings_parse_back() {
        let ctx = ASTContext::new();
        for text in ["ab\n  c", "\n\n  lead", "trail \n", "😀\u{7}\"\"\"", "\r\n\t"] {
            let printed = Value::String(text).print();
            assert_eq!(*Value::parse(&ctx, printed).unwrap(), Value::String(text));
        }
    }

    #[test]
    fn type_refs_and_definitions() {
        let ctx = ASTContext::new();
        let defs = VariableDefinitions::parse(&ctx, "($a:Int=3 $b:[CrJson!]! $c: JSON = {x: \"y\"})");
        assert_eq!(
            defs.unwrap().print(),
            "($a: Int = 3, $b: [CrJson!]!, $c: JSON = {x: \"y\"})"
        );
        assert_eq!(VariableDefinitions::parse(&ctx, "").unwrap().print(), "");
        assert_eq!(TypeRef::parse(&ctx, "[[A]!]").unwrap().print(), "[[A]!]");
    }
}
