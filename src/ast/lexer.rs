use bumpalo::Bump;
use logos::{Lexer, Logos};

/// Arena that decoded strings are allocated into while lexing.
#[derive(Clone, Copy)]
pub struct Arena<'s>(pub &'s Bump);

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(extras = Arena<'s>)]
pub enum Token<'a> {
    #[regex(r"[\[\]{}():=!]", |lex| lex.slice().chars().next())]
    Punct(char),

    #[regex(r"\$[_A-Za-z][_0-9A-Za-z]*", |lex| &lex.slice()[1..])]
    Variable(&'a str),

    #[regex(r"[_A-Za-z][_0-9A-Za-z]*")]
    Name(&'a str),

    #[regex(r"-?(0|[1-9][0-9]*)")]
    Int(&'a str),

    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)")]
    Float(&'a str),

    #[token("\"", lex_string)]
    #[token("\"\"\"", lex_block_string)]
    String(&'a str),

    // Commas count as whitespace in GraphQL
    #[error]
    #[regex(r"[ \t\r\n,]+", logos::skip)]
    #[regex(r"#[^\r\n]*", logos::skip)]
    Error,

    End,
}

#[inline]
fn read_hex(text: &str) -> Option<u32> {
    use lexical_core::*;
    const HEX: u128 = NumberFormatBuilder::hexadecimal();
    const OPTIONS: ParseIntegerOptions = ParseIntegerOptions::new();
    if text.len() != 4 || !text.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    parse_with_options::<u32, HEX>(text.as_bytes(), &OPTIONS).ok()
}

/// Decodes the `XXXX` of a `\uXXXX` escape at the start of `rest`, joining a surrogate pair when
/// a second escape follows. Returns the character and the number of bytes it spans.
fn read_unicode_escape(rest: &str) -> Option<(char, usize)> {
    let unit = read_hex(rest.get(..4)?)?;
    if (0xD800..0xDC00).contains(&unit) {
        let low = rest
            .get(4..6)
            .filter(|prefix| *prefix == "\\u")
            .and_then(|_| read_hex(rest.get(6..10)?))
            .filter(|low| (0xDC00..0xE000).contains(low))?;
        let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(code).map(|c| (c, 10));
    }
    char::from_u32(unit).map(|c| (c, 4))
}

fn lex_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    let rest = lex.remainder();
    let mut output = String::new();
    let mut has_escapes = false;
    let mut index = 0;
    while let Some(c) = rest[index..].chars().next() {
        index += c.len_utf8();
        match c {
            '"' => {
                lex.bump(index);
                return if has_escapes {
                    Some(lex.extras.0.alloc_str(&output))
                } else {
                    Some(&rest[..index - 1])
                };
            }
            '\n' | '\r' => return None,
            '\\' => {
                has_escapes = true;
                let escaped = rest[index..].chars().next()?;
                index += escaped.len_utf8();
                output.push(match escaped {
                    '"' => '"',
                    '\\' => '\\',
                    '/' => '/',
                    'b' => '\u{8}',
                    'f' => '\u{c}',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'u' => {
                        let (decoded, len) = read_unicode_escape(&rest[index..])?;
                        index += len;
                        decoded
                    }
                    _ => return None,
                });
            }
            c => output.push(c),
        }
    }
    None
}

fn lex_block_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    let rest = lex.remainder();
    let mut raw = String::new();
    let mut index = 0;
    loop {
        let tail = &rest[index..];
        if tail.starts_with("\\\"\"\"") {
            raw.push_str("\"\"\"");
            index += 4;
        } else if tail.starts_with("\"\"\"") {
            lex.bump(index + 3);
            return Some(lex.extras.0.alloc_str(&block_string_value(&raw)));
        } else {
            let c = tail.chars().next()?;
            raw.push(c);
            index += c.len_utf8();
        }
    }
}

#[inline]
fn is_indent(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Number of leading spaces and tabs, which are single bytes.
#[inline]
fn indent_len(line: &str) -> usize {
    line.len() - line.trim_start_matches(is_indent).len()
}

/// Turns the raw text between `"""` delimiters into the string value it stands for.
///
/// The smallest indentation of all lines with content after the first is removed from every line
/// but the first, then leading and trailing lines holding only whitespace are dropped.
///
/// [Reference](https://spec.graphql.org/October2021/#BlockStringValue())
pub(crate) fn block_string_value(raw: &str) -> String {
    let lines = raw
        .split("\r\n")
        .flat_map(|line| line.split(|c: char| c == '\n' || c == '\r'))
        .collect::<Vec<&str>>();

    let common_indent = lines
        .iter()
        .skip(1)
        .map(|line| (indent_len(line), line.len()))
        .filter(|(indent, len)| indent < len)
        .map(|(indent, _)| indent)
        .min()
        .unwrap_or(0);

    let is_blank = |line: &&str| indent_len(line) == line.len();
    let dedented = lines
        .iter()
        .enumerate()
        .map(|(index, line)| match index {
            0 => *line,
            _ => &line[common_indent.min(indent_len(line))..],
        })
        .collect::<Vec<&str>>();
    let start = dedented.iter().position(|line| !is_blank(line));
    let end = dedented.iter().rposition(|line| !is_blank(line));
    match (start, end) {
        (Some(start), Some(end)) => dedented[start..=end].join("\n"),
        _ => String::new(),
    }
}
