//! Literal values.

use std::num::IntErrorKind;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use story_diagnostic::InternalError;
use story_ir::{Child, Node, NodeKind, Object, Token, TokenKind, Value};

use crate::{lower, lower_child, LowerResult};

#[expect(clippy::expect_used, reason = "constant pattern")]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]*)\}").expect("placeholder pattern is valid"));

fn value_token(node: &Node) -> LowerResult<&Token> {
    node.child_token(0)
        .ok_or_else(|| InternalError::malformed(node, "expected a value token"))
}

/// Text of a string token without any remaining quotes.
fn unquoted(token: &Token) -> &str {
    let width = match token.kind {
        TokenKind::DoubleQuoted | TokenKind::SingleQuoted => 1,
        TokenKind::TripleQuoted => 3,
        _ => return &token.text,
    };
    let end = token.text.len().saturating_sub(width);
    token.text.get(width..end).unwrap_or_default()
}

/// `string[STRING]`
///
/// Every `{name}` placeholder becomes `{}` and contributes one path value,
/// in order of appearance. Strings without placeholders have no `values`.
pub fn string(node: &Node) -> LowerResult<Value> {
    let text = unquoted(value_token(node)?);
    let values: Vec<Value> = PLACEHOLDER
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|name| Value::path([name.as_str()]))
        .collect();
    if values.is_empty() {
        return Ok(Value::string(text));
    }
    Ok(Value::Object(Object::String {
        string: PLACEHOLDER.replace_all(text, NoExpand("{}")).into_owned(),
        values: Some(values),
    }))
}

/// `INT` tokens are always integers; only `FLOAT` tokens become floats.
pub(crate) fn parse_number(token: &Token) -> LowerResult<Value> {
    let text = token.text.as_str();
    let not_a_number = || InternalError::Malformed {
        kind: token.kind.to_string(),
        reason: "not a number",
    };
    if token.is(&TokenKind::Float) {
        return text.parse::<f64>().map(Value::Float).map_err(|_| not_a_number());
    }
    text.parse::<i64>().map(Value::Number).map_err(|error| match error.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            InternalError::IntegerOutOfRange(text.to_owned())
        }
        _ => not_a_number(),
    })
}

/// `number[INT | FLOAT]`
pub(crate) fn number(node: &Node) -> LowerResult<Value> {
    parse_number(value_token(node)?)
}

/// `boolean[TRUE | FALSE]`
pub(crate) fn boolean(node: &Node) -> Value {
    Value::Boolean(node.child_token(0).is_some_and(|token| token.text == "true"))
}

/// `list[value*]`, delimiters already stripped.
pub(crate) fn list(node: &Node) -> LowerResult<Value> {
    let items = node
        .children
        .iter()
        .filter_map(Child::as_node)
        .map(lower)
        .collect::<LowerResult<_>>()?;
    Ok(Value::Object(Object::List { items }))
}

/// `map[key_value*]` with string keys.
pub(crate) fn map(node: &Node) -> LowerResult<Value> {
    let items = node
        .children
        .iter()
        .filter_map(Child::as_node)
        .map(|entry| {
            let Some(key) = entry.find(&NodeKind::String) else {
                return Err(InternalError::malformed(entry, "map key must be a string"));
            };
            let Some(value) = entry.child(1) else {
                return Err(InternalError::malformed(entry, "map entry without value"));
            };
            Ok((string(key)?, lower_child(value)?))
        })
        .collect::<LowerResult<_>>()?;
    Ok(Value::Object(Object::Dict { items }))
}

/// Type name of a `types` node: `int`, `List[int]`, `Map[string,int]`.
pub fn type_name(node: &Node) -> LowerResult<String> {
    match node.first_child() {
        Some(Child::Token(token)) => Ok(token.text.clone()),
        Some(Child::Node(inner)) => match inner.kind {
            NodeKind::Types => type_name(inner),
            NodeKind::ListType => {
                let element = nth_type(inner, 0)?;
                Ok(format!("List[{element}]"))
            }
            NodeKind::MapType => {
                let key = nth_type(inner, 0)?;
                let value = nth_type(inner, 1)?;
                Ok(format!("Map[{key},{value}]"))
            }
            _ => Err(InternalError::UnknownValueNode(inner.kind.to_string())),
        },
        None => Err(InternalError::malformed(node, "empty type")),
    }
}

fn nth_type(node: &Node, index: usize) -> LowerResult<String> {
    match node.children.iter().filter_map(Child::as_node).nth(index) {
        Some(inner) => type_name(inner),
        None => Err(InternalError::malformed(node, "missing type parameter")),
    }
}

/// `FILEPATH` tokens keep their text without the surrounding markers.
pub(crate) fn file(token: &Token) -> Value {
    let end = token.text.len().saturating_sub(1);
    let string = token.text.get(1..end).unwrap_or_default().to_owned();
    Value::Object(Object::File { string })
}
