//! Canonical tree → IR value lowering.
//!
//! Every canonical subtree that denotes a value lowers to a [`Value`]:
//! literals, paths, collections, expressions, argument lists and
//! mutation/method calls. Lowering is pure and never produces user-facing
//! errors. A node kind it does not know means the normalizer and the
//! lowerer disagree about the canonical vocabulary, which is reported as an
//! [`InternalError`].
//!
//! # Modules
//!
//! - `literals`: strings, numbers, booleans, lists, maps, types, files
//! - `calls`: arguments, typed arguments, mutations, methods
//! - `expr`: binary, unary and comparison expressions

mod calls;
mod expr;
mod literals;

use story_diagnostic::InternalError;
use story_ir::{Child, Node, NodeKind, Object, PathFragment, Token, TokenKind, Value};

pub use calls::{argument, arguments, function_arguments, method, mutation};
pub use expr::expression;
pub use literals::{string, type_name};

/// Result of lowering a value.
pub type LowerResult<T> = Result<T, InternalError>;

/// Lower a canonical value node.
pub fn lower(node: &Node) -> LowerResult<Value> {
    tracing::trace!(kind = %node.kind, "lowering value");
    match node.kind {
        NodeKind::Path => path(node),
        NodeKind::String => literals::string(node),
        NodeKind::Number => literals::number(node),
        NodeKind::Boolean => Ok(literals::boolean(node)),
        NodeKind::List => literals::list(node),
        NodeKind::Map => literals::map(node),
        NodeKind::Types => Ok(Value::type_name(literals::type_name(node)?)),
        NodeKind::Service => Ok(calls::method(node)?.into()),
        NodeKind::Mutation | NodeKind::MutationFragment => Ok(calls::mutation(node)?.into()),
        NodeKind::Arguments => Ok(calls::argument(node)?.into()),
        NodeKind::Expression => expr::expression(node),
        NodeKind::Entity
        | NodeKind::Values
        | NodeKind::BaseExpression
        | NodeKind::InlineExpression
        | NodeKind::PathValue => first(node),
        _ => Err(InternalError::UnknownValueNode(node.kind.to_string())),
    }
}

/// Lower a node or a bare value token.
pub fn lower_child(child: &Child) -> LowerResult<Value> {
    match child {
        Child::Node(node) => lower(node),
        Child::Token(token) => lower_token(token),
    }
}

fn first(node: &Node) -> LowerResult<Value> {
    match node.first_child() {
        Some(child) => lower_child(child),
        None => Err(InternalError::malformed(node, "empty value")),
    }
}

fn lower_token(token: &Token) -> LowerResult<Value> {
    match token.kind {
        TokenKind::Filepath => Ok(literals::file(token)),
        TokenKind::Name => Ok(Value::path([token.text.as_str()])),
        TokenKind::Int | TokenKind::Float => literals::parse_number(token),
        TokenKind::True | TokenKind::False => Ok(Value::Boolean(token.text == "true")),
        TokenKind::StringContent => Ok(Value::string(token.text.as_str())),
        _ => Err(InternalError::UnknownValueNode(token.kind.to_string())),
    }
}

/// `path[root, path_fragment*]`.
///
/// A root that is an inline expression stands for the value it wraps.
fn path(node: &Node) -> LowerResult<Value> {
    let mut paths = Vec::with_capacity(node.children.len());
    for (index, child) in node.children.iter().enumerate() {
        match child {
            Child::Token(token) => paths.push(PathFragment::Name(token.text.clone())),
            Child::Node(inline) if index == 0 && inline.is(&NodeKind::InlineExpression) => {
                return first(inline);
            }
            Child::Node(fragment) => paths.push(path_fragment(fragment)?),
        }
    }
    Ok(Value::Object(Object::Path { paths }))
}

fn path_fragment(fragment: &Node) -> LowerResult<PathFragment> {
    match fragment.first_child() {
        Some(Child::Token(token)) if token.is(&TokenKind::Name) => {
            Ok(PathFragment::Name(token.text.clone()))
        }
        Some(child) => Ok(PathFragment::Value(lower_child(child)?)),
        None => Err(InternalError::malformed(fragment, "empty path fragment")),
    }
}
