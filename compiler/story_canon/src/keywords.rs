//! Identifier legality.
//!
//! Command names, path roots and declared names (functions, typed
//! arguments, outputs) may not be keywords and may not use the internal
//! `__` prefix.

use story_diagnostic::{ErrorType, StoryError};
use story_ir::{Child, Node, Token, TokenKind};

use crate::CanonResult;

/// Keywords of the language.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "function", "if", "else", "foreach", "return", "returns", "try", "catch", "finally", "when",
    "as", "while", "throw", "null",
];

/// Words kept free for future language versions.
pub const FUTURE_RESERVED_KEYWORDS: &[&str] = &[
    "async",
    "story",
    "assert",
    "called",
    "mock",
    "class",
    "extends",
    "implements",
    "interface",
    "type",
    "public",
    "private",
    "protected",
    "const",
    "immutable",
    "let",
    "var",
    "auto",
    "switch",
    "module",
    "package",
    "final",
    "this",
    "self",
    "case",
    "abstract",
    "static",
    "none",
    "await",
    "service",
    "in",
    "has",
    "not",
    "is",
    "inf",
    "nan",
    "unknown",
    "import",
];

const INTERNAL_PREFIX: &str = "__";

/// Reject reserved, future-reserved and internal names.
pub fn check_identifier(token: &Token) -> Result<(), StoryError> {
    let name = token.text.as_str();
    if RESERVED_KEYWORDS.contains(&name) {
        return Err(StoryError::new(ErrorType::ReservedKeyword, token).with_arg("keyword", name));
    }
    if FUTURE_RESERVED_KEYWORDS.contains(&name) {
        return Err(
            StoryError::new(ErrorType::FutureReservedKeyword, token).with_arg("keyword", name)
        );
    }
    if name.starts_with(INTERNAL_PREFIX) {
        return Err(StoryError::new(ErrorType::PathNameInternal, token));
    }
    Ok(())
}

/// Check the leading token of a node, if it starts with one.
fn check_first(node: &Node) -> CanonResult<()> {
    if let Some(token) = node.child_token(0) {
        check_identifier(token)?;
    }
    Ok(())
}

/// `path`: the root name.
pub(crate) fn path(node: Node) -> CanonResult<Node> {
    check_first(&node)?;
    Ok(node)
}

/// `command`: the command name.
pub(crate) fn command(node: Node) -> CanonResult<Node> {
    check_first(&node)?;
    Ok(node)
}

/// `output`: every declared output name.
pub(crate) fn output(node: Node) -> CanonResult<Node> {
    for token in node.children.iter().filter_map(Child::as_token) {
        if token.is(&TokenKind::Name) {
            check_identifier(token)?;
        }
    }
    Ok(node)
}

/// `function_statement` / `typed_argument`: the declared name.
pub(crate) fn declaration(node: Node) -> CanonResult<Node> {
    let name = node
        .children
        .iter()
        .filter_map(Child::as_token)
        .find(|token| token.is(&TokenKind::Name));
    if let Some(token) = name {
        check_identifier(token)?;
    }
    Ok(node)
}
