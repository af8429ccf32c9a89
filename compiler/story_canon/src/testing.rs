//! Tree builders shared by the unit tests.

#![allow(clippy::unwrap_used)]

use story_ir::{Child, Node, NodeKind, Position, Token, TokenKind};

pub(crate) fn token(kind: TokenKind, text: &str, line: u32, column: u32) -> Token {
    let end = column + u32::try_from(text.len()).unwrap();
    Token::new(kind, text, Position::new(line, column, end))
}

pub(crate) fn name(text: &str, column: u32) -> Token {
    token(TokenKind::Name, text, 1, column)
}

pub(crate) fn node(kind: NodeKind, children: Vec<Child>) -> Node {
    Node::new(kind, children)
}

/// `path[NAME]`
pub(crate) fn path(text: &str, column: u32) -> Node {
    Node::leaf(NodeKind::Path, name(text, column))
}

/// `expression[entity[path[NAME]]]`
pub(crate) fn path_expression(text: &str, column: u32) -> Node {
    Node::wrap(
        NodeKind::Expression,
        Node::wrap(NodeKind::Entity, path(text, column)),
    )
}

/// `expression[entity[values[number[INT]]]]`
pub(crate) fn int_expression(text: &str, column: u32) -> Node {
    Node::wrap(
        NodeKind::Expression,
        Node::wrap(
            NodeKind::Entity,
            Node::wrap(
                NodeKind::Values,
                Node::leaf(NodeKind::Number, token(TokenKind::Int, text, 1, column)),
            ),
        ),
    )
}

/// `expression[entity[values[string[DOUBLE_QUOTED]]]]`
pub(crate) fn string_expression(text: &str, column: u32) -> Node {
    Node::wrap(
        NodeKind::Expression,
        Node::wrap(
            NodeKind::Entity,
            Node::wrap(
                NodeKind::Values,
                Node::leaf(
                    NodeKind::String,
                    token(TokenKind::StringContent, text, 1, column),
                ),
            ),
        ),
    )
}

/// `nested_block[block...]`
pub(crate) fn nested(blocks: Vec<Node>) -> Node {
    node(
        NodeKind::NestedBlock,
        blocks.into_iter().map(Child::Node).collect(),
    )
}
