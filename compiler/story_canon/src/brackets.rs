//! Bracket stripping.
//!
//! Lists, maps, type brackets and destructuring targets lose their delimiter
//! tokens. The node keeps the delimiters' combined span so diagnostics can
//! still point at the whole construct.

use story_ir::{Child, Node, NodeKind, Token};

fn delimiter(child: Option<&Child>) -> Option<&Token> {
    child
        .and_then(Child::as_token)
        .filter(|token| token.kind.is_delimiter())
}

fn is_delimiter(child: &Child) -> bool {
    delimiter(Some(child)).is_some()
}

/// Drop delimiter tokens, recording their span on the node.
pub(crate) fn strip(mut node: Node) -> Node {
    let open = node
        .children
        .iter()
        .find_map(Child::as_token)
        .map(Token::position);
    let close = delimiter(node.children.last()).map(Token::position);
    if let (Some(open), Some(close)) = (open, close) {
        node.position = Some(open.to(close));
    }
    node.children.retain(|child| !is_delimiter(child));
    node
}

/// `path_fragment` / `value_fragment`: `[expr]` subscripts lose their
/// brackets, plain `.name` fragments stay as they are.
pub(crate) fn path_fragment(node: Node) -> Node {
    let mut node = if node.children.len() > 1 {
        strip(node)
    } else {
        node
    };
    node.kind = NodeKind::PathFragment;
    node
}
