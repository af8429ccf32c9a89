//! `when` block shapes.
//!
//! The grammar has no look-ahead, so a single `when` line can arrive in four
//! different shapes. They are resolved in this order, and each later shape
//! relies on the earlier ones having been ruled out:
//!
//! 1. `when <name> [output]`: command inferred from the enclosing call
//! 2. `when <service> <path> [output]`: the path is really the command
//! 3. `when <service> <path> <arguments>`: no command in the fragment, so the
//!    path is either the command or the name of the first argument
//! 4. `when <service> <command> ...`: concise form, wrapped in a
//!    `concise_when_block`
//!
//! Every shape except the fourth produces
//! `when_block[service[path[name], service_fragment], block]`.

use story_diagnostic::InternalError;
use story_ir::{Child, Node, NodeKind, Token, TokenKind};

use crate::expr::argument_shorthand;
use crate::CanonResult;

/// `when_block[service[path[name], fragment], block]`
fn when_block_tree(service_name: Token, fragment: Node, block: Child) -> Node {
    let service = Node::new(
        NodeKind::Service,
        vec![
            Node::leaf(NodeKind::Path, service_name).into(),
            fragment.into(),
        ],
    );
    Node::new(NodeKind::WhenBlock, vec![service.into(), block])
}

/// Build a `when_block` from an optional command and output.
fn create_when_block(
    service_name: Token,
    block: Child,
    command: Option<Token>,
    output: Option<Node>,
) -> Node {
    let mut fragment = Node::new(NodeKind::ServiceFragment, Vec::new());
    if let Some(command) = command {
        fragment
            .children
            .push(Node::leaf(NodeKind::Command, command).into());
    }
    if let Some(output) = output {
        fragment.children.push(output.into());
    }
    when_block_tree(service_name, fragment, block)
}

pub(crate) fn when_block(mut node: Node) -> CanonResult<Node> {
    let Some(block) = node.children.pop() else {
        return Err(InternalError::malformed(&node, "empty when block").into());
    };

    // when <name> [output]
    if let Some(Child::Token(name)) = node.children.first() {
        if !name.is(&TokenKind::Name) {
            return Err(InternalError::malformed(&node, "expected service name").into());
        }
        let output = node
            .child_node(1)
            .filter(|child| child.is(&NodeKind::Output))
            .cloned();
        tracing::trace!(service = %name.text, "when block with inferred command");
        return Ok(create_when_block(name.clone(), block, None, output));
    }

    let mut children = std::mem::take(&mut node.children).into_iter();
    let when = match (children.next(), children.next()) {
        (Some(Child::Node(when)), None) if when.is(&NodeKind::WhenService) => when,
        _ => return Err(InternalError::malformed(&node, "expected when_service").into()),
    };
    let Some(name_token) = when
        .child_token(0)
        .filter(|token| token.is(&TokenKind::Name))
        .cloned()
    else {
        return Err(InternalError::malformed(&when, "expected service name").into());
    };
    let Some(path_token) = when
        .find(&NodeKind::Path)
        .and_then(|path| path.child_token(0))
        .filter(|token| token.is(&TokenKind::Name))
        .cloned()
    else {
        return Err(InternalError::malformed(&when, "expected path name").into());
    };

    // when <service> <command> [output]
    let Some(fragment_index) = when.position_of(&NodeKind::WhenServiceFragment) else {
        tracing::trace!(service = %name_token.text, "when block with path command");
        let output = when.find(&NodeKind::Output).cloned();
        return Ok(create_when_block(
            name_token,
            block,
            Some(path_token),
            output,
        ));
    };

    let mut when = when;
    let Some(fragment) = when.child_node_mut(fragment_index) else {
        return Err(InternalError::malformed(&node, "expected when fragment").into());
    };
    fragment.kind = NodeKind::ServiceFragment;

    // when <service> <path> <arguments>
    if fragment.find(&NodeKind::Command).is_none() {
        tracing::trace!(service = %name_token.text, "when block without command");
        let mut fragment = fragment.clone();
        promote_first_argument(&mut fragment, path_token);
        return Ok(when_block_tree(name_token, fragment, block));
    }

    // concise when
    tracing::trace!(service = %name_token.text, "concise when block");
    when.children.remove(0);
    when.kind = NodeKind::Service;
    Ok(Node::new(
        NodeKind::ConciseWhenBlock,
        vec![
            name_token.into(),
            path_token.into(),
            Node::new(NodeKind::WhenBlock, vec![when.into(), block]).into(),
        ],
    ))
}

/// The grammar reads `when srv method: "x"` as service `srv`, path `method`
/// and an unnamed argument `: "x"`. Re-attach the path as the argument's
/// name, or install it as the command when the argument already has one.
fn promote_first_argument(fragment: &mut Node, path_token: Token) {
    let first = fragment.find_mut(&NodeKind::Arguments);
    if let Some(arguments) = first {
        argument_shorthand(arguments);
        if arguments
            .first_child()
            .is_some_and(|child| child.is_node(&NodeKind::Expression))
        {
            if let Some(value) = arguments.children.pop() {
                arguments.children = vec![path_token.into(), value];
            }
            return;
        }
    }
    fragment
        .children
        .insert(0, Node::leaf(NodeKind::Command, path_token).into());
}

#[cfg(test)]
mod tests;
