//! Expression levels, dot chains and argument shorthand.

use story_diagnostic::InternalError;
use story_ir::{Child, ExpressionKind, Node, NodeKind, Token, TokenKind};

use crate::CanonResult;

/// Collapse a precedence level with a single operand, otherwise tag it.
pub(crate) fn rewrite_expression(mut node: Node, level: ExpressionKind) -> Child {
    if node.children.len() == 1 {
        if let Some(only) = node.children.pop() {
            return only;
        }
    }
    Node::expression(level, node.children).into()
}

/// Single entities keep a `primary_expression` wrapper so their position
/// survives; anything else was parenthesized in the source.
pub(crate) fn primary_expression(node: Node) -> Child {
    if let [Child::Node(entity)] = node.children.as_slice() {
        if entity.is(&NodeKind::Entity) {
            return Node::expression(ExpressionKind::Primary, node.children).into();
        }
    }
    match rewrite_expression(node, ExpressionKind::Primary) {
        Child::Node(mut inner) => {
            inner.needs_parentheses = true;
            Child::Node(inner)
        }
        token @ Child::Token(_) => token,
    }
}

/// `f(:name)`: a lone unnamed argument that is a bare path is named after
/// the path.
pub(crate) fn argument_shorthand(arguments: &mut Node) {
    if arguments.children.len() != 1 {
        return;
    }
    let name = arguments
        .child_node(0)
        .and_then(|value| {
            value.follow_node_chain(&[NodeKind::Expression, NodeKind::Entity, NodeKind::Path])
        })
        .and_then(|path| path.child_token(0))
        .filter(|token| token.is(&TokenKind::Name))
        .cloned();
    if let Some(name) = name {
        tracing::trace!(name = %name.text, "argument shorthand");
        arguments.children.insert(0, name.into());
    }
}

pub(crate) fn arguments(mut node: Node) -> Node {
    argument_shorthand(&mut node);
    node
}

/// `.name(args)` → `mutation[mutation_fragment[name, args...]]`
pub(crate) fn dot_arguments(node: Node) -> Node {
    Node::wrap(
        NodeKind::Mutation,
        Node::new(NodeKind::MutationFragment, node.children),
    )
}

/// `expression[entity[path[inline_expression[node]]]]`
fn build_inline(node: Node) -> Node {
    Node::wrap(
        NodeKind::Expression,
        Node::wrap(
            NodeKind::Entity,
            Node::wrap(
                NodeKind::Path,
                Node::wrap(NodeKind::InlineExpression, node),
            ),
        ),
    )
}

/// Fragment children of a `mutation` produced by `dot_arguments`.
fn mutation_children(child: Child) -> CanonResult<Vec<Child>> {
    match child {
        Child::Node(node) if node.is(&NodeKind::Mutation) => Ok(node.children),
        Child::Node(node) => Err(InternalError::malformed(&node, "expected mutation").into()),
        Child::Token(token) => Err(InternalError::Malformed {
            kind: token.kind.to_string(),
            reason: "expected mutation",
        }
        .into()),
    }
}

/// Split `1.increment(` into `INT 1` and `NAME increment`.
fn split_float_mut(token: &Token) -> CanonResult<(Token, Token)> {
    let Some((value, rest)) = token.text.split_once('.') else {
        return Err(InternalError::Malformed {
            kind: token.kind.to_string(),
            reason: "float mutation without a dot",
        }
        .into());
    };
    let name = rest.strip_suffix('(').unwrap_or(rest);
    let value_len = u32::try_from(value.len()).unwrap_or(u32::MAX);

    let mut int = Token::from_template(token, TokenKind::Int, value);
    int.end_column = token.column.saturating_add(value_len);
    let mut name = Token::from_template(token, TokenKind::Name, name);
    name.column = int.end_column.saturating_add(1);
    name.end_column = token.end_column.saturating_sub(1);
    Ok((int, name))
}

/// Fold a dot chain into right-nested mutations.
///
/// `"a".upper().split(by: " ")` becomes a `split` mutation whose receiver is
/// an inline expression around the `upper` mutation of `"a"`. The whole
/// chain is wrapped as an inline expression.
pub(crate) fn dot_expression(mut node: Node) -> CanonResult<Child> {
    if node.children.len() == 1
        && !node
            .first_child()
            .is_some_and(|child| child.is_token(&TokenKind::FloatMut))
    {
        return Ok(node.children.remove(0));
    }

    let mut children = std::mem::take(&mut node.children).into_iter();
    let tree = match children.next() {
        Some(Child::Token(token)) if token.is(&TokenKind::FloatMut) => {
            let (int, name) = split_float_mut(&token)?;
            tracing::trace!(number = %int.text, mutation = %name.text, "splitting float mutation");
            let receiver = Node::wrap(
                NodeKind::Expression,
                Node::wrap(
                    NodeKind::Entity,
                    Node::wrap(NodeKind::Values, Node::leaf(NodeKind::Number, int)),
                ),
            );
            let mut tree = Node::new(
                NodeKind::Mutation,
                vec![
                    receiver.into(),
                    Node::leaf(NodeKind::MutationFragment, name).into(),
                ],
            );
            for child in children {
                if child.is_node(&NodeKind::Arguments) {
                    if let Some(fragment) = tree.child_node_mut(1) {
                        fragment.children.push(child);
                    }
                } else {
                    let mut nested = vec![build_inline(tree).into()];
                    nested.extend(mutation_children(child)?);
                    tree = Node::new(NodeKind::Mutation, nested);
                }
            }
            tree
        }
        Some(receiver) => {
            let mut tree = Node::new(NodeKind::Mutation, vec![receiver]);
            if let Some(first) = children.next() {
                tree.children.extend(mutation_children(first)?);
            }
            for child in children {
                let mut nested = vec![build_inline(tree).into()];
                nested.extend(mutation_children(child)?);
                tree = Node::new(NodeKind::Mutation, nested);
            }
            tree
        }
        None => return Err(InternalError::malformed(&node, "empty dot expression").into()),
    };
    Ok(build_inline(tree).into())
}
