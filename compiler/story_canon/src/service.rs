//! Service and function statement shapes.

use story_diagnostic::InternalError;
use story_ir::{Child, Node, NodeKind, TokenKind};

use crate::CanonResult;

/// `inline_service[path, fragment]` → `service[path, service_fragment]`.
pub(crate) fn inline_service(mut node: Node) -> CanonResult<Node> {
    let Some(fragment) = node.child_node_mut(1) else {
        return Err(InternalError::malformed(&node, "inline service without fragment").into());
    };
    fragment.kind = NodeKind::ServiceFragment;
    node.kind = NodeKind::Service;
    Ok(node)
}

/// Arguments declared by each block of a nested block, if every block is
/// an argument statement.
fn block_arguments(nested: &Node) -> Option<Vec<Node>> {
    if !nested.is(&NodeKind::NestedBlock) || nested.children.is_empty() {
        return None;
    }
    nested
        .children
        .iter()
        .map(|child| {
            child
                .as_node()
                .and_then(|block| block.node_at(&[NodeKind::Rules, NodeKind::Arguments]))
                .cloned()
        })
        .collect()
}

/// Hoist indented argument lines into the call they belong to.
///
/// ```text
/// alpine echo
///     message: "hi"
/// ```
///
/// is the same call as `alpine echo message: "hi"`. A nested block that
/// holds anything else stays as the call's body.
pub(crate) fn service_block(mut node: Node) -> CanonResult<Node> {
    if node.children.len() == 1 {
        return Ok(node);
    }
    let Some(arguments) = node.child_node(1).and_then(block_arguments) else {
        return Ok(node);
    };

    let Some(fragment) = node
        .child_node_mut(0)
        .and_then(|service| service.find_mut(&NodeKind::ServiceFragment))
    else {
        return Err(InternalError::malformed(&node, "service without fragment").into());
    };
    tracing::trace!(count = arguments.len(), "hoisting indented arguments");
    fragment
        .children
        .extend(arguments.into_iter().map(Child::Node));
    node.children.truncate(1);
    Ok(node)
}

/// `absolute_expression[expression[entity[path]]]` is a call without
/// arguments: `service_block[service[path, service_fragment[]]]`.
pub(crate) fn absolute_expression(node: Node) -> Node {
    if node.children.len() != 1 {
        return node;
    }
    let path = node
        .child_node(0)
        .and_then(|child| {
            child.follow_node_chain(&[NodeKind::Expression, NodeKind::Entity, NodeKind::Path])
        })
        .filter(|path| {
            path.first_child()
                .is_some_and(|root| root.is_token(&TokenKind::Name))
        });
    match path {
        Some(path) => {
            let service = Node::new(
                NodeKind::Service,
                vec![
                    path.clone().into(),
                    Node::new(NodeKind::ServiceFragment, Vec::new()).into(),
                ],
            );
            Node::wrap(NodeKind::ServiceBlock, service)
        }
        None => node,
    }
}

/// Move indented typed arguments into the function header.
///
/// ```text
/// function_block                      function_block
///   function_statement                  function_statement
///   indented_typed_arguments     →        ... typed_argument*
///     typed_argument*                   nested_block[<body>]
///   <body>
/// ```
pub(crate) fn function_block(mut node: Node) -> CanonResult<Node> {
    let hoists = node
        .child(1)
        .is_some_and(|child| child.is_node(&NodeKind::IndentedTypedArguments));
    if !hoists {
        return Ok(node);
    }

    let indented = node.children.remove(1);
    let arguments: Vec<Child> = indented
        .as_node()
        .map(|indented| indented.find_all(&NodeKind::TypedArgument))
        .unwrap_or_default()
        .into_iter()
        .cloned()
        .map(Child::Node)
        .collect();
    let Some(header) = node.child_node_mut(0) else {
        return Err(InternalError::malformed(&node, "function without header").into());
    };
    tracing::trace!(count = arguments.len(), "hoisting typed arguments");
    header.children.extend(arguments);

    if node.children.len() > 1 {
        if let Some(body) = node.children.pop() {
            node.children.push(Node::new(NodeKind::NestedBlock, vec![body]).into());
        }
    }
    Ok(node)
}

#[cfg(test)]
mod tests;
