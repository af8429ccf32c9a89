#![allow(clippy::unwrap_used)]

use super::*;
use crate::testing::{name, nested, node, path, path_expression, string_expression};
use pretty_assertions::assert_eq;

fn service(service_name: &str, command: &str) -> Node {
    node(
        NodeKind::Service,
        vec![
            path(service_name, 1).into(),
            Node::wrap(
                NodeKind::ServiceFragment,
                Node::leaf(NodeKind::Command, name(command, 8)),
            )
            .into(),
        ],
    )
}

fn argument(arg_name: &str, value: &str) -> Node {
    node(
        NodeKind::Arguments,
        vec![name(arg_name, 5).into(), string_expression(value, 14).into()],
    )
}

/// `block[rules[<statement>]]`
fn block(statement: Node) -> Node {
    Node::wrap(NodeKind::Block, Node::wrap(NodeKind::Rules, statement))
}

// === Inline services ===

#[test]
fn inline_service_is_retagged() {
    let inline = node(
        NodeKind::InlineService,
        vec![
            path("alpine", 1).into(),
            Node::new(NodeKind::Other("inline_fragment".into()), Vec::new()).into(),
        ],
    );
    let result = inline_service(inline).unwrap();
    assert_eq!(result.kind, NodeKind::Service);
    assert_eq!(result.child_node(1).unwrap().kind, NodeKind::ServiceFragment);
}

#[test]
fn inline_service_without_fragment_is_internal() {
    let inline = Node::wrap(NodeKind::InlineService, path("alpine", 1));
    assert!(inline_service(inline).unwrap_err().is_internal());
}

// === Service blocks ===

#[test]
fn indented_arguments_are_hoisted() {
    let tree = node(
        NodeKind::ServiceBlock,
        vec![
            service("alpine", "echo").into(),
            nested(vec![
                block(argument("message", "hello")),
                block(argument("color", "red")),
            ])
            .into(),
        ],
    );
    let result = service_block(tree).unwrap();
    assert_eq!(result.children.len(), 1);
    let fragment = result
        .node_at(&[NodeKind::Service, NodeKind::ServiceFragment])
        .unwrap();
    let kinds: Vec<_> = fragment
        .children
        .iter()
        .filter_map(Child::as_node)
        .map(|child| child.kind.clone())
        .collect();
    assert_eq!(
        kinds,
        vec![NodeKind::Command, NodeKind::Arguments, NodeKind::Arguments]
    );
}

#[test]
fn body_with_statements_is_kept() {
    let tree = node(
        NodeKind::ServiceBlock,
        vec![
            service("http", "server").into(),
            nested(vec![
                block(argument("port", "80")),
                block(node(NodeKind::ServiceBlock, vec![service("log", "info").into()])),
            ])
            .into(),
        ],
    );
    assert_eq!(service_block(tree.clone()).unwrap(), tree);
}

#[test]
fn single_statement_block_is_untouched() {
    let tree = Node::wrap(NodeKind::ServiceBlock, service("alpine", "echo"));
    assert_eq!(service_block(tree.clone()).unwrap(), tree);
}

// === Absolute expressions ===

#[test]
fn bare_path_becomes_zero_argument_call() {
    let tree = Node::wrap(NodeKind::AbsoluteExpression, path_expression("ls", 1));
    let result = absolute_expression(tree);
    assert_eq!(result.kind, NodeKind::ServiceBlock);
    let call = result.child_node(0).unwrap();
    assert_eq!(call.kind, NodeKind::Service);
    assert_eq!(call.child_node(0).unwrap(), &path("ls", 1));
    assert!(call.child_node(1).unwrap().children.is_empty());
}

#[test]
fn other_expressions_stay_absolute() {
    let tree = Node::wrap(NodeKind::AbsoluteExpression, string_expression("x", 1));
    assert_eq!(absolute_expression(tree.clone()), tree);
}

// === Function blocks ===

fn typed_argument(arg_name: &str) -> Node {
    node(
        NodeKind::TypedArgument,
        vec![
            name(arg_name, 5).into(),
            Node::leaf(NodeKind::Types, name("int", 10)).into(),
        ],
    )
}

#[test]
fn indented_typed_arguments_move_into_header() {
    let header = node(NodeKind::FunctionStatement, vec![name("sum", 10).into()]);
    let indented = node(
        NodeKind::IndentedTypedArguments,
        vec![typed_argument("a").into(), typed_argument("b").into()],
    );
    let body = block(node(NodeKind::ReturnStatement, Vec::new()));
    let tree = node(
        NodeKind::FunctionBlock,
        vec![header.into(), indented.into(), body.clone().into()],
    );

    let result = function_block(tree).unwrap();
    assert_eq!(result.children.len(), 2);
    let header = result.child_node(0).unwrap();
    assert_eq!(
        header
            .children
            .iter()
            .filter(|child| child.is_node(&NodeKind::TypedArgument))
            .count(),
        2
    );
    assert_eq!(result.child_node(1).unwrap(), &Node::wrap(NodeKind::NestedBlock, body));
}

#[test]
fn function_without_indented_arguments_is_untouched() {
    let tree = node(
        NodeKind::FunctionBlock,
        vec![
            node(NodeKind::FunctionStatement, vec![name("f", 10).into()]).into(),
            nested(vec![block(node(NodeKind::ReturnStatement, Vec::new()))]).into(),
        ],
    );
    assert_eq!(function_block(tree.clone()).unwrap(), tree);
}
