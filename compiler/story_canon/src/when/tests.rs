#![allow(clippy::unwrap_used)]

use super::*;
use crate::testing::{name, nested, node, path, string_expression};
use pretty_assertions::assert_eq;

fn body() -> Node {
    nested(vec![Node::new(NodeKind::Block, Vec::new())])
}

fn output(names: &[&str]) -> Node {
    node(
        NodeKind::Output,
        names.iter().map(|text| name(text, 20).into()).collect(),
    )
}

/// The `service` of a normalized `when_block`.
fn when_service(result: &Node) -> &Node {
    assert_eq!(result.kind, NodeKind::WhenBlock);
    result.child_node(0).unwrap()
}

#[test]
fn name_with_output() {
    let tree = node(
        NodeKind::WhenBlock,
        vec![name("client", 6).into(), output(&["req"]).into(), body().into()],
    );
    let result = when_block(tree).unwrap();
    let service = when_service(&result);
    assert_eq!(service.child_node(0).unwrap(), &Node::leaf(NodeKind::Path, name("client", 6)));
    let fragment = service.child_node(1).unwrap();
    assert_eq!(fragment.kind, NodeKind::ServiceFragment);
    assert_eq!(fragment.children, vec![Child::Node(output(&["req"]))]);
    assert_eq!(result.child_node(1).unwrap(), &body());
}

#[test]
fn name_without_output() {
    let tree = node(NodeKind::WhenBlock, vec![name("client", 6).into(), body().into()]);
    let result = when_block(tree).unwrap();
    assert!(when_service(&result).child_node(1).unwrap().children.is_empty());
}

#[test]
fn path_is_reinterpreted_as_command() {
    let when = node(
        NodeKind::WhenService,
        vec![
            name("http", 6).into(),
            path("listen", 11).into(),
            output(&["request"]).into(),
        ],
    );
    let tree = node(NodeKind::WhenBlock, vec![when.into(), body().into()]);
    let result = when_block(tree).unwrap();
    let fragment = when_service(&result).child_node(1).unwrap();
    assert_eq!(
        fragment.children,
        vec![
            Node::leaf(NodeKind::Command, name("listen", 11)).into(),
            output(&["request"]).into(),
        ]
    );
}

#[test]
fn unnamed_first_argument_takes_the_path_name() {
    // when http method: "/get"
    let arguments = Node::wrap(NodeKind::Arguments, string_expression("/get", 19));
    let when = node(
        NodeKind::WhenService,
        vec![
            name("http", 6).into(),
            path("method", 11).into(),
            Node::wrap(NodeKind::WhenServiceFragment, arguments).into(),
        ],
    );
    let tree = node(NodeKind::WhenBlock, vec![when.into(), body().into()]);
    let result = when_block(tree).unwrap();
    let fragment = when_service(&result).child_node(1).unwrap();
    assert_eq!(fragment.kind, NodeKind::ServiceFragment);
    assert!(fragment.find(&NodeKind::Command).is_none());
    let arguments = fragment.find(&NodeKind::Arguments).unwrap();
    assert_eq!(arguments.child_token(0).unwrap().text, "method");
    assert_eq!(arguments.children.len(), 2);
}

#[test]
fn named_first_argument_installs_the_path_as_command() {
    // when http listen path: "/"
    let arguments = node(
        NodeKind::Arguments,
        vec![name("path", 18).into(), string_expression("/", 24).into()],
    );
    let when = node(
        NodeKind::WhenService,
        vec![
            name("http", 6).into(),
            path("listen", 11).into(),
            Node::wrap(NodeKind::WhenServiceFragment, arguments.clone()).into(),
        ],
    );
    let tree = node(NodeKind::WhenBlock, vec![when.into(), body().into()]);
    let result = when_block(tree).unwrap();
    let fragment = when_service(&result).child_node(1).unwrap();
    assert_eq!(
        fragment.children,
        vec![
            Node::leaf(NodeKind::Command, name("listen", 11)).into(),
            arguments.into(),
        ]
    );
}

#[test]
fn concise_when_is_wrapped() {
    // when http server listen path: "/"
    let fragment = node(
        NodeKind::WhenServiceFragment,
        vec![Node::leaf(NodeKind::Command, name("listen", 18)).into()],
    );
    let when = node(
        NodeKind::WhenService,
        vec![
            name("http", 6).into(),
            path("server", 11).into(),
            fragment.into(),
        ],
    );
    let tree = node(NodeKind::WhenBlock, vec![when.into(), body().into()]);
    let result = when_block(tree).unwrap();

    assert_eq!(result.kind, NodeKind::ConciseWhenBlock);
    assert_eq!(result.child_token(0).unwrap().text, "http");
    assert_eq!(result.child_token(1).unwrap().text, "server");
    let inner = result.child_node(2).unwrap();
    assert_eq!(inner.kind, NodeKind::WhenBlock);
    let service = inner.child_node(0).unwrap();
    assert_eq!(service.kind, NodeKind::Service);
    assert_eq!(service.child_node(0).unwrap(), &path("server", 11));
    assert_eq!(service.child_node(1).unwrap().kind, NodeKind::ServiceFragment);
}

#[test]
fn missing_service_name_is_internal() {
    let when = node(NodeKind::WhenService, vec![path("listen", 11).into()]);
    let tree = node(NodeKind::WhenBlock, vec![when.into(), body().into()]);
    assert!(when_block(tree).unwrap_err().is_internal());
}
