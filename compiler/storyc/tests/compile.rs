//! Raw parse trees compiled end to end.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use serde_json::{json, Value as Json};
use story_diagnostic::ErrorType;
use story_ir::{Child, Node, NodeKind, Position, Token, TokenKind};
use story_types::{Signature, Type};
use storyc::{compile, CompiledStory, CompilerConfig, Story};

fn token(kind: TokenKind, text: &str, line: u32, column: u32) -> Token {
    let end = column + u32::try_from(text.len()).unwrap();
    Token::new(kind, text, Position::new(line, column, end))
}

fn n(kind: NodeKind, children: Vec<Child>) -> Node {
    Node::new(kind, children)
}

/// `start[block[rules[<statement>]]...]`
fn story(statements: Vec<Node>) -> Node {
    n(
        NodeKind::Start,
        statements
            .into_iter()
            .map(|statement| {
                Node::wrap(NodeKind::Block, Node::wrap(NodeKind::Rules, statement)).into()
            })
            .collect(),
    )
}

/// Raw `expression[arith_expression[mul_expression[primary_expression[<entity>]]]]`.
fn raw(entity: Node) -> Node {
    Node::wrap(
        NodeKind::Expression,
        Node::wrap(
            NodeKind::ArithExpression,
            Node::wrap(
                NodeKind::MulExpression,
                Node::wrap(
                    NodeKind::PrimaryExpression,
                    Node::wrap(NodeKind::Entity, entity),
                ),
            ),
        ),
    )
}

fn raw_int(value: i64, line: u32, column: u32) -> Node {
    raw(Node::wrap(
        NodeKind::Values,
        Node::leaf(
            NodeKind::Number,
            token(TokenKind::Int, &value.to_string(), line, column),
        ),
    ))
}

fn raw_string(kind: TokenKind, quoted: &str, line: u32, column: u32) -> Node {
    raw(Node::wrap(
        NodeKind::Values,
        Node::leaf(NodeKind::String, token(kind, quoted, line, column)),
    ))
}

fn assignment(target: &str, operator: Token, value: Node, line: u32) -> Node {
    let operator: Child = if operator.is(&TokenKind::Equals) {
        operator.into()
    } else {
        Node::leaf(NodeKind::OperatorAssignment, operator).into()
    };
    n(
        NodeKind::Assignment,
        vec![
            Node::leaf(NodeKind::Path, token(TokenKind::Name, target, line, 1)).into(),
            n(
                NodeKind::AssignmentFragment,
                vec![operator, Node::wrap(NodeKind::BaseExpression, value).into()],
            )
            .into(),
        ],
    )
}

/// `alpine echo` with an optional indented argument block.
fn alpine_echo(arguments: Vec<Node>) -> Node {
    let service = n(
        NodeKind::Service,
        vec![
            Node::leaf(NodeKind::Path, token(TokenKind::Name, "alpine", 1, 1)).into(),
            Node::wrap(
                NodeKind::ServiceFragment,
                Node::leaf(NodeKind::Command, token(TokenKind::Name, "echo", 1, 8)),
            )
            .into(),
        ],
    );
    if arguments.is_empty() {
        return Node::wrap(NodeKind::ServiceBlock, service);
    }
    let nested = n(
        NodeKind::NestedBlock,
        arguments
            .into_iter()
            .map(|arguments| {
                Node::wrap(NodeKind::Block, Node::wrap(NodeKind::Rules, arguments)).into()
            })
            .collect(),
    );
    n(NodeKind::ServiceBlock, vec![service.into(), nested.into()])
}

fn run(tree: Node, source: &str, config: &CompilerConfig) -> CompiledStory {
    compile(tree, &Story::new(source), config).unwrap()
}

fn line(compiled: &CompiledStory, ln: u32) -> Json {
    serde_json::to_value(compiled.tree.get(ln).unwrap()).unwrap()
}

#[test]
fn compound_assignment_compiles_to_expression() {
    let tree = story(vec![
        assignment("a", token(TokenKind::Equals, "=", 1, 3), raw_int(1, 1, 5), 1),
        assignment("a", token(TokenKind::AddEquals, "+=", 2, 3), raw_int(2, 2, 6), 2),
    ]);
    let compiled = run(tree, "a = 1\na += 2\n", &CompilerConfig::default());

    assert_eq!(compiled.entrypoint.as_deref(), Some("1"));
    assert_eq!(line(&compiled, 1)["args"], json!([1]));
    assert_eq!(line(&compiled, 1)["next"], json!(2));
    let add = line(&compiled, 2);
    assert_eq!(add["method"], json!("set"));
    assert_eq!(add["name"], json!(["a"]));
    assert_eq!(add["src"], json!("a += 2"));
    assert_eq!(
        add["args"],
        json!([{
            "$OBJECT": "expression",
            "expression": "{} + {}",
            "values": [{"$OBJECT": "path", "paths": ["a"]}, 2],
        }])
    );
}

#[test]
fn indented_arguments_join_the_call() {
    let argument = n(
        NodeKind::Arguments,
        vec![
            token(TokenKind::Name, "message", 2, 5).into(),
            raw_string(TokenKind::DoubleQuoted, "\"hi {name}\"", 2, 14).into(),
        ],
    );
    let tree = story(vec![alpine_echo(vec![argument])]);
    let compiled = run(tree, "alpine echo\n    message: \"hi {name}\"\n", &CompilerConfig::default());

    assert_eq!(compiled.services, vec!["alpine"]);
    assert_eq!(compiled.tree.len(), 1);
    let execute = line(&compiled, 1);
    assert_eq!(execute["method"], json!("execute"));
    assert_eq!(execute["enter"], json!(null));
    assert_eq!(
        execute["args"],
        json!([{
            "$OBJECT": "argument",
            "name": "message",
            "argument": {
                "$OBJECT": "string",
                "string": "hi {}",
                "values": [{"$OBJECT": "path", "paths": ["name"]}],
            },
        }])
    );
}

#[test]
fn single_quotes_follow_config() {
    let tree = || {
        story(vec![assignment(
            "a",
            token(TokenKind::Equals, "=", 1, 3),
            raw_string(TokenKind::SingleQuoted, "'x'", 1, 5),
            1,
        )])
    };

    let error = compile(tree(), &Story::new("a = 'x'"), &CompilerConfig::default()).unwrap_err();
    assert_eq!(error.story_errors()[0].error_type, ErrorType::SingleQuotes);

    let config = CompilerConfig::new().allow_single_quotes(true);
    let compiled = run(tree(), "a = 'x'", &config);
    assert_eq!(line(&compiled, 1)["args"], json!([{"$OBJECT": "string", "string": "x"}]));
}

#[test]
fn reserved_name_reports_token_position() {
    let tree = story(vec![assignment(
        "return",
        token(TokenKind::Equals, "=", 1, 8),
        raw_int(1, 1, 10),
        1,
    )]);
    let error = compile(tree, &Story::new("return = 1"), &CompilerConfig::default()).unwrap_err();

    let errors = error.story_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error_type, ErrorType::ReservedKeyword);
    let message = errors[0].to_string();
    assert!(message.starts_with("Failed reading story because of unexpected \"return\""));
    assert!(message.contains("at line 1, column 1"), "{message}");
}

#[test]
fn mutation_arguments_are_checked_against_config() {
    // a = "abc".length(by: 1)
    let receiver = Node::wrap(
        NodeKind::Values,
        Node::leaf(NodeKind::String, token(TokenKind::DoubleQuoted, "\"abc\"", 1, 5)),
    );
    let mutation = n(
        NodeKind::Mutation,
        vec![
            Node::wrap(NodeKind::Expression, Node::wrap(NodeKind::Entity, receiver)).into(),
            n(
                NodeKind::MutationFragment,
                vec![
                    token(TokenKind::Name, "length", 1, 11).into(),
                    n(
                        NodeKind::Arguments,
                        vec![
                            token(TokenKind::Name, "by", 1, 18).into(),
                            raw_int(1, 1, 22).into(),
                        ],
                    )
                    .into(),
                ],
            )
            .into(),
        ],
    );
    let value = Node::wrap(
        NodeKind::Expression,
        Node::wrap(
            NodeKind::Entity,
            Node::wrap(NodeKind::Path, Node::wrap(NodeKind::InlineExpression, mutation)),
        ),
    );
    let tree = story(vec![assignment(
        "a",
        token(TokenKind::Equals, "=", 1, 3),
        value,
        1,
    )]);
    let source = Story::new("a = \"abc\".length(by: 1)");

    let config = CompilerConfig::new().mutation(Signature::mutation(
        "length",
        BTreeMap::new(),
        Type::Int,
    ));
    let error = compile(tree.clone(), &source, &config).unwrap_err();
    let errors = error.story_errors();
    assert_eq!(errors[0].error_type, ErrorType::FunctionArgInvalid);
    assert_eq!(errors[0].arg("arg"), Some("by"));
    assert!(errors[0].to_string().contains("at line 1, column 11"));

    assert!(compile(tree, &source, &CompilerConfig::default()).is_ok());
}

#[test]
fn output_document_shape() {
    let tree = story(vec![alpine_echo(Vec::new())]);
    let compiled = run(tree, "alpine echo", &CompilerConfig::default());
    let document: Json = serde_json::from_str(&compiled.to_json(false).unwrap()).unwrap();

    assert_eq!(document["entrypoint"], json!("1"));
    assert_eq!(document["services"], json!(["alpine"]));
    assert_eq!(document["functions"], json!({}));
    assert_eq!(document["tree"]["1"]["service"], json!("alpine"));
    assert_eq!(document["tree"]["1"]["command"], json!("echo"));
    assert_eq!(document["tree"]["1"]["src"], json!("alpine echo"));
}
