//! The mutable parse tree.
//!
//! A `Node` is a grammar rule tag plus ordered children, each either another
//! node or a terminal `Token`. The same type carries the raw tree handed over
//! by the external grammar and the canonical tree produced by normalization;
//! only the set of kinds that appear differs.

use serde::{Deserialize, Serialize};

use crate::token::{Position, Token, TokenKind};

define_kinds! {
    /// Grammar rule names.
    ///
    /// Rules the normalizer or lowerer never inspect arrive as `Other` and
    /// pass through untouched.
    pub enum NodeKind {
        Start => "start",
        Block => "block",
        NestedBlock => "nested_block",
        Rules => "rules",
        Assignment => "assignment",
        AssignmentFragment => "assignment_fragment",
        AssignmentDestructoring => "assignment_destructoring",
        OperatorAssignment => "operator_assignment",
        BaseExpression => "base_expression",
        Path => "path",
        PathFragment => "path_fragment",
        ValueFragment => "value_fragment",
        Command => "command",
        InlineService => "inline_service",
        Service => "service",
        ServiceFragment => "service_fragment",
        ServiceBlock => "service_block",
        Arguments => "arguments",
        Output => "output",
        WhenBlock => "when_block",
        WhenService => "when_service",
        WhenServiceFragment => "when_service_fragment",
        ConciseWhenBlock => "concise_when_block",
        AbsoluteExpression => "absolute_expression",
        Expression => "expression",
        OrExpression => "or_expression",
        AndExpression => "and_expression",
        CmpExpression => "cmp_expression",
        ArithExpression => "arith_expression",
        MulExpression => "mul_expression",
        UnaryExpression => "unary_expression",
        AsExpression => "as_expression",
        PowExpression => "pow_expression",
        PrimaryExpression => "primary_expression",
        ArithOperator => "arith_operator",
        MulOperator => "mul_operator",
        CmpOperator => "cmp_operator",
        UnaryOperator => "unary_operator",
        PowOperator => "pow_operator",
        AsOperator => "as_operator",
        AndOperator => "and_operator",
        OrOperator => "or_operator",
        PathValue => "path_value",
        Comparison => "comparison",
        DotExpression => "dot_expression",
        DotArguments => "dot_arguments",
        Mutation => "mutation",
        MutationFragment => "mutation_fragment",
        InlineExpression => "inline_expression",
        Entity => "entity",
        Values => "values",
        String => "string",
        Number => "number",
        Boolean => "boolean",
        List => "list",
        Map => "map",
        KeyValue => "key_value",
        Types => "types",
        ListType => "list_type",
        MapType => "map_type",
        FunctionBlock => "function_block",
        FunctionStatement => "function_statement",
        TypedArgument => "typed_argument",
        IndentedTypedArguments => "indented_typed_arguments",
        Returns => "returns",
        ReturnStatement => "return_statement",
    }
}

/// Operator precedence level of an `expression` node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum ExpressionKind {
    #[serde(rename = "expression")]
    Plain,
    #[serde(rename = "or_expression")]
    Or,
    #[serde(rename = "and_expression")]
    And,
    #[serde(rename = "cmp_expression")]
    Cmp,
    #[serde(rename = "arith_expression")]
    Arith,
    #[serde(rename = "mul_expression")]
    Mul,
    #[serde(rename = "unary_expression")]
    Unary,
    #[serde(rename = "as_expression")]
    As,
    #[serde(rename = "pow_expression")]
    Pow,
    #[serde(rename = "primary_expression")]
    Primary,
}

impl ExpressionKind {
    /// The precedence level a grammar rule stands for, if it is one.
    pub fn from_rule(kind: &NodeKind) -> Option<Self> {
        Some(match kind {
            NodeKind::Expression => ExpressionKind::Plain,
            NodeKind::OrExpression => ExpressionKind::Or,
            NodeKind::AndExpression => ExpressionKind::And,
            NodeKind::CmpExpression => ExpressionKind::Cmp,
            NodeKind::ArithExpression => ExpressionKind::Arith,
            NodeKind::MulExpression => ExpressionKind::Mul,
            NodeKind::UnaryExpression => ExpressionKind::Unary,
            NodeKind::AsExpression => ExpressionKind::As,
            NodeKind::PowExpression => ExpressionKind::Pow,
            NodeKind::PrimaryExpression => ExpressionKind::Primary,
            _ => return None,
        })
    }
}

/// One child of a node.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    Node(Node),
    Token(Token),
}

impl Child {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Child::Token(token) => Some(token),
            Child::Node(_) => None,
        }
    }

    /// Whether this child is a node of the given kind.
    pub fn is_node(&self, kind: &NodeKind) -> bool {
        self.as_node().is_some_and(|node| node.kind == *kind)
    }

    /// Whether this child is a token of the given kind.
    pub fn is_token(&self, kind: &TokenKind) -> bool {
        self.as_token().is_some_and(|token| token.kind == *kind)
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Child::Node(node) => node.position(),
            Child::Token(token) => Some(token.position()),
        }
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<Token> for Child {
    fn from(token: Token) -> Self {
        Child::Token(token)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A tagged tree node.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Child>,
    /// Span of a node synthesized without an original token (bracketed
    /// constructs whose delimiters were dropped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_kind: Option<ExpressionKind>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub needs_parentheses: bool,
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Child>) -> Self {
        Node {
            kind,
            children,
            position: None,
            expression_kind: None,
            needs_parentheses: false,
        }
    }

    /// Node with a single child node.
    pub fn wrap(kind: NodeKind, child: Node) -> Self {
        Node::new(kind, vec![Child::Node(child)])
    }

    /// Node with a single child token.
    pub fn leaf(kind: NodeKind, token: Token) -> Self {
        Node::new(kind, vec![Child::Token(token)])
    }

    /// An `expression` node tagged with a precedence level.
    pub fn expression(kind: ExpressionKind, children: Vec<Child>) -> Self {
        let mut node = Node::new(NodeKind::Expression, children);
        node.expression_kind = Some(kind);
        node
    }

    #[inline]
    pub fn is(&self, kind: &NodeKind) -> bool {
        self.kind == *kind
    }

    pub fn child(&self, index: usize) -> Option<&Child> {
        self.children.get(index)
    }

    pub fn child_node(&self, index: usize) -> Option<&Node> {
        self.children.get(index).and_then(Child::as_node)
    }

    pub fn child_node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index).and_then(Child::as_node_mut)
    }

    pub fn child_token(&self, index: usize) -> Option<&Token> {
        self.children.get(index).and_then(Child::as_token)
    }

    pub fn first_child(&self) -> Option<&Child> {
        self.children.first()
    }

    /// First direct child node of the given kind.
    pub fn find(&self, kind: &NodeKind) -> Option<&Node> {
        self.children
            .iter()
            .filter_map(Child::as_node)
            .find(|node| node.kind == *kind)
    }

    pub fn find_mut(&mut self, kind: &NodeKind) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .filter_map(Child::as_node_mut)
            .find(|node| node.kind == *kind)
    }

    /// Index of the first direct child node of the given kind.
    pub fn position_of(&self, kind: &NodeKind) -> Option<usize> {
        self.children.iter().position(|child| child.is_node(kind))
    }

    /// Walk direct children by kind: `node_at(&[A, B])` is the first `B`
    /// child of the first `A` child.
    pub fn node_at(&self, kinds: &[NodeKind]) -> Option<&Node> {
        kinds
            .iter()
            .try_fold(self, |node, kind| node.find(kind))
    }

    /// Follow first children while their kinds match `chain`.
    ///
    /// The first entry is matched against `self`. Returns the node matching
    /// the last entry.
    pub fn follow_node_chain(&self, chain: &[NodeKind]) -> Option<&Node> {
        let (first, rest) = chain.split_first()?;
        if self.kind != *first {
            return None;
        }
        rest.iter().try_fold(self, |node, kind| {
            node.child_node(0).filter(|child| child.kind == *kind)
        })
    }

    /// All nodes of the given kind in pre-order, `self` included.
    ///
    /// Found nodes are not searched further.
    pub fn find_all(&self, kind: &NodeKind) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect(kind, &mut found);
        found
    }

    fn collect<'a>(&'a self, kind: &NodeKind, found: &mut Vec<&'a Node>) {
        if self.kind == *kind {
            found.push(self);
            return;
        }
        for child in self.children.iter().filter_map(Child::as_node) {
            child.collect(kind, found);
        }
    }

    /// First token of the subtree, in source order.
    pub fn first_token(&self) -> Option<&Token> {
        self.children.iter().find_map(|child| match child {
            Child::Token(token) => Some(token),
            Child::Node(node) => node.first_token(),
        })
    }

    /// Last token of the subtree, in source order.
    pub fn last_token(&self) -> Option<&Token> {
        self.children.iter().rev().find_map(|child| match child {
            Child::Token(token) => Some(token),
            Child::Node(node) => node.last_token(),
        })
    }

    /// The node's own span, or the span of its tokens.
    pub fn position(&self) -> Option<Position> {
        if let Some(position) = self.position {
            return Some(position);
        }
        let first = self.first_token()?.position();
        let last = self.last_token().map_or(first, Token::position);
        if last.line == first.line {
            Some(first.to(last))
        } else {
            Some(first)
        }
    }

    /// Source line the node starts on.
    pub fn line(&self) -> Option<u32> {
        self.position().map(|position| position.line)
    }

    /// Space-separated text of every token in the subtree.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        self.push_text(&mut parts);
        parts.join(" ")
    }

    fn push_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                Child::Token(token) => parts.push(&token.text),
                Child::Node(node) => node.push_text(parts),
            }
        }
    }
}
