//! Assignment target validation and compound-assignment desugaring.
//!
//! `x += y` becomes `x = x + y`:
//!
//! ```text
//! assignment                      assignment
//!   path x                          path x
//!   assignment_fragment      →      assignment_fragment
//!     operator_assignment             EQUALS "="
//!       ADD_EQUALS "+="               base_expression
//!     base_expression                   expression (arith_expression)
//!       <rhs>                             expression[entity[path x]]
//!                                         arith_operator[PLUS "+"]
//!                                         <rhs>
//! ```

use story_diagnostic::{ErrorType, InternalError, StoryError};
use story_ir::{Child, ExpressionKind, Node, NodeKind, Token, TokenKind};

use crate::CanonResult;

/// Operator token, operator node and expression level for a compound
/// assignment token.
fn operator_for(kind: &TokenKind) -> Option<(TokenKind, NodeKind, ExpressionKind)> {
    Some(match kind {
        TokenKind::AddEquals => (TokenKind::Plus, NodeKind::ArithOperator, ExpressionKind::Arith),
        TokenKind::SubEquals => (TokenKind::Dash, NodeKind::ArithOperator, ExpressionKind::Arith),
        TokenKind::MulEquals => (
            TokenKind::Multiplier,
            NodeKind::MulOperator,
            ExpressionKind::Mul,
        ),
        TokenKind::DivEquals => (TokenKind::Bslash, NodeKind::MulOperator, ExpressionKind::Mul),
        TokenKind::ModEquals => (TokenKind::Modulus, NodeKind::MulOperator, ExpressionKind::Mul),
        _ => return None,
    })
}

pub(crate) fn assignment(mut node: Node) -> CanonResult<Node> {
    let (target, fragment) = match node.children.as_slice() {
        [Child::Node(target), Child::Node(fragment)] => (target, fragment),
        _ => return Err(InternalError::malformed(&node, "expected target and fragment").into()),
    };

    if target.children.is_empty() {
        return Err(StoryError::new(ErrorType::ObjectDestructoringNoVariables, fragment).into());
    }
    if target
        .first_child()
        .is_some_and(|child| child.is_node(&NodeKind::InlineExpression))
    {
        return Err(StoryError::new(ErrorType::AssignmentInlineExpression, target).into());
    }

    let is_compound = fragment
        .first_child()
        .is_some_and(|child| child.is_node(&NodeKind::OperatorAssignment));
    if !is_compound {
        return Ok(node);
    }
    if !target.is(&NodeKind::Path) {
        return Err(StoryError::new(ErrorType::OperatorAssignmentDestructoring, target).into());
    }

    let lvalue = Node::expression(
        ExpressionKind::Primary,
        vec![Node::wrap(NodeKind::Entity, target.clone()).into()],
    );
    if let Some(fragment) = node.child_node_mut(1) {
        desugar(fragment, lvalue)?;
    }
    Ok(node)
}

/// Rewrite `<op>= rhs` inside an assignment fragment to `= lvalue <op> rhs`.
fn desugar(fragment: &mut Node, lvalue: Node) -> CanonResult<()> {
    let Some(Child::Node(operator)) = fragment.children.first() else {
        return Err(InternalError::malformed(fragment, "missing operator assignment").into());
    };
    let Some(op_token) = operator.child_token(0) else {
        return Err(InternalError::malformed(operator, "missing operator token").into());
    };
    let Some((op_kind, op_node_kind, level)) = operator_for(&op_token.kind) else {
        return Err(InternalError::malformed(operator, "unknown compound operator").into());
    };

    let symbol: String = op_token.text.chars().take(1).collect();
    let op_node = Node::leaf(op_node_kind, Token::from_template(op_token, op_kind, symbol));
    let equals = Token::from_template(op_token, TokenKind::Equals, "=");
    tracing::trace!(operator = %op_token.text, "desugaring compound assignment");
    fragment.children[0] = Child::Token(equals);

    let Some(base) = fragment.find_mut(&NodeKind::BaseExpression) else {
        return Err(InternalError::malformed(fragment, "missing base expression").into());
    };
    if base.children.len() != 1 {
        return Err(InternalError::malformed(base, "expected a single expression").into());
    }
    let rhs = base.children.remove(0);
    base.children = vec![Child::Node(Node::expression(
        level,
        vec![lvalue.into(), op_node.into(), rhs],
    ))];
    Ok(())
}
