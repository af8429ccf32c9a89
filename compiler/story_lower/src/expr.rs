//! Expressions.
//!
//! Operators are rendered into a template string (`"{} + {}"`) whose `{}`
//! slots are filled, in order, by the lowered operand values. Chains of the
//! same precedence level fold left, so `a - b - c` is `(a - b) - c`.

use story_diagnostic::InternalError;
use story_ir::{Child, Node, NodeKind, Value};

use crate::{lower, lower_child, LowerResult};

/// Text of an operator node or token.
fn operator(child: &Child) -> LowerResult<&str> {
    match child {
        Child::Token(token) => Ok(&token.text),
        Child::Node(node) => node
            .first_token()
            .map(|token| token.text.as_str())
            .ok_or_else(|| InternalError::malformed(node, "operator without token")),
    }
}

pub fn expression(node: &Node) -> LowerResult<Value> {
    if node
        .first_child()
        .is_some_and(|child| child.is_node(&NodeKind::PathValue))
    {
        return comparison(node);
    }
    match node.children.as_slice() {
        [] => Err(InternalError::malformed(node, "empty expression")),
        [only] => lower_child(only),
        [op, operand] => {
            let template = format!("{} {{}}", operator(op)?);
            Ok(Value::expression(template, vec![lower_child(operand)?]))
        }
        [first, rest @ ..] => {
            let mut value = lower_child(first)?;
            for pair in rest.chunks(2) {
                let [op, rhs] = pair else {
                    return Err(InternalError::malformed(node, "dangling operator"));
                };
                let template = format!("{{}} {} {{}}", operator(op)?);
                value = Value::expression(template, vec![value, lower_child(rhs)?]);
            }
            Ok(value)
        }
    }
}

/// `path_value [comparison path_value]`
fn comparison(node: &Node) -> LowerResult<Value> {
    let Some(left) = node.child_node(0) else {
        return Err(InternalError::malformed(node, "missing left operand"));
    };
    let left = lower(left)?;
    let Some(op) = node.child(1) else {
        return Ok(left);
    };
    let Some(right) = node.child_node(2) else {
        return Err(InternalError::malformed(node, "missing right operand"));
    };
    let template = format!("{{}} {} {{}}", operator(op)?);
    Ok(Value::expression(template, vec![left, lower(right)?]))
}
