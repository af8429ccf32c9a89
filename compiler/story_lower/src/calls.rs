//! Arguments, mutations and service calls used as values.

use story_diagnostic::InternalError;
use story_ir::{Argument, Child, Node, NodeKind, Object, Value};

use crate::{literals, lower, lower_child, LowerResult};

/// `arguments[NAME, value]`
pub fn argument(node: &Node) -> LowerResult<Argument> {
    let Some(name) = node.child_token(0) else {
        return Err(InternalError::malformed(node, "argument without name"));
    };
    let Some(value) = node.child(1) else {
        return Err(InternalError::malformed(node, "argument without value"));
    };
    Ok(Argument::new(name.text.as_str(), lower_child(value)?))
}

/// Every `arguments` node in the subtree, in source order.
pub fn arguments(node: &Node) -> LowerResult<Vec<Argument>> {
    node.find_all(&NodeKind::Arguments)
        .into_iter()
        .map(argument)
        .collect()
}

/// Every `typed_argument[NAME, types]` in the subtree, as type-valued
/// arguments.
pub fn function_arguments(node: &Node) -> LowerResult<Vec<Argument>> {
    node.find_all(&NodeKind::TypedArgument)
        .into_iter()
        .map(|typed| {
            let Some(name) = typed.child_token(0) else {
                return Err(InternalError::malformed(typed, "typed argument without name"));
            };
            let Some(types) = typed.find(&NodeKind::Types) else {
                return Err(InternalError::malformed(typed, "typed argument without type"));
            };
            let value = Value::type_name(literals::type_name(types)?);
            Ok(Argument::new(name.text.as_str(), value))
        })
        .collect()
}

/// `mutation[receiver?, mutation_fragment[NAME, arguments*]]`
///
/// A bare `mutation_fragment` is a mutation without receiver.
pub fn mutation(node: &Node) -> LowerResult<Object> {
    let fragment = if node.is(&NodeKind::MutationFragment) {
        node
    } else {
        node.find(&NodeKind::MutationFragment)
            .ok_or_else(|| InternalError::malformed(node, "mutation without fragment"))?
    };
    let Some(name) = fragment.child_token(0) else {
        return Err(InternalError::malformed(fragment, "mutation without name"));
    };
    let value = match node.first_child() {
        Some(Child::Node(receiver)) if !receiver.is(&NodeKind::MutationFragment) => {
            Some(Box::new(lower(receiver)?))
        }
        _ => None,
    };
    Ok(Object::Mutation {
        value,
        mutation: name.text.clone(),
        arguments: arguments(fragment)?,
    })
}

/// `service[path, service_fragment]` used as a value, e.g. the right-hand
/// side of `x = alpine echo`.
///
/// Methods never declare output bindings.
pub fn method(node: &Node) -> LowerResult<Object> {
    let Some(service) = node.child_node(0).and_then(Node::first_token) else {
        return Err(InternalError::malformed(node, "service without name"));
    };
    let fragment = node.find(&NodeKind::ServiceFragment);
    let command = fragment
        .and_then(|fragment| fragment.find(&NodeKind::Command))
        .and_then(|command| command.child_token(0))
        .map(|token| token.text.clone());
    let args = match fragment {
        Some(fragment) => arguments(fragment)?,
        None => Vec::new(),
    };
    Ok(Object::Method {
        method: "execute".to_owned(),
        service: service.text.clone(),
        command,
        output: None,
        args,
    })
}
