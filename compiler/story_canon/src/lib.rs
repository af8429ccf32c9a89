//! Parse tree normalization for the story compiler.
//!
//! This crate rewrites the raw tree produced by the external grammar into
//! the canonical tree vocabulary consumed by `story_lower` and the statement
//! compiler. Identifier legality is validated along the way.
//!
//! # Pipeline Position
//!
//! ```text
//! raw tree → **Normalize** → story_lower → story_lines
//! ```
//!
//! # What Happens During Normalization
//!
//! Children are rewritten before their parent (bottom-up), so every rule
//! sees already-canonical children.
//!
//! 1. **Identifiers** (`keywords`): reserved, future-reserved and `__` names
//! 2. **Assignments** (`assignment`): `x += y` → `x = x + y`, target checks
//! 3. **Services** (`service`): inline services, hoisted block arguments,
//!    zero-argument expressions, hoisted function arguments
//! 4. **When blocks** (`when`): four shapes, resolved in a fixed order
//! 5. **Strings** (`strings`): quote stripping, multi-line joining
//! 6. **Expressions** (`expr`): precedence tagging, dot chains, shorthand
//!    arguments
//! 7. **Brackets** (`brackets`): delimiter tokens dropped, span kept
//!
//! Every other rule passes through unchanged.

mod assignment;
mod brackets;
mod expr;
mod keywords;
mod service;
mod strings;
mod when;

#[cfg(test)]
mod testing;

use story_diagnostic::CompileError;
use story_ir::{Child, ExpressionKind, Node, NodeKind};

pub use keywords::{check_identifier, FUTURE_RESERVED_KEYWORDS, RESERVED_KEYWORDS};
pub use strings::multi_line_string;

/// Result of a normalization rule.
pub type CanonResult<T> = Result<T, CompileError>;

/// Options that change which surface syntax is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CanonOptions {
    /// Accept `'single quoted'` strings.
    pub allow_single_quotes: bool,
}

/// Rewrites raw parse trees into canonical trees.
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    options: CanonOptions,
}

impl Normalizer {
    pub fn new(options: CanonOptions) -> Self {
        Normalizer { options }
    }

    /// Normalize a whole tree.
    ///
    /// A root that collapses to a single token is re-wrapped in a node of the
    /// root's original kind.
    #[tracing::instrument(level = "debug", skip_all, fields(root = %tree.kind))]
    pub fn normalize(&self, tree: Node) -> CanonResult<Node> {
        let root_kind = tree.kind.clone();
        let normalized = match self.transform(tree)? {
            Child::Node(node) => node,
            Child::Token(token) => Node::new(root_kind, vec![Child::Token(token)]),
        };
        tracing::debug!("normalization complete");
        Ok(normalized)
    }

    fn transform(&self, mut node: Node) -> CanonResult<Child> {
        let children = std::mem::take(&mut node.children);
        node.children = children
            .into_iter()
            .map(|child| match child {
                Child::Node(inner) => self.transform(inner),
                token @ Child::Token(_) => Ok(token),
            })
            .collect::<CanonResult<_>>()?;
        self.rewrite(node)
    }

    fn rewrite(&self, node: Node) -> CanonResult<Child> {
        let level = ExpressionKind::from_rule(&node.kind);
        let node = match node.kind {
            NodeKind::Path => keywords::path(node)?,
            NodeKind::Command => keywords::command(node)?,
            NodeKind::Output => keywords::output(node)?,
            NodeKind::FunctionStatement | NodeKind::TypedArgument => keywords::declaration(node)?,
            NodeKind::Assignment => assignment::assignment(node)?,
            NodeKind::AssignmentDestructoring
            | NodeKind::List
            | NodeKind::Map
            | NodeKind::ListType
            | NodeKind::MapType => brackets::strip(node),
            NodeKind::PathFragment | NodeKind::ValueFragment => brackets::path_fragment(node),
            NodeKind::InlineService => service::inline_service(node)?,
            NodeKind::ServiceBlock => service::service_block(node)?,
            NodeKind::AbsoluteExpression => service::absolute_expression(node),
            NodeKind::FunctionBlock => service::function_block(node)?,
            NodeKind::WhenBlock => when::when_block(node)?,
            NodeKind::String => strings::string(node, &self.options)?,
            NodeKind::Arguments => expr::arguments(node),
            NodeKind::DotArguments => expr::dot_arguments(node),
            NodeKind::DotExpression => return expr::dot_expression(node),
            NodeKind::PrimaryExpression => return Ok(expr::primary_expression(node)),
            _ => match level {
                Some(level) => return Ok(expr::rewrite_expression(node, level)),
                None => node,
            },
        };
        Ok(Child::Node(node))
    }
}

/// Normalize `tree` with the given options.
pub fn normalize(tree: Node, options: &CanonOptions) -> CanonResult<Node> {
    Normalizer::new(options.clone()).normalize(tree)
}
