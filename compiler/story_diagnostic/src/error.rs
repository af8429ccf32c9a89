use std::fmt;

use story_ir::{Child, Node, Position, Token};
use thiserror::Error;

use crate::ErrorType;

/// Whether the offending item was a whole tree or a single token.
///
/// Token items render with their column, tree items only with their line.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ItemKind {
    Token,
    Tree,
}

/// The offending item of an error.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorItem {
    pub kind: ItemKind,
    pub text: String,
    pub position: Option<Position>,
}

impl ErrorItem {
    pub fn token(token: &Token) -> Self {
        ErrorItem {
            kind: ItemKind::Token,
            text: token.text.clone(),
            position: Some(token.position()),
        }
    }

    pub fn tree(node: &Node) -> Self {
        ErrorItem {
            kind: ItemKind::Tree,
            text: node.text(),
            position: node.position(),
        }
    }

    pub fn child(child: &Child) -> Self {
        match child {
            Child::Node(node) => ErrorItem::tree(node),
            Child::Token(token) => ErrorItem::token(token),
        }
    }

    pub fn line(&self) -> Option<u32> {
        self.position.map(|position| position.line)
    }
}

impl From<&Token> for ErrorItem {
    fn from(token: &Token) -> Self {
        ErrorItem::token(token)
    }
}

impl From<&Node> for ErrorItem {
    fn from(node: &Node) -> Self {
        ErrorItem::tree(node)
    }
}

/// A user-facing compile error.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StoryError {
    pub error_type: ErrorType,
    pub item: ErrorItem,
    pub format_args: Vec<(&'static str, String)>,
}

impl StoryError {
    pub fn new(error_type: ErrorType, item: impl Into<ErrorItem>) -> Self {
        StoryError {
            error_type,
            item: item.into(),
            format_args: Vec::new(),
        }
    }

    /// Attach a value used when rendering the reason.
    #[must_use]
    pub fn with_arg(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.format_args.push((key, value.into()));
        self
    }

    pub fn arg(&self, key: &str) -> Option<&str> {
        self.format_args
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn reason(&self) -> String {
        self.error_type
            .reason(|key| self.arg(key).map(str::to_owned))
    }

    /// Render the full user-facing message.
    pub fn message(&self) -> String {
        let text = escape(&self.item.text);
        let location = match (self.item.kind, self.item.position) {
            (ItemKind::Token, Some(position)) => {
                format!(" at line {}, column {}", position.line, position.column)
            }
            (ItemKind::Tree, Some(position)) => format!(" at line {}", position.line),
            (_, None) => String::new(),
        };
        format!(
            "Failed reading story because of unexpected \"{text}\"{location}. Reason: {}",
            self.reason()
        )
    }
}

/// Escape control characters. Everything else, non-ASCII text included,
/// is shown as written.
fn escape(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_control() {
                c.escape_default().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

impl fmt::Display for StoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for StoryError {}

/// A broken contract between compiler passes.
///
/// These indicate a bug in the normalizer, lowerer or statement compiler,
/// never a problem with the user's story.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum InternalError {
    #[error("line {0} is not unique")]
    DuplicateLine(u32),
    #[error("unexpected `{0}` node while lowering values")]
    UnknownValueNode(String),
    #[error("malformed `{kind}` node: {reason}")]
    Malformed { kind: String, reason: &'static str },
    #[error("`{0}` node has no position")]
    MissingPosition(String),
    #[error("integer literal `{0}` does not fit in 64 bits")]
    IntegerOutOfRange(String),
}

impl InternalError {
    pub fn malformed(node: &Node, reason: &'static str) -> Self {
        InternalError::Malformed {
            kind: node.kind.as_str().to_owned(),
            reason,
        }
    }
}

/// Any failure that aborts a compilation.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Story(#[from] StoryError),
    /// Every argument problem of a single call.
    #[error("{}", render_all(.0))]
    Call(Vec<StoryError>),
    #[error("internal compiler error: {0}")]
    Internal(#[from] InternalError),
}

impl CompileError {
    /// The user-facing errors carried by this failure.
    pub fn story_errors(&self) -> &[StoryError] {
        match self {
            CompileError::Story(error) => std::slice::from_ref(error),
            CompileError::Call(errors) => errors,
            CompileError::Internal(_) => &[],
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, CompileError::Internal(_))
    }
}

fn render_all(errors: &[StoryError]) -> String {
    errors
        .iter()
        .map(StoryError::message)
        .collect::<Vec<_>>()
        .join("\n")
}
