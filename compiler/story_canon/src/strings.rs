//! String literal normalization.

use story_diagnostic::{ErrorType, InternalError, StoryError};
use story_ir::{Child, Node, TokenKind};

use crate::{CanonOptions, CanonResult};

/// Join the lines of a multi-line string.
///
/// Lines are joined by a single space unless the previous line ends with a
/// backslash, in which case the backslash is dropped and the lines are
/// concatenated. Continuation lines lose their indentation; blank
/// continuation lines contribute nothing.
pub fn multi_line_string(text: &str) -> String {
    let mut buf = String::with_capacity(text.len());
    let mut continues = false;
    for (i, line) in text.split('\n').enumerate() {
        let stripped = line.trim_start();
        if i == 0 {
            buf.push_str(line);
        } else if continues {
            buf.pop();
            buf.push_str(stripped);
        } else if !stripped.is_empty() {
            buf.push(' ');
            buf.push_str(stripped);
        }
        continues = line.ends_with('\\');
    }
    buf
}

/// Strip `width` delimiter characters from both ends.
fn unquote(text: &str, width: usize) -> &str {
    text.get(width..text.len().saturating_sub(width))
        .unwrap_or_default()
}

/// Remove the quotes of a string literal and join its lines.
///
/// The token is retagged `STRING` so later passes know the text is bare.
pub(crate) fn string(mut node: Node, options: &CanonOptions) -> CanonResult<Node> {
    let Some(token) = node.child_token(0) else {
        return Err(InternalError::malformed(&node, "string without token").into());
    };
    let text = match token.kind {
        TokenKind::SingleQuoted | TokenKind::DoubleQuoted => {
            if token.is(&TokenKind::SingleQuoted) && !options.allow_single_quotes {
                return Err(StoryError::new(ErrorType::SingleQuotes, &node).into());
            }
            multi_line_string(unquote(&token.text, 1))
        }
        TokenKind::TripleQuoted => unquote(&token.text, 3).to_owned(),
        _ => return Ok(node),
    };
    if let Some(Child::Token(token)) = node.children.first_mut() {
        token.kind = TokenKind::StringContent;
        token.text = text;
    }
    Ok(node)
}
