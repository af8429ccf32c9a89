//! Tokens and source positions.
//!
//! Tokens are produced by the external lexer and are immutable afterwards.
//! Normalization may synthesize new tokens, always copying the position of
//! a template token so diagnostics keep pointing at real source.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in the story source.
///
/// `line` is 1-based, `column` is 1-based, `end_column` is exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub end_column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32, end_column: u32) -> Self {
        Position {
            line,
            column,
            end_column,
        }
    }

    /// Span from the start of `self` to the end of `other`, on `self`'s line.
    #[must_use]
    pub fn to(self, other: Position) -> Position {
        Position {
            line: self.line,
            column: self.column,
            end_column: other.end_column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

define_kinds! {
    /// Lexer token kinds the compiler inspects.
    ///
    /// Names follow the external grammar's terminal names.
    pub enum TokenKind {
        Name => "NAME",
        Int => "INT",
        Float => "FLOAT",
        /// `1.increment(` lexed as one token.
        FloatMut => "FLOAT_MUT",
        Equals => "EQUALS",
        AddEquals => "ADD_EQUALS",
        SubEquals => "SUB_EQUALS",
        MulEquals => "MUL_EQUALS",
        DivEquals => "DIV_EQUALS",
        ModEquals => "MOD_EQUALS",
        Plus => "PLUS",
        Dash => "DASH",
        Multiplier => "MULTIPLIER",
        Bslash => "BSLASH",
        Modulus => "MODULUS",
        Power => "POWER",
        DoubleQuoted => "DOUBLE_QUOTED",
        SingleQuoted => "SINGLE_QUOTED",
        TripleQuoted => "TRIPLE_QUOTED",
        /// String content with its delimiters already removed.
        StringContent => "STRING",
        Filepath => "FILEPATH",
        True => "TRUE",
        False => "FALSE",
        /// `[`
        Osb => "OSB",
        /// `]`
        Csb => "CSB",
        /// `{`
        Ocb => "OCB",
        /// `}`
        Ccb => "CCB",
        Colon => "COLON",
        Comma => "COMMA",
        Dot => "DOT",
    }
}

impl TokenKind {
    /// Whether this token only delimits a bracketed construct.
    pub fn is_delimiter(&self) -> bool {
        matches!(
            self,
            TokenKind::Osb | TokenKind::Csb | TokenKind::Ocb | TokenKind::Ccb | TokenKind::Comma
        )
    }
}

/// A lexer token with its position.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
    pub end_column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            line: position.line,
            column: position.column,
            end_column: position.end_column,
        }
    }

    /// Create a token positioned like `template`.
    pub fn from_template(template: &Token, kind: TokenKind, text: impl Into<String>) -> Self {
        Token::new(kind, text, template.position())
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, self.end_column)
    }

    #[inline]
    pub fn is(&self, kind: &TokenKind) -> bool {
        self.kind == *kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
