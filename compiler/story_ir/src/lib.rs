//! Story IR - tree and value types shared by every compiler pass.
//!
//! This crate contains the data structures that flow through the pipeline:
//! - Positions and tokens produced by the external lexer
//! - The mutable parse tree (`Node`/`Child`) rewritten by `story_canon`
//! - IR value objects produced by `story_lower`
//!
//! # Pipeline Position
//!
//! ```text
//! raw tree → story_canon → story_lower → story_lines (+ story_types)
//! ```
//!
//! # Design
//!
//! - **Owned trees**: every node is uniquely owned by its parent; passes
//!   replace and reorder children freely.
//! - **Closed kinds**: node and token kinds are enums. Names the compiler
//!   never inspects land in an explicit `Other` variant so that every match
//!   spells out its identity default.
//! - **Numeric positions**: columns are `u32` from the start, absent
//!   positions are `None`.

/// Define a kind enum backed by grammar names.
///
/// Each generated type has:
/// - one unit variant per listed grammar name, plus `Other(String)`
/// - `as_str()` / `from_name()` conversions
/// - serde support through its grammar name
macro_rules! define_kinds {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Eq, PartialEq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)*
            /// A grammar name without dedicated handling.
            Other(String),
        }

        impl $name {
            /// The grammar name of this kind.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)*
                    Self::Other(name) => name,
                }
            }

            /// Resolve a grammar name.
            pub fn from_name(name: &str) -> Self {
                match name {
                    $($text => Self::$variant,)*
                    other => Self::Other(other.to_owned()),
                }
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::from_name(&name)
            }
        }

        impl From<$name> for String {
            fn from(kind: $name) -> Self {
                kind.as_str().to_owned()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod node;
mod token;
mod value;

pub use node::{Child, ExpressionKind, Node, NodeKind};
pub use token::{Position, Token, TokenKind};
pub use value::{Argument, Object, PathFragment, Value};
