//! Diagnostics for the story compiler.
//!
//! Every user-facing failure is a [`StoryError`]: an [`ErrorType`] tag, the
//! offending tree or token item with its position, and the arguments needed
//! to render the reason. Broken contracts between passes are
//! [`InternalError`]s and never reach the user as syntax errors.
//!
//! ```text
//! Failed reading story because of unexpected "<text>" at line L, column C. Reason: <reason>
//! ```

mod error;
mod error_type;

pub use error::{CompileError, ErrorItem, InternalError, ItemKind, StoryError};
pub use error_type::ErrorType;

/// Result of a pass that can only fail with a user-facing error.
pub type StoryResult<T> = Result<T, StoryError>;
