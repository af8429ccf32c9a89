//! Line table assembly.
//!
//! A compiled story is a flat table of [`Line`]s keyed by source line
//! number. The [`Lines`] builder receives statements in source order and
//! threads them together:
//!
//! - `next` links each line to the one compiled after it. A block header
//!   links into its body, and the last line of a body is never linked past
//!   the block.
//! - `exit` on a block header names the line where control resumes after
//!   the block. It is resolved when that line is appended.
//! - Services that are not the declared output of an enclosing block are
//!   collected as external dependencies of the story.

mod line;
mod lines;

pub use line::{Line, LineArgs, LineTable, Method};
pub use lines::{Lines, Scope};

/// Raw story source, addressed by 1-based line number.
pub trait SourceText {
    fn line(&self, line: u32) -> Option<&str>;
}

impl SourceText for str {
    fn line(&self, line: u32) -> Option<&str> {
        let index = usize::try_from(line.checked_sub(1)?).ok()?;
        self.lines().nth(index)
    }
}

impl SourceText for String {
    fn line(&self, line: u32) -> Option<&str> {
        self.as_str().line(line)
    }
}

impl<T: SourceText + ?Sized> SourceText for &T {
    fn line(&self, line: u32) -> Option<&str> {
        (**self).line(line)
    }
}
