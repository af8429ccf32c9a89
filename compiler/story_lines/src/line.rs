//! Compiled line records.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use story_ir::Value;

/// Statement kind of a compiled line.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Set,
    Execute,
    Call,
    When,
    Function,
    Return,
    Expression,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Set => "set",
            Method::Execute => "execute",
            Method::Call => "call",
            Method::When => "when",
            Method::Function => "function",
            Method::Return => "return",
            Method::Expression => "expression",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement payload of a line. Every field is optional.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LineArgs {
    pub name: Option<Vec<String>>,
    pub args: Option<Vec<Value>>,
    pub service: Option<String>,
    pub command: Option<String>,
    pub function: Option<String>,
    pub output: Option<Vec<String>>,
    pub enter: Option<u32>,
    pub parent: Option<u32>,
}

impl LineArgs {
    pub fn new() -> Self {
        LineArgs::default()
    }

    #[must_use]
    pub fn args(mut self, args: Vec<Value>) -> Self {
        self.args = Some(args);
        self
    }

    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    #[must_use]
    pub fn command(mut self, command: Option<String>) -> Self {
        self.command = command;
        self
    }

    #[must_use]
    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    #[must_use]
    pub fn output(mut self, output: Option<Vec<String>>) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn enter(mut self, enter: Option<u32>) -> Self {
        self.enter = enter;
        self
    }

    #[must_use]
    pub fn parent(mut self, parent: Option<u32>) -> Self {
        self.parent = parent;
        self
    }
}

/// One compiled statement.
///
/// Absent fields serialize as `null`; consumers rely on every key being
/// present.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Line {
    pub method: Method,
    pub ln: u32,
    pub col_start: u32,
    pub col_end: u32,
    pub output: Option<Vec<String>>,
    pub name: Option<Vec<String>>,
    pub service: Option<String>,
    pub command: Option<String>,
    pub function: Option<String>,
    pub args: Option<Vec<Value>>,
    pub enter: Option<u32>,
    pub exit: Option<u32>,
    pub parent: Option<u32>,
    pub next: Option<u32>,
    pub src: Option<String>,
}

/// The finished line table, in compilation order.
///
/// Serializes as a map from line number (as a string) to [`Line`].
#[derive(Clone, Debug, Default)]
pub struct LineTable {
    lines: FxHashMap<u32, Line>,
    order: Vec<u32>,
}

impl LineTable {
    pub(crate) fn new(lines: FxHashMap<u32, Line>, order: Vec<u32>) -> Self {
        LineTable { lines, order }
    }

    pub fn get(&self, ln: u32) -> Option<&Line> {
        self.lines.get(&ln)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Lines in the order they were compiled.
    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.order.iter().filter_map(|ln| self.lines.get(ln))
    }
}

impl Serialize for LineTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for line in self.iter() {
            map.serialize_entry(&line.ln.to_string(), line)?;
        }
        map.end()
    }
}
