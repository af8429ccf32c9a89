//! The line builder.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use story_diagnostic::{CompileError, ErrorItem, ErrorType, InternalError, ItemKind, StoryError};
use story_ir::Position;

use crate::{Line, LineArgs, LineTable, Method, SourceText};

/// An open block.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Scope {
    /// Line of the block header.
    pub line: u32,
    /// Header line of the enclosing block.
    pub parent: Option<u32>,
    /// Services whose results are available inside the block.
    pub output: Vec<String>,
}

impl Scope {
    fn declares(&self, service: &str) -> bool {
        self.output.iter().any(|name| name == service)
    }
}

/// Assembles the line table of one story.
///
/// Statements must be appended in source order.
pub struct Lines<'src> {
    source: &'src dyn SourceText,
    lines: FxHashMap<u32, Line>,
    /// Line numbers in insertion order.
    order: Vec<u32>,
    variables: Vec<Vec<String>>,
    services: Vec<String>,
    functions: BTreeMap<String, u32>,
    scopes: Vec<Scope>,
    /// Closed blocks whose `exit` is the next appended line.
    finished: Vec<u32>,
    /// Line whose `next` is the next appended line.
    cursor: Option<u32>,
}

impl<'src> Lines<'src> {
    pub fn new(source: &'src dyn SourceText) -> Self {
        Lines {
            source,
            lines: FxHashMap::default(),
            order: Vec::new(),
            variables: Vec::new(),
            services: Vec::new(),
            functions: BTreeMap::new(),
            scopes: Vec::new(),
            finished: Vec::new(),
            cursor: None,
        }
    }

    /// Add a line.
    ///
    /// Fails with `service-path` when the line's service name contains a
    /// `.`, and with an internal error when `position.line` is already taken.
    pub fn append(
        &mut self,
        method: Method,
        position: Position,
        args: LineArgs,
    ) -> Result<(), CompileError> {
        let ln = position.line;
        if self.lines.contains_key(&ln) {
            return Err(InternalError::DuplicateLine(ln).into());
        }
        for scope in self.finished.drain(..) {
            if let Some(header) = self.lines.get_mut(&scope) {
                header.exit = Some(ln);
            }
        }

        if let Some(service) = &args.service {
            check_service_name(service, position)?;
        }
        match method {
            Method::Function => {
                if let Some(function) = &args.function {
                    self.functions.insert(function.clone(), ln);
                }
            }
            Method::Execute => {
                if let Some(service) = &args.service {
                    if !self.is_output(args.parent, service) {
                        self.services.push(service.clone());
                    }
                }
            }
            _ => {}
        }

        if let Some(previous) = self.cursor.and_then(|cursor| self.lines.get_mut(&cursor)) {
            previous.next = Some(ln);
        }
        self.cursor = Some(ln);

        tracing::trace!(ln, %method, "append line");
        self.lines.insert(
            ln,
            Line {
                method,
                ln,
                col_start: position.column,
                col_end: position.end_column,
                output: args.output,
                name: args.name,
                service: args.service,
                command: args.command,
                function: args.function,
                args: args.args,
                enter: args.enter,
                exit: None,
                parent: args.parent,
                next: None,
                src: self.source.line(ln).map(str::to_owned),
            },
        );
        self.order.push(ln);
        Ok(())
    }

    /// Add an `execute` line calling `service`.
    pub fn execute(
        &mut self,
        position: Position,
        service: impl Into<String>,
        args: LineArgs,
    ) -> Result<(), CompileError> {
        self.append(Method::Execute, position, args.service(service))
    }

    /// Open a block whose header is `line`.
    ///
    /// The header links into the first body line. A block closed without any
    /// body line keeps its `next` unset.
    pub fn set_scope(&mut self, line: u32, parent: Option<u32>, output: Vec<String>) {
        tracing::debug!(line, ?parent, ?output, "open scope");
        self.scopes.push(Scope {
            line,
            parent,
            output,
        });
        self.cursor = Some(line);
    }

    /// Close the innermost block.
    ///
    /// Its `exit` is set to the next appended line, and the last body line
    /// is not linked to anything.
    pub fn finish_scope(&mut self) {
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        tracing::debug!(line = scope.line, "close scope");
        self.finished.push(scope.line);
        self.cursor = None;
    }

    /// Whether `service` is the declared output of the block `parent` or of
    /// any block enclosing it.
    pub fn is_output(&self, parent: Option<u32>, service: &str) -> bool {
        let mut frames = self.scopes.as_slice();
        let mut current = parent;
        while let Some(line) = current {
            let Some(index) = frames.iter().rposition(|scope| scope.line == line) else {
                return false;
            };
            let scope = &frames[index];
            if scope.declares(service) {
                return true;
            }
            current = scope.parent;
            frames = &frames[..index];
        }
        false
    }

    /// Referenced external services, sorted and deduplicated.
    pub fn get_services(&self) -> Vec<String> {
        let mut services = self.services.clone();
        services.sort_unstable();
        services.dedup();
        services
    }

    /// Name the most recently appended line and declare its variable.
    pub fn set_name(&mut self, name: Vec<String>) {
        if let Some(last) = self.order.last().and_then(|ln| self.lines.get_mut(ln)) {
            last.name = Some(name.clone());
        }
        self.variables.push(name);
    }

    pub fn is_variable_defined(&self, name: &str) -> bool {
        self.variables
            .iter()
            .any(|names| names.iter().any(|declared| declared == name))
    }

    /// The innermost open block, if any.
    pub fn current_scope(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    pub fn entrypoint(&self) -> Option<u32> {
        self.order.first().copied()
    }

    pub fn first(&self) -> Option<&Line> {
        self.entrypoint().and_then(|ln| self.lines.get(&ln))
    }

    pub fn last(&self) -> Option<&Line> {
        self.order.last().and_then(|ln| self.lines.get(ln))
    }

    pub fn get(&self, ln: u32) -> Option<&Line> {
        self.lines.get(&ln)
    }

    /// Declared functions and their header lines.
    pub fn functions(&self) -> &BTreeMap<String, u32> {
        &self.functions
    }

    pub fn into_table(self) -> LineTable {
        LineTable::new(self.lines, self.order)
    }
}

fn check_service_name(service: &str, position: Position) -> Result<(), StoryError> {
    if service.contains('.') {
        let item = ErrorItem {
            kind: ItemKind::Token,
            text: service.to_owned(),
            position: Some(position),
        };
        return Err(StoryError::new(ErrorType::ServicePath, item));
    }
    Ok(())
}
