//! Statement compilation.
//!
//! Walks the canonical tree in source order and appends one line per
//! statement to the line builder. Calls to declared functions and
//! registered mutations are checked against their signatures as they are
//! met, so a function must be declared before it is called.

use std::collections::BTreeMap;

use story_diagnostic::{CompileError, ErrorItem, ErrorType, InternalError, StoryError};
use story_ir::{Argument, Child, Node, NodeKind, Object, Position, Value};
use story_lines::{LineArgs, Lines, Method, SourceText};
use story_types::{CallArgs, FunctionTable, Signature, Type, TypeEnv};

use crate::CompiledStory;

type CompileResult<T> = Result<T, CompileError>;

pub(crate) struct StatementCompiler<'src> {
    lines: Lines<'src>,
    table: FunctionTable,
    env: TypeEnv,
    /// Function whose body is being compiled.
    function: Option<String>,
}

impl<'src> StatementCompiler<'src> {
    pub(crate) fn new(source: &'src dyn SourceText, table: FunctionTable) -> Self {
        StatementCompiler {
            lines: Lines::new(source),
            table,
            env: TypeEnv::new(),
            function: None,
        }
    }

    pub(crate) fn compile(mut self, tree: &Node) -> CompileResult<CompiledStory> {
        self.statement(tree, None)?;
        Ok(CompiledStory::from_lines(self.lines))
    }

    fn block(&mut self, node: &Node, parent: Option<u32>) -> CompileResult<()> {
        for child in node.children.iter().filter_map(Child::as_node) {
            self.statement(child, parent)?;
        }
        Ok(())
    }

    fn statement(&mut self, node: &Node, parent: Option<u32>) -> CompileResult<()> {
        match node.kind {
            NodeKind::Start | NodeKind::Block | NodeKind::NestedBlock | NodeKind::Rules => {
                self.block(node, parent)
            }
            NodeKind::Assignment => self.assignment(node, parent),
            NodeKind::ServiceBlock => self.service_block(node, parent),
            NodeKind::WhenBlock => self.when_block(node, parent),
            NodeKind::ConciseWhenBlock => self.concise_when_block(node, parent),
            NodeKind::FunctionBlock => self.function_block(node, parent),
            NodeKind::ReturnStatement => self.return_statement(node, parent),
            NodeKind::AbsoluteExpression => self.absolute_expression(node, parent),
            NodeKind::Arguments => {
                Err(StoryError::new(ErrorType::ArgumentsNoService, node).into())
            }
            _ => Err(InternalError::malformed(node, "unexpected statement").into()),
        }
    }

    /// Compile `body` as the block of the line `header`.
    fn scoped(
        &mut self,
        header: u32,
        parent: Option<u32>,
        output: Vec<String>,
        body: &Node,
    ) -> CompileResult<()> {
        self.lines.set_scope(header, parent, output);
        self.statement(body, Some(header))?;
        self.lines.finish_scope();
        Ok(())
    }

    /// `assignment[target, assignment_fragment[EQUALS, base_expression]]`
    fn assignment(&mut self, node: &Node, parent: Option<u32>) -> CompileResult<()> {
        let position = position(node)?;
        let target = node.child_node(0);
        let base = node
            .child_node(1)
            .and_then(|fragment| fragment.find(&NodeKind::BaseExpression));
        let (Some(target), Some(base)) = (target, base) else {
            return Err(InternalError::malformed(node, "expected target and value").into());
        };
        let names = target_names(target);

        if let Some(service) = base.child_node(0).filter(|value| value.is(&NodeKind::Service)) {
            self.service_call(service, None, position, parent)?;
            self.lines.set_name(names);
            return Ok(());
        }

        self.check_mutations(base)?;
        let value = story_lower::lower(base)?;
        if let [name] = names.as_slice() {
            let ty = self.env.type_of(&value, &self.table);
            tracing::trace!(name = %name, ty = %ty, "bound variable");
            self.env.bind(name.clone(), ty);
        }
        self.lines.append(
            Method::Set,
            position,
            LineArgs::new().args(vec![value]).parent(parent),
        )?;
        self.lines.set_name(names);
        Ok(())
    }

    /// `service_block[service, nested_block?]`
    fn service_block(&mut self, node: &Node, parent: Option<u32>) -> CompileResult<()> {
        let Some(service) = node.child_node(0) else {
            return Err(InternalError::malformed(node, "service block without service").into());
        };
        let position = position(service)?;
        self.service_call(service, node.child_node(1), position, parent)
    }

    /// `service[path, service_fragment]`: an `execute` line, or a `call` line
    /// when the service name is a declared function.
    fn service_call(
        &mut self,
        service: &Node,
        body: Option<&Node>,
        position: Position,
        parent: Option<u32>,
    ) -> CompileResult<()> {
        let Some(path) = service.child_node(0) else {
            return Err(InternalError::malformed(service, "service without name").into());
        };
        let name = target_names(path).join(".");
        let fragment = service.find(&NodeKind::ServiceFragment);
        let args = match fragment {
            Some(fragment) => {
                self.check_mutations(fragment)?;
                story_lower::arguments(fragment)?
                    .into_iter()
                    .map(Value::from)
                    .collect()
            }
            None => Vec::new(),
        };
        let enter = body.and_then(Node::line);

        let output = if let Some(signature) = self.table.function(&name) {
            let call_args = match fragment {
                Some(fragment) => self.call_args(fragment)?,
                None => CallArgs::new(),
            };
            signature.check_call(&ErrorItem::tree(service), &call_args)?;
            self.lines.append(
                Method::Call,
                position,
                LineArgs::new()
                    .function(name)
                    .args(args)
                    .enter(enter)
                    .parent(parent),
            )?;
            Vec::new()
        } else {
            let command = fragment
                .and_then(|fragment| fragment.find(&NodeKind::Command))
                .and_then(|command| command.child_token(0))
                .map(|token| token.text.clone());
            let output = fragment
                .and_then(|fragment| fragment.find(&NodeKind::Output))
                .map(output_names);
            self.lines.execute(
                position,
                name,
                LineArgs::new()
                    .command(command)
                    .args(args)
                    .output(output.clone())
                    .enter(enter)
                    .parent(parent),
            )?;
            output.unwrap_or_default()
        };

        match body {
            Some(body) => self.scoped(position.line, parent, output, body),
            None => Ok(()),
        }
    }

    /// `when_block[service[path, service_fragment], block]`
    fn when_block(&mut self, node: &Node, parent: Option<u32>) -> CompileResult<()> {
        let (Some(service), Some(body)) = (node.child_node(0), node.child_node(1)) else {
            return Err(InternalError::malformed(node, "expected service and block").into());
        };
        let position = position(service)?;
        let event = self.event(service)?;
        let output = event.output.clone().unwrap_or_default();
        self.lines.append(
            Method::When,
            position,
            LineArgs::new()
                .service(event.service)
                .command(event.command)
                .args(event.args.into_iter().map(Value::from).collect())
                .output(event.output)
                .enter(body.line())
                .parent(parent),
        )?;
        self.scoped(position.line, parent, output, body)
    }

    /// `concise_when_block[NAME, NAME, when_block]`
    ///
    /// `when http server listen` starts `http server` and listens on it. Both
    /// live on one source line, so the start is the `execute` line and the
    /// event it listens for is carried as a `method` value in its `args`.
    /// The block body is the scope of the `execute` line.
    fn concise_when_block(&mut self, node: &Node, parent: Option<u32>) -> CompileResult<()> {
        let (Some(name), Some(command), Some(when)) = (
            node.child_token(0),
            node.child_token(1),
            node.child_node(2),
        ) else {
            return Err(InternalError::malformed(node, "expected service, command and when").into());
        };
        let (Some(service), Some(body)) = (when.child_node(0), when.child_node(1)) else {
            return Err(InternalError::malformed(when, "expected service and block").into());
        };
        let position = name.position().to(command.position());
        let event = self.event(service)?;
        let listener = vec![event.service.clone()];
        let event = Value::Object(Object::Method {
            method: Method::When.as_str().to_owned(),
            service: event.service,
            command: event.command,
            output: event.output,
            args: event.args,
        });
        self.lines.execute(
            position,
            name.text.as_str(),
            LineArgs::new()
                .command(Some(command.text.clone()))
                .args(vec![event])
                .output(Some(listener.clone()))
                .enter(body.line())
                .parent(parent),
        )?;
        self.scoped(position.line, parent, listener, body)
    }

    /// Service, command, arguments and output of a `when` service.
    fn event(&self, service: &Node) -> CompileResult<Event> {
        let Some(path) = service.child_node(0) else {
            return Err(InternalError::malformed(service, "when without service").into());
        };
        let fragment = service.find(&NodeKind::ServiceFragment);
        let command = fragment
            .and_then(|fragment| fragment.find(&NodeKind::Command))
            .and_then(|command| command.child_token(0))
            .map(|token| token.text.clone());
        let output = fragment
            .and_then(|fragment| fragment.find(&NodeKind::Output))
            .map(output_names);
        let args = match fragment {
            Some(fragment) => {
                self.check_mutations(fragment)?;
                story_lower::arguments(fragment)?
            }
            None => Vec::new(),
        };
        Ok(Event {
            service: target_names(path).join("."),
            command,
            args,
            output,
        })
    }

    /// `function_block[function_statement[NAME, typed_argument*, returns?], nested_block?]`
    fn function_block(&mut self, node: &Node, parent: Option<u32>) -> CompileResult<()> {
        let Some(header) = node.child_node(0) else {
            return Err(InternalError::malformed(node, "function without header").into());
        };
        let Some(name) = header.child_token(0).map(|token| token.text.clone()) else {
            return Err(InternalError::malformed(header, "function without name").into());
        };
        let position = position(header)?;

        let typed = story_lower::function_arguments(header)?;
        let args: BTreeMap<String, Type> = typed
            .iter()
            .map(|argument| (argument.name.clone(), declared_type(&argument.argument)))
            .collect();
        let returns = header
            .find(&NodeKind::Returns)
            .and_then(|returns| returns.find(&NodeKind::Types))
            .map(story_lower::type_name)
            .transpose()?;
        let output = returns
            .as_deref()
            .and_then(Type::parse)
            .unwrap_or(Type::None);

        self.table
            .insert_function(Signature::function(name.as_str(), args.clone(), output), header)?;
        let body = node.child_node(1);
        self.lines.append(
            Method::Function,
            position,
            LineArgs::new()
                .function(name.as_str())
                .args(typed.into_iter().map(Value::from).collect())
                .output(returns.map(|returns| vec![returns]))
                .enter(body.and_then(Node::line))
                .parent(parent),
        )?;

        let Some(body) = body else {
            return Ok(());
        };
        for (arg, ty) in args {
            self.env.bind(arg, ty);
        }
        let enclosing = self.function.replace(name);
        let result = self.scoped(position.line, parent, Vec::new(), body);
        self.function = enclosing;
        result
    }

    /// `return_statement[base_expression?]`
    fn return_statement(&mut self, node: &Node, parent: Option<u32>) -> CompileResult<()> {
        if self.function.is_none() {
            return Err(StoryError::new(ErrorType::ReturnOutside, node).into());
        }
        let position = position(node)?;
        let args = match node.find(&NodeKind::BaseExpression) {
            Some(value) => {
                self.check_mutations(value)?;
                vec![story_lower::lower(value)?]
            }
            None => Vec::new(),
        };
        self.lines.append(
            Method::Return,
            position,
            LineArgs::new().args(args).parent(parent),
        )?;
        Ok(())
    }

    /// `absolute_expression[expression]`
    fn absolute_expression(&mut self, node: &Node, parent: Option<u32>) -> CompileResult<()> {
        let Some(expression) = node.child_node(0) else {
            return Err(InternalError::malformed(node, "empty expression statement").into());
        };
        let position = position(node)?;
        self.check_mutations(expression)?;
        let value = story_lower::lower(expression)?;
        self.lines.append(
            Method::Expression,
            position,
            LineArgs::new().args(vec![value]).parent(parent),
        )?;
        Ok(())
    }

    /// Argument types of a call, keyed by argument name.
    fn call_args(&self, node: &Node) -> CompileResult<CallArgs> {
        let mut args = CallArgs::new();
        for arguments in node.find_all(&NodeKind::Arguments) {
            let argument = story_lower::argument(arguments)?;
            let item = arguments
                .child(1)
                .map_or_else(|| ErrorItem::tree(arguments), ErrorItem::child);
            let ty = self.env.type_of(&argument.argument, &self.table);
            args.insert(argument.name, (ty, item));
        }
        Ok(args)
    }

    /// Check every registered mutation called inside `node`, including
    /// mutations called in another mutation's arguments.
    fn check_mutations(&self, node: &Node) -> CompileResult<()> {
        for fragment in node.find_all(&NodeKind::MutationFragment) {
            if let Some(name) = fragment.child_token(0) {
                if let Some(signature) = self.table.mutation(&name.text) {
                    let args = self.call_args(fragment)?;
                    signature.check_call(&ErrorItem::token(name), &args)?;
                }
            }
            for arguments in fragment.children.iter().filter_map(Child::as_node) {
                self.check_mutations(arguments)?;
            }
        }
        Ok(())
    }
}

/// The parts of a `when` service.
struct Event {
    service: String,
    command: Option<String>,
    args: Vec<Argument>,
    output: Option<Vec<String>>,
}

fn position(node: &Node) -> Result<Position, InternalError> {
    node.position()
        .ok_or_else(|| InternalError::MissingPosition(node.kind.to_string()))
}

/// Names of an assignment target or service path.
///
/// Destructuring targets name every variable; paths name each fragment.
fn target_names(target: &Node) -> Vec<String> {
    if target.is(&NodeKind::AssignmentDestructoring) {
        return target
            .children
            .iter()
            .filter_map(|child| match child {
                Child::Token(token) => Some(token.text.clone()),
                Child::Node(node) => node.first_token().map(|token| token.text.clone()),
            })
            .collect();
    }
    target
        .children
        .iter()
        .map(|child| match child {
            Child::Token(token) => token.text.clone(),
            Child::Node(fragment) => fragment.text(),
        })
        .collect()
}

/// `output[NAME*]`
fn output_names(output: &Node) -> Vec<String> {
    output
        .children
        .iter()
        .filter_map(Child::as_token)
        .map(|token| token.text.clone())
        .collect()
}

/// The declared type of a lowered typed argument.
fn declared_type(value: &Value) -> Type {
    match value {
        Value::Object(Object::Type { name }) => Type::parse(name).unwrap_or(Type::Any),
        _ => Type::Any,
    }
}
