//! Function and mutation signatures.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use story_diagnostic::{CompileError, ErrorItem, ErrorType, StoryError};

use crate::Type;

/// What kind of callable a signature describes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FnKind {
    Function,
    Mutation,
}

impl fmt::Display for FnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FnKind::Function => "Function",
            FnKind::Mutation => "Mutation",
        })
    }
}

/// Arguments of one call: name → (resolved type, source item).
pub type CallArgs = BTreeMap<String, (Type, ErrorItem)>;

/// A declared signature. Immutable once registered.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Signature {
    kind: FnKind,
    name: String,
    args: BTreeMap<String, Type>,
    output: Type,
}

impl Signature {
    pub fn new(
        kind: FnKind,
        name: impl Into<String>,
        args: BTreeMap<String, Type>,
        output: Type,
    ) -> Self {
        Signature {
            kind,
            name: name.into(),
            args,
            output,
        }
    }

    pub fn function(name: impl Into<String>, args: BTreeMap<String, Type>, output: Type) -> Self {
        Signature::new(FnKind::Function, name, args, output)
    }

    pub fn mutation(name: impl Into<String>, args: BTreeMap<String, Type>, output: Type) -> Self {
        Signature::new(FnKind::Mutation, name, args, output)
    }

    #[inline]
    pub fn kind(&self) -> FnKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &BTreeMap<String, Type> {
        &self.args
    }

    /// The declared return type.
    pub fn output(&self) -> &Type {
        &self.output
    }

    /// Check a call's arguments.
    ///
    /// Names are checked first: every declared argument missing from the
    /// call and every supplied argument the signature does not know is
    /// reported, in sorted order, against `call`. Only when the names match
    /// are the types checked, each mismatch reported against its argument.
    pub fn check_call(&self, call: &ErrorItem, args: &CallArgs) -> Result<(), CompileError> {
        let declared: BTreeSet<&str> = self.args.keys().map(String::as_str).collect();
        let supplied: BTreeSet<&str> = args.keys().map(String::as_str).collect();

        let name_errors: Vec<StoryError> = declared
            .symmetric_difference(&supplied)
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|arg| {
                let error_type = if declared.contains(arg) {
                    ErrorType::FunctionArgRequired
                } else {
                    ErrorType::FunctionArgInvalid
                };
                self.error(error_type, call.clone(), arg)
            })
            .collect();
        if !name_errors.is_empty() {
            tracing::debug!(name = %self.name, count = name_errors.len(), "call argument names differ");
            return Err(CompileError::Call(name_errors));
        }

        let type_errors: Vec<StoryError> = args
            .iter()
            .filter_map(|(arg, (ty, item))| {
                let target = self.args.get(arg)?;
                (!ty.implicit_cast(target)).then(|| {
                    self.error(ErrorType::FunctionArgTypeMismatch, item.clone(), arg)
                        .with_arg("target", target.to_string())
                        .with_arg("source", ty.to_string())
                })
            })
            .collect();
        if !type_errors.is_empty() {
            tracing::debug!(name = %self.name, count = type_errors.len(), "call argument types differ");
            return Err(CompileError::Call(type_errors));
        }
        Ok(())
    }

    fn error(&self, error_type: ErrorType, item: ErrorItem, arg: &str) -> StoryError {
        StoryError::new(error_type, item)
            .with_arg("fn_type", self.kind.to_string())
            .with_arg("name", self.name.as_str())
            .with_arg("arg", arg)
    }

    /// Human-readable signature: `name(a:`int` b:`string`)` for functions,
    /// `name a:`int` b:`string`` for mutations.
    pub fn pretty(&self) -> String {
        let args = self
            .args
            .iter()
            .map(|(name, ty)| format!("{name}:`{ty}`"))
            .collect::<Vec<_>>()
            .join(" ");
        match self.kind {
            FnKind::Function => format!("{}({args})", self.name),
            FnKind::Mutation if args.is_empty() => self.name.clone(),
            FnKind::Mutation => format!("{} {args}", self.name),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.name)
    }
}
