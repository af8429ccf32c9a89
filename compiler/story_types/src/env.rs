//! Variable types seen so far in a story.

use rustc_hash::FxHashMap;
use story_ir::{Object, Value};

use crate::{FunctionTable, Type};

/// Flat variable → type bindings.
///
/// Stories have a single variable namespace, so there is no scoping here.
#[derive(Clone, Debug, Default)]
pub struct TypeEnv {
    bindings: FxHashMap<String, Type>,
}

impl TypeEnv {
    pub fn new() -> Self {
        TypeEnv::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, ty: Type) {
        self.bindings.insert(name.into(), ty);
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name)
    }

    /// Type of a lowered value.
    ///
    /// Only literals, bound variables and registered mutations have a known
    /// type; everything else is `any`.
    pub fn type_of(&self, value: &Value, table: &FunctionTable) -> Type {
        match value {
            Value::Number(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::Boolean(_) => Type::Boolean,
            Value::Argument(argument) => self.type_of(&argument.argument, table),
            Value::Object(object) => match object {
                Object::String { .. } | Object::File { .. } => Type::String,
                Object::List { items } => Type::list(self.common(items.iter(), table)),
                Object::Dict { items } => Type::map(
                    self.common(items.iter().map(|(key, _)| key), table),
                    self.common(items.iter().map(|(_, value)| value), table),
                ),
                Object::Path { .. } => value
                    .path_names()
                    .and_then(|names| match names.as_slice() {
                        [name] => self.lookup(name).cloned(),
                        _ => None,
                    })
                    .unwrap_or(Type::Any),
                Object::Mutation { mutation, .. } => table
                    .mutation(mutation)
                    .map_or(Type::Any, |signature| signature.output().clone()),
                Object::Type { .. } | Object::Method { .. } | Object::Expression { .. } => {
                    Type::Any
                }
            },
        }
    }

    /// The single type shared by every value, or `any`.
    fn common<'a>(&self, mut values: impl Iterator<Item = &'a Value>, table: &FunctionTable) -> Type {
        let Some(first) = values.next() else {
            return Type::Any;
        };
        let first = self.type_of(first, table);
        if values.all(|value| self.type_of(value, table) == first) {
            first
        } else {
            Type::Any
        }
    }
}
