//! IR value objects.
//!
//! These are the only values that cross from the lowerer into compiled
//! lines. Objects serialize with a `$OBJECT` discriminant; numbers and
//! booleans serialize as bare JSON scalars.

use serde::Serialize;

/// A lowered value.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(i64),
    Float(f64),
    Boolean(bool),
    Argument(Argument),
    Object(Object),
}

/// One fragment of a path: a plain name or a bracketed subscript value.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(untagged)]
pub enum PathFragment {
    Name(String),
    Value(Value),
}

/// A named argument.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(tag = "$OBJECT", rename = "argument")]
pub struct Argument {
    pub name: String,
    pub argument: Box<Value>,
}

impl Argument {
    pub fn new(name: impl Into<String>, argument: Value) -> Self {
        Argument {
            name: name.into(),
            argument: Box::new(argument),
        }
    }
}

/// Tagged IR objects.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(tag = "$OBJECT", rename_all = "lowercase")]
pub enum Object {
    Path {
        paths: Vec<PathFragment>,
    },
    String {
        string: String,
        /// Placeholder values in order of appearance; absent when the
        /// string has no placeholders.
        #[serde(skip_serializing_if = "Option::is_none")]
        values: Option<Vec<Value>>,
    },
    List {
        items: Vec<Value>,
    },
    Dict {
        items: Vec<(Value, Value)>,
    },
    Type {
        #[serde(rename = "type")]
        name: String,
    },
    Mutation {
        /// Receiver of a chained mutation.
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<Box<Value>>,
        mutation: String,
        arguments: Vec<Argument>,
    },
    Method {
        method: String,
        service: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        command: Option<String>,
        output: Option<Vec<String>>,
        args: Vec<Argument>,
    },
    Expression {
        expression: String,
        values: Vec<Value>,
    },
    File {
        string: String,
    },
}

impl Value {
    /// A path value from plain names.
    pub fn path<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::Object(Object::Path {
            paths: names
                .into_iter()
                .map(|name| PathFragment::Name(name.into()))
                .collect(),
        })
    }

    /// A string value without placeholders.
    pub fn string(text: impl Into<String>) -> Self {
        Value::Object(Object::String {
            string: text.into(),
            values: None,
        })
    }

    pub fn type_name(name: impl Into<String>) -> Self {
        Value::Object(Object::Type { name: name.into() })
    }

    /// A `"{} <op> {}"` style expression.
    pub fn expression(template: impl Into<String>, values: Vec<Value>) -> Self {
        Value::Object(Object::Expression {
            expression: template.into(),
            values,
        })
    }

    /// Plain names of a path value.
    ///
    /// Returns `None` for non-paths and for paths with subscript values.
    pub fn path_names(&self) -> Option<Vec<&str>> {
        let Value::Object(Object::Path { paths }) = self else {
            return None;
        };
        paths
            .iter()
            .map(|fragment| match fragment {
                PathFragment::Name(name) => Some(name.as_str()),
                PathFragment::Value(_) => None,
            })
            .collect()
    }
}

impl From<Argument> for Value {
    fn from(argument: Argument) -> Self {
        Value::Argument(argument)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests;
