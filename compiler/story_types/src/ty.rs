//! Story types.

use std::fmt;

/// A story type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    Any,
    None,
    Boolean,
    Int,
    Float,
    String,
    Regex,
    Time,
    Object,
    List(Box<Type>),
    Map(Box<Type>, Box<Type>),
}

impl Type {
    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(Box::new(key), Box::new(value))
    }

    /// Parse a type name such as `int`, `List[int]` or `Map[string,int]`.
    pub fn parse(text: &str) -> Option<Type> {
        let text = text.trim();
        if let Some(inner) = text.strip_prefix("List[").and_then(|rest| rest.strip_suffix(']')) {
            return Type::parse(inner).map(Type::list);
        }
        if let Some(inner) = text.strip_prefix("Map[").and_then(|rest| rest.strip_suffix(']')) {
            let (key, value) = split_top_level(inner)?;
            return Some(Type::map(Type::parse(key)?, Type::parse(value)?));
        }
        Some(match text {
            "any" => Type::Any,
            "none" => Type::None,
            "boolean" => Type::Boolean,
            "int" => Type::Int,
            "float" => Type::Float,
            "string" => Type::String,
            "regex" => Type::Regex,
            "time" => Type::Time,
            "object" => Type::Object,
            _ => return None,
        })
    }

    /// Whether a value of type `self` may be passed where `target` is
    /// declared.
    pub fn implicit_cast(&self, target: &Type) -> bool {
        if self == target {
            return true;
        }
        match (self, target) {
            (_, Type::Any) | (Type::Any | Type::None, _) | (Type::Int, Type::Float) => true,
            (Type::List(from), Type::List(to)) => from.implicit_cast(to),
            (Type::Map(from_key, from_value), Type::Map(to_key, to_value)) => {
                from_key.implicit_cast(to_key) && from_value.implicit_cast(to_value)
            }
            _ => false,
        }
    }
}

/// Split `a,b` at the comma that is not nested in brackets.
fn split_top_level(text: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (index, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => return Some((&text[..index], &text[index + 1..])),
            _ => {}
        }
    }
    None
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => f.write_str("any"),
            Type::None => f.write_str("none"),
            Type::Boolean => f.write_str("boolean"),
            Type::Int => f.write_str("int"),
            Type::Float => f.write_str("float"),
            Type::String => f.write_str("string"),
            Type::Regex => f.write_str("regex"),
            Type::Time => f.write_str("time"),
            Type::Object => f.write_str("object"),
            Type::List(element) => write!(f, "List[{element}]"),
            Type::Map(key, value) => write!(f, "Map[{key},{value}]"),
        }
    }
}

#[cfg(test)]
mod tests;
