#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use story_diagnostic::{ErrorItem, ErrorType, ItemKind};

use super::*;
use crate::Type;

fn item() -> ErrorItem {
    ErrorItem {
        kind: ItemKind::Tree,
        text: "function greet".to_owned(),
        position: None,
    }
}

fn greet() -> Signature {
    Signature::function(
        "greet",
        BTreeMap::from([("name".to_owned(), Type::String)]),
        Type::String,
    )
}

#[test]
fn registered_function_is_found() {
    let mut table = FunctionTable::new();
    table.insert_function(greet(), item()).unwrap();

    assert_eq!(table.function("greet"), Some(&greet()));
    assert_eq!(table.mutation("greet"), None);
}

#[test]
fn redeclaring_function_fails() {
    let mut table = FunctionTable::new();
    table.insert_function(greet(), item()).unwrap();
    let error = table.insert_function(greet(), item()).unwrap_err();

    assert_eq!(error.error_type, ErrorType::FunctionRedeclared);
    assert_eq!(error.arg("name"), Some("greet"));
}

#[test]
fn mutations_live_in_their_own_namespace() {
    let mut table = FunctionTable::new();
    table.insert_function(greet(), item()).unwrap();
    table.insert_mutation(Signature::mutation("greet", BTreeMap::new(), Type::Int));

    assert_eq!(table.mutation("greet").unwrap().output(), &Type::Int);
    assert_eq!(table.function("greet").unwrap().output(), &Type::String);
}
