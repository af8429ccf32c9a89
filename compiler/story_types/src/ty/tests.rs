#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

#[test]
fn parses_scalar_names() {
    for (text, ty) in [
        ("any", Type::Any),
        ("none", Type::None),
        ("boolean", Type::Boolean),
        ("int", Type::Int),
        ("float", Type::Float),
        ("string", Type::String),
        ("regex", Type::Regex),
        ("time", Type::Time),
        ("object", Type::Object),
    ] {
        assert_eq!(Type::parse(text), Some(ty));
    }
}

#[test]
fn parses_nested_collections() {
    assert_eq!(
        Type::parse("Map[string,List[int]]"),
        Some(Type::map(Type::String, Type::list(Type::Int)))
    );
    assert_eq!(
        Type::parse("List[Map[int,float]]"),
        Some(Type::list(Type::map(Type::Int, Type::Float)))
    );
}

#[test]
fn rejects_unknown_names() {
    assert_eq!(Type::parse("integer"), None);
    assert_eq!(Type::parse("List[int"), None);
    assert_eq!(Type::parse("Map[int]"), None);
}

#[test]
fn displays_like_parsed_text() {
    let ty = Type::map(Type::String, Type::list(Type::Boolean));
    assert_eq!(ty.to_string(), "Map[string,List[boolean]]");
    assert_eq!(Type::parse(&ty.to_string()), Some(ty));
}

#[test]
fn int_widens_to_float_only() {
    assert!(Type::Int.implicit_cast(&Type::Float));
    assert!(!Type::Float.implicit_cast(&Type::Int));
    assert!(!Type::String.implicit_cast(&Type::Int));
}

#[test]
fn any_and_none_cast_both_ways() {
    assert!(Type::String.implicit_cast(&Type::Any));
    assert!(Type::Any.implicit_cast(&Type::Int));
    assert!(Type::None.implicit_cast(&Type::list(Type::Int)));
    assert!(!Type::Int.implicit_cast(&Type::None));
}

#[test]
fn collections_cast_element_wise() {
    assert!(Type::list(Type::Int).implicit_cast(&Type::list(Type::Float)));
    assert!(!Type::list(Type::String).implicit_cast(&Type::list(Type::Int)));
    assert!(Type::map(Type::String, Type::Int)
        .implicit_cast(&Type::map(Type::String, Type::Float)));
    assert!(!Type::map(Type::Int, Type::Int).implicit_cast(&Type::map(Type::String, Type::Int)));
    assert!(!Type::list(Type::Int).implicit_cast(&Type::map(Type::Int, Type::Int)));
}

fn any_type() -> impl Strategy<Value = Type> {
    let leaf = prop_oneof![
        Just(Type::Any),
        Just(Type::None),
        Just(Type::Boolean),
        Just(Type::Int),
        Just(Type::Float),
        Just(Type::String),
        Just(Type::Regex),
        Just(Type::Time),
        Just(Type::Object),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Type::list),
            (inner.clone(), inner).prop_map(|(key, value)| Type::map(key, value)),
        ]
    })
}

proptest! {
    #[test]
    fn every_type_casts_to_itself_and_any(ty in any_type()) {
        prop_assert!(ty.implicit_cast(&ty));
        prop_assert!(ty.implicit_cast(&Type::Any));
    }

    #[test]
    fn display_parses_back(ty in any_type()) {
        prop_assert_eq!(Type::parse(&ty.to_string()), Some(ty));
    }
}
