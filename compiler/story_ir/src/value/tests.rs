#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn scalars_serialize_bare() {
    assert_eq!(serde_json::to_value(Value::Number(3)).unwrap(), json!(3));
    assert_eq!(serde_json::to_value(Value::Boolean(true)).unwrap(), json!(true));
}

#[test]
fn path_serializes_with_tag() {
    let value = Value::path(["a", "b"]);
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        json!({"$OBJECT": "path", "paths": ["a", "b"]})
    );
}

#[test]
fn plain_string_has_no_values_field() {
    let value = Value::string("hello");
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        json!({"$OBJECT": "string", "string": "hello"})
    );
}

#[test]
fn argument_carries_its_own_tag() {
    let value = Value::from(Argument::new("msg", Value::Number(1)));
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        json!({"$OBJECT": "argument", "name": "msg", "argument": 1})
    );
}

#[test]
fn method_keeps_null_output() {
    let value = Value::Object(Object::Method {
        method: "execute".to_string(),
        service: "alpine".to_string(),
        command: Some("echo".to_string()),
        output: None,
        args: vec![],
    });
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        json!({
            "$OBJECT": "method",
            "method": "execute",
            "service": "alpine",
            "command": "echo",
            "output": null,
            "args": []
        })
    );
}

#[test]
fn dict_items_are_pairs() {
    let value = Value::Object(Object::Dict {
        items: vec![(Value::string("k"), Value::Number(1))],
    });
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        json!({"$OBJECT": "dict", "items": [[{"$OBJECT": "string", "string": "k"}, 1]]})
    );
}

#[test]
fn path_names_rejects_subscripts() {
    assert_eq!(Value::path(["a", "b"]).path_names(), Some(vec!["a", "b"]));
    let subscripted = Value::Object(Object::Path {
        paths: vec![
            PathFragment::Name("a".to_string()),
            PathFragment::Value(Value::Number(0)),
        ],
    });
    assert_eq!(subscripted.path_names(), None);
    assert_eq!(Value::Number(0).path_names(), None);
}
