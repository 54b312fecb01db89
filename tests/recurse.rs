use ntest::timeout;
use serde_json::json;
use std::convert::TryFrom;
use treeguard::rules::{ObjectRule, StringRule};
use treeguard::value::Value;
use treeguard::{check, validate_json, Options, Schema};

// Nest `leaf` inside `depth` levels of objects, each under the key "a".
fn nested_schema(depth: usize) -> Schema {
    let mut schema = Schema::new().field("leaf", StringRule::new().required().min(3));
    for _ in 0..depth {
        schema = Schema::new().field("a", ObjectRule::new().required().items(schema));
    }
    schema
}

fn nested_data(depth: usize, leaf: &str) -> serde_json::Value {
    let mut data = json!({ "leaf": leaf });
    for _ in 0..depth {
        data = json!({ "a": data });
    }
    data
}

#[test]
#[timeout(5000)] // 5 seconds
fn test_recursion() {
    let schema = nested_schema(22);
    validate_json(&schema, &nested_data(22, "deep"), Options::default()).unwrap();

    let data = Value::try_from(nested_data(22, "x")).unwrap();
    let bag = check(&data, &schema, Options::default());
    let path = format!("{}leaf", "a.".repeat(22));
    assert_eq!(
        bag.get(&path).unwrap(),
        ["leaf must be minimum of 3 character(s)"]
    );

    // A missing level stops the descent there.
    let data = Value::try_from(nested_data(3, "deep")).unwrap();
    let bag = check(&data, &schema, Options::default());
    assert_eq!(bag.len(), 1);
    assert_eq!(bag.get("a.a.a.a").unwrap(), ["a is required"]);
}
