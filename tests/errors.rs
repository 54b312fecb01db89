use treeguard::parser::{parse_path, ErrorKind};
use treeguard::rules::StringRule;
use treeguard::{validate_json_str, Options, Schema, ValidateError};

#[test]
fn error_traits() {
    let err = parse_path("").unwrap_err();

    // It would be unfriendly to not support Send + Sync + Unpin.
    // Error types should also support Error, Display, and Debug.
    fn has_traits1<T: Sized + Send + Sync + Unpin>(_: &T) {}
    fn has_traits2<T: std::error::Error + std::fmt::Display + std::fmt::Debug>(_: &T) {}

    has_traits1(&err);
    has_traits2(&err);

    assert_eq!(format!("{}", err), "EmptyPath()");
    assert_eq!(
        format!("{:?}", err),
        r#"ParseError { kind: EmptyPath, ctx: "" }"#
    );

    let err = parse_path("a..b").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unparseable);

    let err: ValidateError = parse_path("").unwrap_err().into();
    assert_eq!(format!("{}", err), "EmptyPath()");
    assert!(err.bag().is_none());
}

#[test]
fn validate_error_traits() {
    let schema = Schema::new().field("name", StringRule::new().required());
    let err = validate_json_str(&schema, "{}", Options::default()).unwrap_err();

    fn has_traits1<T: Sized + Send + Sync + Unpin>(_: &T) {}
    fn has_traits2<T: std::error::Error + std::fmt::Display + std::fmt::Debug>(_: &T) {}

    has_traits1(&err);
    has_traits2(&err);

    assert_eq!(format!("{}", err), "validation failed (1 field(s))");
    assert_eq!(err.bag().unwrap().to_string(), "name: name is required");

    let err = validate_json_str(&schema, "{ not json", Options::default()).unwrap_err();
    assert!(err.bag().is_none());
    match err {
        ValidateError::ValueError(_) => {}
        other => panic!("unexpected {:?}", other),
    }
}
