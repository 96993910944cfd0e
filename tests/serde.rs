//! Serialization of templates, values and configuration.

#![cfg(feature = "serde")]

use endpoint_router::{Modifier, PathTemplate, RouterConfig, TemplateFragment, Value};

#[test]
fn template_serializes_as_string() {
    let template = PathTemplate::parse("/files/{owner}/{*path}").unwrap();
    let json = serde_json::to_string(&template).unwrap();
    assert_eq!(json, "\"/files/{owner}/{*path}\"");

    let recovered: PathTemplate = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, template);
}

#[test]
fn malformed_template_fails_to_deserialize() {
    let result: Result<PathTemplate, _> = serde_json::from_str("\"/a/{b\"");
    assert!(result.is_err());
}

#[test]
fn fragment_roundtrip() {
    let fragment = TemplateFragment::Placeholder {
        name: "path".to_string(),
        modifier: Modifier::Rest,
    };
    let json = serde_json::to_string(&fragment).unwrap();
    let recovered: TemplateFragment = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, fragment);
}

#[test]
fn value_roundtrip() {
    let value = Value::variant(
        2,
        vec![
            Value::from("x"),
            Value::Seq(vec![Value::UInt(1), Value::Int(-1)]),
            Value::PageModel,
        ],
    );
    let json = serde_json::to_string(&value).unwrap();
    let recovered: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, value);
}

#[test]
fn config_roundtrip() {
    let config = RouterConfig::new()
        .with_base_path("/app")
        .with_ignore_trailing_slash(true);
    let json = serde_json::to_string(&config).unwrap();
    let recovered: RouterConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, config);
}
