//! Tests for route source loading and compilation: defaults, the closed
//! method/type/source sets, user patterns, and the validity rule.

use switchboard::routes::{
    compile_parameter, compile_route, load_routes_str, HttpMethod, ParamDoc, ParameterSource,
    ParameterType, SourceSet,
};
use switchboard::ConfigError;

fn doc_from_yaml(yaml: &str) -> switchboard::routes::RouteDoc {
    let docs = load_routes_str(yaml).expect("route yaml parses");
    assert_eq!(docs.len(), 1, "only testing single route maps");
    docs.into_values().next().expect("one route doc")
}

#[test]
fn test_simplest_route_defaults_to_get() {
    let route = compile_route(&doc_from_yaml("/:\n  callbacks:\n    - single\n"))
        .expect("minimal route compiles");
    assert_eq!(route.methods, vec![HttpMethod::Get]);
    assert_eq!(route.callbacks, vec!["single"]);
    assert!(route.parameters.is_empty());
}

#[test]
fn test_empty_callbacks_rejected() {
    let err = compile_route(&doc_from_yaml("/:\n  callbacks: []\n"))
        .expect_err("empty callback chain rejected");
    assert!(matches!(err, ConfigError::NoCallbacks));
}

#[test]
fn test_unrecognized_method_rejected() {
    let yaml = "/:\n  methods:\n    - blarg\n  callbacks:\n    - foo\n";
    let err = compile_route(&doc_from_yaml(yaml)).expect_err("unknown method rejected");
    assert!(matches!(err, ConfigError::UnknownMethod(m) if m == "blarg"));
}

#[test]
fn test_declared_methods_preserved_in_order() {
    let yaml = "/:\n  methods:\n    - get\n    - post\n    - put\n  callbacks:\n    - foo\n";
    let route = compile_route(&doc_from_yaml(yaml)).expect("methods compile");
    assert_eq!(
        route.methods,
        vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Put]
    );
}

// A parameter with a null body must equal one with every field set to its
// documented default.
#[test]
fn test_null_param_body_equals_explicit_defaults() {
    let yaml = "\
/bazz/biff:
  params:
    bar:
  callbacks:
    - yolo
";
    let route = compile_route(&doc_from_yaml(yaml)).expect("null param compiles");
    let implicit = &route.parameters["bar"];

    let explicit = compile_parameter(&ParamDoc {
        ty: Some("string".to_string()),
        regex: None,
        required: Some(true),
        source: Some("query".to_string()),
    })
    .expect("explicit defaults compile");

    assert_eq!(implicit.ty, explicit.ty);
    assert_eq!(implicit.required, explicit.required);
    assert_eq!(implicit.sources, explicit.sources);
    assert!(implicit.pattern.is_none() && explicit.pattern.is_none());
}

#[test]
fn test_route_has_exactly_declared_parameters() {
    let yaml = "\
/things:
  params:
    foo:
      type: number
      regex: '\\d{1,3}'
    bar:
      type: string
      required: false
    baz:
      type: boolean
  callbacks:
    - handle
";
    let route = compile_route(&doc_from_yaml(yaml)).expect("route compiles");
    assert_eq!(route.parameters.len(), 3);
    for name in ["foo", "bar", "baz"] {
        assert!(route.parameters.contains_key(name), "missing '{name}'");
    }
    assert_eq!(route.parameters["foo"].ty, ParameterType::Number);
    assert!(!route.parameters["bar"].required);
    assert_eq!(route.parameters["baz"].ty, ParameterType::Boolean);
}

#[test]
fn test_unrecognized_parameter_type_rejected() {
    let err = compile_parameter(&ParamDoc {
        ty: Some("blarg".to_string()),
        ..ParamDoc::default()
    })
    .expect_err("unknown type rejected");
    assert!(matches!(err, ConfigError::UnknownParameterType(t) if t == "blarg"));
}

#[test]
fn test_unrecognized_parameter_source_rejected() {
    let err = compile_parameter(&ParamDoc {
        source: Some("url|body".to_string()),
        ..ParamDoc::default()
    })
    .expect_err("unknown source token rejected");
    assert!(matches!(err, ConfigError::UnknownParameterSource(s) if s == "body"));
}

#[test]
fn test_invalid_user_pattern_rejected() {
    let err = compile_parameter(&ParamDoc {
        regex: Some("[unclosed".to_string()),
        ..ParamDoc::default()
    })
    .expect_err("bad regex rejected");
    assert!(matches!(err, ConfigError::InvalidPattern { .. }));
}

#[test]
fn test_source_list_is_or_combined() {
    let sources = SourceSet::parse("url|query").expect("source list parses");
    assert!(sources.contains(ParameterSource::Url));
    assert!(sources.contains(ParameterSource::Query));
    assert!(!sources.contains(ParameterSource::Form));
}

#[test]
fn test_number_validation() {
    let param = compile_parameter(&ParamDoc {
        ty: Some("number".to_string()),
        ..ParamDoc::default()
    })
    .expect("number param compiles");
    assert!(param.is_valid("123"));
    assert!(param.is_valid("-123"));
    assert!(param.is_valid("12.5"));
    assert!(param.is_valid("-123.42"));
    assert!(!param.is_valid("abc"));
}

#[test]
fn test_boolean_validation_is_case_insensitive() {
    let param = compile_parameter(&ParamDoc {
        ty: Some("boolean".to_string()),
        ..ParamDoc::default()
    })
    .expect("boolean param compiles");
    assert!(param.is_valid("true"));
    assert!(param.is_valid("false"));
    assert!(param.is_valid("tRUe"));
    assert!(!param.is_valid("8769"));
}

#[test]
fn test_user_pattern_narrows_default() {
    let param = compile_parameter(&ParamDoc {
        ty: Some("string".to_string()),
        regex: Some(r"[\D]+".to_string()),
        ..ParamDoc::default()
    })
    .expect("narrowed param compiles");
    assert!(param.is_valid("foo"));
    assert!(!param.is_valid("8769"));
}

#[test]
fn test_empty_value_only_valid_when_optional() {
    let optional = compile_parameter(&ParamDoc {
        required: Some(false),
        ..ParamDoc::default()
    })
    .expect("optional param compiles");
    assert!(optional.is_valid(""));

    let required = compile_parameter(&ParamDoc::default()).expect("required param compiles");
    assert!(!required.is_valid(""));
}
