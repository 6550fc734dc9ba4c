use jsonquery::errors::CompileError;

#[test]
fn test_invalid_expression_display() {
    let err = CompileError::InvalidExpression("Query expression must have 'operator'".to_string());
    assert_eq!(format!("{err}"), "Invalid expression: Query expression must have 'operator'");
}

#[test]
fn test_missing_field_display() {
    let err = CompileError::MissingField { operator: "SIZE".to_string() };
    assert_eq!(format!("{err}"), "Missing field for operator SIZE");
}

#[test]
fn test_type_mismatch_display_with_and_without_field() {
    let err = CompileError::TypeMismatch {
        operator: "HAS".to_string(),
        actual: "string".to_string(),
        field: Some("tags".to_string()),
    };
    assert_eq!(format!("{err}"), "Object of type string is not a valid query expression for HAS for field tags");
    let err = CompileError::TypeMismatch {
        operator: "AND".to_string(),
        actual: "int".to_string(),
        field: None,
    };
    assert_eq!(format!("{err}"), "Object of type int is not a valid query expression for AND");
}

#[test]
fn test_invalid_type_tag_display() {
    let err = CompileError::InvalidTypeTag {
        operand: "42".to_string(),
        operator: "TYPE".to_string(),
        field: "x".to_string(),
    };
    assert_eq!(format!("{err}"), "Unknown operand value 42 for operator TYPE in x");
}

#[test]
fn test_unknown_operator_display_without_field() {
    let err = CompileError::UnknownOperator { operator: "BOGUS".to_string(), field: None };
    assert_eq!(format!("{err}"), "Unknown operator BOGUS");
}

#[test]
fn test_depth_and_config_display() {
    assert_eq!(
        format!("{}", CompileError::DepthExceeded { max: 4 }),
        "Expression nesting exceeds maximum depth of 4"
    );
    assert_eq!(
        format!("{}", CompileError::Config("max_depth must be at least 1".into())),
        "Config error: max_depth must be at least 1"
    );
}

#[test]
fn test_json_error_converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: CompileError = json_err.into();
    assert!(format!("{err}").starts_with("Serde JSON: "));
}
