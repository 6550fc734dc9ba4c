use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    #[error("Missing field for operator {operator}")]
    MissingField { operator: String },

    #[error("Object of type {actual} is not a valid query expression for {operator}{}", for_field(.field.as_deref()))]
    TypeMismatch { operator: String, actual: String, field: Option<String> },

    #[error("Unknown operand value {operand} for operator {operator} in {field}")]
    InvalidTypeTag { operand: String, operator: String, field: String },

    #[error("Unknown options {invalid} for operator {operator} in field {field}")]
    InvalidOptions { invalid: String, operator: String, field: String },

    #[error("Unknown operator {operator}{}", for_field(.field.as_deref()))]
    UnknownOperator { operator: String, field: Option<String> },

    #[error("Expression nesting exceeds maximum depth of {max}")]
    DepthExceeded { max: usize },

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

fn for_field(field: Option<&str>) -> String {
    field.map(|f| format!(" for field {f}")).unwrap_or_default()
}
