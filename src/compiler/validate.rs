use bson::{Bson, Document};

use super::operand::OperandKind;
use super::operators::{Operator, TagSet, VALID_OPTIONS};
use crate::errors::{CompileError, Result};
use crate::node::OPERATOR_KEY;

/// Ensures `expr` is a mapping with an `operator` key and returns it as a document.
///
/// # Errors
/// Returns `InvalidExpression` otherwise.
pub fn validate_expression(expr: &Bson) -> Result<&Document> {
    let Bson::Document(doc) = expr else {
        return Err(CompileError::InvalidExpression(format!(
            "Object of type {} is not a valid query expression",
            OperandKind::of_bson(expr)
        )));
    };
    if !doc.contains_key(OPERATOR_KEY) {
        return Err(CompileError::InvalidExpression(
            "Query expression must have 'operator'".into(),
        ));
    }
    Ok(doc)
}

/// Checks the operand's runtime kind against `accepted`. An empty `accepted` list admits anything.
///
/// # Errors
/// Returns `TypeMismatch` naming the operator, the actual kind and the field when known.
pub fn validate_operand_type(
    operator: Operator,
    operand: Option<&Bson>,
    accepted: &[OperandKind],
    field: Option<&str>,
) -> Result<OperandKind> {
    let kind = OperandKind::of(operand);
    if accepted.is_empty() || accepted.contains(&kind) {
        return Ok(kind);
    }
    Err(CompileError::TypeMismatch {
        operator: operator.name().to_string(),
        actual: kind.name().to_string(),
        field: field.map(str::to_string),
    })
}

/// # Errors
/// Returns `MissingField` when `field` is absent or empty.
pub fn validate_field<'a>(operator: &str, field: Option<&'a str>) -> Result<&'a str> {
    match field {
        Some(f) if !f.is_empty() => Ok(f),
        _ => Err(CompileError::MissingField { operator: operator.to_string() }),
    }
}

/// # Errors
/// Returns `InvalidTypeTag` when `operand` is outside `tags`.
pub fn validate_type_tag(
    operator: Operator,
    operand: &Bson,
    tags: &TagSet,
    field: &str,
) -> Result<()> {
    if tags.contains(operand) {
        return Ok(());
    }
    Err(CompileError::InvalidTypeTag {
        operand: operand.to_string(),
        operator: operator.name().to_string(),
        field: field.to_string(),
    })
}

/// Validates regex options and returns them as text.
///
/// # Errors
/// Returns `InvalidExpression` for a non-string value and `InvalidOptions` listing every
/// character outside `i g s x m`.
pub fn validate_options<'a>(operator: Operator, options: &'a Bson, field: &str) -> Result<&'a str> {
    let Bson::String(text) = options else {
        return Err(CompileError::InvalidExpression(format!(
            "'options' for {operator} in field {field} must be a string, got {}",
            OperandKind::of_bson(options)
        )));
    };
    let mut invalid = String::new();
    for c in text.chars() {
        if !VALID_OPTIONS.contains(&c) && !invalid.contains(c) {
            invalid.push(c);
        }
    }
    if invalid.is_empty() {
        Ok(text)
    } else {
        Err(CompileError::InvalidOptions {
            invalid,
            operator: operator.name().to_string(),
            field: field.to_string(),
        })
    }
}
