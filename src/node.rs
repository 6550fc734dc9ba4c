use bson::{Bson, Document};

use crate::compiler::OperandKind;
use crate::compiler::validate::validate_expression;
use crate::errors::{CompileError, Result};

pub const OPERATOR_KEY: &str = "operator";
pub const FIELD_KEY: &str = "field";
pub const VALUE_KEY: &str = "value";
pub const EXPRESSIONS_KEY: &str = "expressions";
pub const OPTIONS_KEY: &str = "options";

/// Borrowed view over one expression node.
///
/// A `null` `field` or `options` is treated the same as an absent one. A `null` `value` or
/// `expressions` is kept so type checks report it as `null`.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    pub raw: &'a Document,
    pub operator: &'a str,
    pub field: Option<&'a str>,
    pub value: Option<&'a Bson>,
    pub expressions: Option<&'a Bson>,
    pub options: Option<&'a Bson>,
}

impl<'a> Node<'a> {
    /// # Errors
    /// Returns `InvalidExpression` if `expr` is not a mapping, has no string `operator`,
    /// or carries a non-string `field`.
    pub fn parse(expr: &'a Bson) -> Result<Self> {
        let raw = validate_expression(expr)?;
        let operator = match raw.get(OPERATOR_KEY) {
            Some(Bson::String(s)) => s.as_str(),
            other => {
                return Err(CompileError::InvalidExpression(format!(
                    "'{OPERATOR_KEY}' must be a string, got {}",
                    OperandKind::of(other)
                )));
            }
        };
        let field = match present(raw, FIELD_KEY) {
            Some(Bson::String(s)) => Some(s.as_str()),
            Some(other) => {
                return Err(CompileError::InvalidExpression(format!(
                    "'{FIELD_KEY}' must be a string, got {}",
                    OperandKind::of_bson(other)
                )));
            }
            None => None,
        };
        Ok(Self {
            raw,
            operator,
            field,
            value: raw.get(VALUE_KEY),
            expressions: raw.get(EXPRESSIONS_KEY),
            options: present(raw, OPTIONS_KEY),
        })
    }
}

fn present<'a>(doc: &'a Document, key: &str) -> Option<&'a Bson> {
    doc.get(key).filter(|v| !matches!(v, Bson::Null))
}
