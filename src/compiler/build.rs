use bson::{Bson, Document};

use super::core::Compiler;
use super::operand::StringOperand;
use super::operators::{OPTIONS_SYMBOL, Operator, REGEX_SYMBOL};
use super::validate::{validate_operand_type, validate_options, validate_type_tag};
use crate::errors::Result;
use crate::node::Node;

impl Compiler {
    pub(crate) fn build_logical(
        &self,
        operator: Operator,
        node: &Node<'_>,
        depth: usize,
    ) -> Result<Document> {
        validate_operand_type(operator, node.expressions, operator.spec().accepts, None)?;
        let children = node.expressions.and_then(Bson::as_array).map_or(&[][..], Vec::as_slice);
        let compiled = children
            .iter()
            .map(|child| self.compile_at(child, depth + 1).map(Bson::Document))
            .collect::<Result<Vec<_>>>()?;
        Ok(single(symbol(operator), compiled))
    }

    /// EQ yields the operand itself; every other comparison wraps it under its symbol.
    pub(crate) fn build_comparison(&self, operator: Operator, node: &Node<'_>) -> Bson {
        let operand = operand(node);
        match operator.spec().symbol {
            Some(sym) => Bson::Document(single(sym, operand)),
            None => operand,
        }
    }

    pub(crate) fn build_range(
        &self,
        operator: Operator,
        node: &Node<'_>,
        field: &str,
    ) -> Result<Document> {
        validate_operand_type(operator, node.value, operator.spec().accepts, Some(field))?;
        Ok(single(symbol(operator), operand(node)))
    }

    pub(crate) fn build_string(
        &self,
        operator: Operator,
        node: &Node<'_>,
        field: &str,
    ) -> Result<Document> {
        validate_operand_type(operator, node.value, operator.spec().accepts, Some(field))?;
        let mut out = Document::new();
        match node.value.and_then(StringOperand::from_bson) {
            Some(StringOperand::Text(text)) => {
                let pattern = operator.compose_pattern(text);
                log::trace!("{operator} on {field}: pattern {pattern}");
                if self.anchors_patterns() {
                    out.insert(REGEX_SYMBOL, pattern);
                } else {
                    out.insert(REGEX_SYMBOL, text);
                }
            }
            Some(StringOperand::Pattern(pattern)) => {
                out.insert(REGEX_SYMBOL, pattern.clone());
            }
            None => {}
        }
        if let Some(options) = node.options {
            out.insert(OPTIONS_SYMBOL, validate_options(operator, options, field)?);
        }
        Ok(out)
    }

    pub(crate) fn build_element(
        &self,
        operator: Operator,
        node: &Node<'_>,
        field: &str,
    ) -> Result<Document> {
        let spec = operator.spec();
        validate_operand_type(operator, node.value, spec.accepts, Some(field))?;
        let operand = operand(node);
        if let Some(tags) = spec.values {
            validate_type_tag(operator, &operand, tags, field)?;
        }
        Ok(single(symbol(operator), operand))
    }

    pub(crate) fn build_array(
        &self,
        operator: Operator,
        node: &Node<'_>,
        field: &str,
        depth: usize,
    ) -> Result<Document> {
        validate_operand_type(operator, node.value, operator.spec().accepts, Some(field))?;
        let body = match (operator, node.value) {
            (Operator::ElemMatch, Some(nested)) => {
                Bson::Document(self.compile_at(nested, depth + 1)?)
            }
            _ => operand(node),
        };
        Ok(single(symbol(operator), body))
    }
}

fn operand(node: &Node<'_>) -> Bson {
    node.value.cloned().unwrap_or(Bson::Null)
}

fn symbol(operator: Operator) -> &'static str {
    operator.spec().symbol.unwrap_or_default()
}

pub(super) fn single(key: &str, value: impl Into<Bson>) -> Document {
    let mut out = Document::new();
    out.insert(key, value);
    out
}
