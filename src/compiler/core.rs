use bson::{Bson, Document};
use std::fmt;
use std::sync::Arc;

use super::build::single;
use super::fallback::FallbackHandler;
use super::operators::{Category, Operator};
use super::validate::validate_field;
use crate::config::CompilerConfig;
use crate::errors::{CompileError, Result};
use crate::node::Node;

/// Default bound on expression nesting; the root node sits at depth 1.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Compiles expression nodes into filter documents.
///
/// A compiler holds no per-call state and can be shared across threads. Cloning is cheap.
#[derive(Clone)]
pub struct Compiler {
    fallback: Option<Arc<dyn FallbackHandler>>,
    max_depth: usize,
    anchor_patterns: bool,
}

impl Default for Compiler {
    fn default() -> Self {
        Self { fallback: None, max_depth: DEFAULT_MAX_DEPTH, anchor_patterns: false }
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("fallback", &self.fallback.is_some())
            .field("max_depth", &self.max_depth)
            .field("anchor_patterns", &self.anchor_patterns)
            .finish()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compiler that hands unrecognized operators to `handler`.
    pub fn with_fallback<H: FallbackHandler + 'static>(handler: H) -> Self {
        Self::new().fallback(handler)
    }

    /// # Errors
    /// Returns `Config` if the configuration is out of range.
    pub fn from_config(config: &CompilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new().max_depth(config.max_depth).anchor_patterns(config.anchor_patterns))
    }

    #[must_use]
    pub fn fallback<H: FallbackHandler + 'static>(mut self, handler: H) -> Self {
        self.fallback = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Emit decorated patterns (`^x`, `x$`, ...) for string operators instead of the raw operand.
    #[must_use]
    pub fn anchor_patterns(mut self, enabled: bool) -> Self {
        self.anchor_patterns = enabled;
        self
    }

    pub const fn depth_limit(&self) -> usize {
        self.max_depth
    }

    pub const fn anchors_patterns(&self) -> bool {
        self.anchor_patterns
    }

    pub const fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Compiles one expression node.
    ///
    /// # Errors
    /// Returns the first validation failure found while walking the tree.
    pub fn compile(&self, expr: &Bson) -> Result<Document> {
        self.compile_at(expr, 1)
    }

    /// # Errors
    /// As [`Compiler::compile`], plus `Json` when `expr` cannot be represented as BSON.
    pub fn compile_json(&self, expr: &serde_json::Value) -> Result<Document> {
        let expr = crate::utils::json::json_value_to_bson(expr)?;
        self.compile(&expr)
    }

    /// # Errors
    /// As [`Compiler::compile`], plus `Json` when `json` is not valid JSON.
    pub fn compile_str(&self, json: &str) -> Result<Document> {
        let expr = crate::utils::json::parse_json_to_bson(json)?;
        self.compile(&expr)
    }

    pub(crate) fn compile_at(&self, expr: &Bson, depth: usize) -> Result<Document> {
        if depth > self.max_depth {
            log::debug!("expression depth {depth} exceeds limit {}", self.max_depth);
            return Err(CompileError::DepthExceeded { max: self.max_depth });
        }
        let node = Node::parse(expr)?;
        log::trace!("compile operator={} field={:?} depth={depth}", node.operator, node.field);

        let operator = node.operator.parse::<Operator>().ok();
        match operator.map(|op| (op, op.category())) {
            Some((op, Category::Logical)) => self.build_logical(op, &node, depth),
            Some((op, Category::Comparison)) => {
                Ok(single(node.field.unwrap_or_default(), self.build_comparison(op, &node)))
            }
            known => {
                let field = validate_field(node.operator, node.field)?;
                let body = match known {
                    Some((op, Category::Range)) => self.build_range(op, &node, field)?,
                    Some((op, Category::String)) => self.build_string(op, &node, field)?,
                    Some((op, Category::Element)) => self.build_element(op, &node, field)?,
                    Some((op, Category::Array)) => self.build_array(op, &node, field, depth)?,
                    _ => return self.fall_back(&node, field),
                };
                Ok(single(field, body))
            }
        }
    }

    fn fall_back(&self, node: &Node<'_>, field: &str) -> Result<Document> {
        match &self.fallback {
            Some(handler) => {
                log::debug!("fallback handler for operator {} field {field}", node.operator);
                handler.handle(node.raw)
            }
            None => Err(CompileError::UnknownOperator {
                operator: node.operator.to_string(),
                field: Some(field.to_string()),
            }),
        }
    }
}
