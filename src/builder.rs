use bson::{Bson, Document};

use crate::compiler::Compiler;
use crate::errors::Result;

pub const AND_SYMBOL: &str = "$and";

/// Wraps one or many top-level expressions in a single `$and` query.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    compiler: Compiler,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_compiler(compiler: Compiler) -> Self {
        Self { compiler }
    }

    pub const fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// Builds `{$and: [...]}` from a single node or an array of nodes.
    ///
    /// # Errors
    /// Returns the first compile error; nothing is returned for the nodes before it.
    pub fn build(&self, expressions: &Bson) -> Result<Document> {
        match expressions {
            Bson::Array(items) => self.build_all(items),
            single => self.build_all(std::slice::from_ref(single)),
        }
    }

    /// # Errors
    /// Returns the first compile error.
    pub fn build_all<'a, I>(&self, expressions: I) -> Result<Document>
    where
        I: IntoIterator<Item = &'a Bson>,
    {
        let compiled = expressions
            .into_iter()
            .map(|e| self.compiler.compile(e).map(Bson::Document))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("built $and query over {} expressions", compiled.len());
        let mut out = Document::new();
        out.insert(AND_SYMBOL, compiled);
        Ok(out)
    }

    /// # Errors
    /// As [`QueryBuilder::build`], plus `Json` for input not representable as BSON.
    pub fn build_json(&self, expressions: &serde_json::Value) -> Result<Document> {
        self.build(&crate::utils::json::json_value_to_bson(expressions)?)
    }

    /// # Errors
    /// As [`QueryBuilder::build`], plus `Json` for malformed JSON.
    pub fn build_str(&self, json: &str) -> Result<Document> {
        self.build(&crate::utils::json::parse_json_to_bson(json)?)
    }
}
