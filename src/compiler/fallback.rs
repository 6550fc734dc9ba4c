use bson::Document;

use crate::errors::Result;

/// Handles operators outside the built-in taxonomy.
///
/// Receives the original, unmodified expression node; whatever it returns is handed back to the
/// caller of `compile` as is. Implementations must be reentrant since one compiler may be shared
/// across threads.
pub trait FallbackHandler: Send + Sync {
    fn handle(&self, expression: &Document) -> Result<Document>;
}

impl<F> FallbackHandler for F
where
    F: Fn(&Document) -> Result<Document> + Send + Sync,
{
    fn handle(&self, expression: &Document) -> Result<Document> {
        self(expression)
    }
}
