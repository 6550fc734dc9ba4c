pub mod builder;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod logger;
pub mod node;
pub mod utils;

pub use builder::QueryBuilder;
pub use compiler::{Compiler, FallbackHandler, Operator};
pub use config::CompilerConfig;
pub use errors::{CompileError, Result};

use bson::{Bson, Document};

/// Compiles one expression node with a default compiler.
///
/// # Errors
/// See [`Compiler::compile`].
pub fn compile(expr: &Bson) -> Result<Document> {
    Compiler::default().compile(expr)
}

/// Compiles a JSON expression node with a default compiler.
///
/// # Errors
/// See [`Compiler::compile_str`].
pub fn compile_str(json: &str) -> Result<Document> {
    Compiler::default().compile_str(json)
}

/// Initializes the logging system.
///
/// This function should be called before any other operations if logging output is wanted.
/// It sets up the logger from `log4rs.yaml` in the working directory.
pub fn init() -> std::result::Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
