// Submodules for separation of concerns
mod build;
mod core;
mod fallback;
mod operand;
mod operators;
pub mod validate;

pub use self::core::{Compiler, DEFAULT_MAX_DEPTH};
pub use fallback::FallbackHandler;
pub use operand::{OperandKind, StringOperand};
pub use operators::{Category, OPTIONS_SYMBOL, Operator, OperatorSpec, REGEX_SYMBOL, TYPE_TAGS, TagSet, VALID_OPTIONS};
