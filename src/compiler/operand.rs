use bson::Bson;
use std::fmt;

/// Runtime kind of an operand, named after the store's type aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Double,
    String,
    Object,
    Array,
    Binary,
    Undefined,
    ObjectId,
    Bool,
    Date,
    Null,
    Regex,
    DbPointer,
    JavaScript,
    Symbol,
    JavaScriptWithScope,
    Int,
    Timestamp,
    Long,
    Decimal,
    MinKey,
    MaxKey,
    /// The node carried no operand at all.
    Missing,
}

impl OperandKind {
    pub fn of(operand: Option<&Bson>) -> Self {
        operand.map_or(Self::Missing, Self::of_bson)
    }

    pub fn of_bson(value: &Bson) -> Self {
        match value {
            Bson::Double(_) => Self::Double,
            Bson::String(_) => Self::String,
            Bson::Document(_) => Self::Object,
            Bson::Array(_) => Self::Array,
            Bson::Binary(_) => Self::Binary,
            Bson::Undefined => Self::Undefined,
            Bson::ObjectId(_) => Self::ObjectId,
            Bson::Boolean(_) => Self::Bool,
            Bson::DateTime(_) => Self::Date,
            Bson::Null => Self::Null,
            Bson::RegularExpression(_) => Self::Regex,
            Bson::DbPointer(_) => Self::DbPointer,
            Bson::JavaScriptCode(_) => Self::JavaScript,
            Bson::Symbol(_) => Self::Symbol,
            Bson::JavaScriptCodeWithScope(_) => Self::JavaScriptWithScope,
            Bson::Int32(_) => Self::Int,
            Bson::Timestamp(_) => Self::Timestamp,
            Bson::Int64(_) => Self::Long,
            Bson::Decimal128(_) => Self::Decimal,
            Bson::MinKey => Self::MinKey,
            Bson::MaxKey => Self::MaxKey,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::Binary => "binData",
            Self::Undefined => "undefined",
            Self::ObjectId => "objectId",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Null => "null",
            Self::Regex => "regex",
            Self::DbPointer => "dbPointer",
            Self::JavaScript => "javascript",
            Self::Symbol => "symbol",
            Self::JavaScriptWithScope => "javascriptWithScope",
            Self::Int => "int",
            Self::Timestamp => "timestamp",
            Self::Long => "long",
            Self::Decimal => "decimal",
            Self::MinKey => "minKey",
            Self::MaxKey => "maxKey",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operand of a string-matching operator: plain pattern text or a pattern the caller already built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StringOperand<'a> {
    Text(&'a str),
    Pattern(&'a Bson),
}

impl<'a> StringOperand<'a> {
    pub fn from_bson(value: &'a Bson) -> Option<Self> {
        match value {
            Bson::String(s) => Some(Self::Text(s)),
            Bson::RegularExpression(_) => Some(Self::Pattern(value)),
            _ => None,
        }
    }
}
