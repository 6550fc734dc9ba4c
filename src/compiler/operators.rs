use bson::Bson;
use std::fmt;
use std::str::FromStr;

use super::operand::OperandKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Logical,
    Comparison,
    Range,
    String,
    Element,
    Array,
}

/// Every operator understood by the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
    Contains,
    Lacks,
    Starts,
    Ends,
    Regex,
    In,
    Nin,
    Exists,
    Type,
    Size,
    ElemMatch,
    Has,
    And,
    Or,
    Not,
    Nor,
}

/// Closed set of `$type` tags: numeric codes plus their string aliases.
#[derive(Debug)]
pub struct TagSet {
    pub codes: &'static [i64],
    pub aliases: &'static [&'static str],
}

impl TagSet {
    pub fn contains(&self, operand: &Bson) -> bool {
        match operand {
            Bson::Int32(i) => self.codes.contains(&i64::from(*i)),
            Bson::Int64(i) => self.codes.contains(i),
            Bson::String(s) => self.aliases.contains(&s.as_str()),
            _ => false,
        }
    }
}

/// Static description of how one operator compiles.
#[derive(Debug)]
pub struct OperatorSpec {
    /// Target symbol; `None` means the operand is emitted bare (implicit equality).
    pub symbol: Option<&'static str>,
    /// Accepted operand kinds. Empty means unchecked.
    pub accepts: &'static [OperandKind],
    pub values: Option<&'static TagSet>,
    pub prefix: Option<&'static str>,
    pub suffix: Option<&'static str>,
}

impl OperatorSpec {
    const fn new(symbol: &'static str, accepts: &'static [OperandKind]) -> Self {
        Self { symbol: Some(symbol), accepts, values: None, prefix: None, suffix: None }
    }

    const fn unchecked(symbol: Option<&'static str>) -> Self {
        Self { symbol, accepts: &[], values: None, prefix: None, suffix: None }
    }

    const fn pattern(prefix: Option<&'static str>, suffix: Option<&'static str>) -> Self {
        Self { symbol: Some(REGEX_SYMBOL), accepts: TEXT_OR_PATTERN, values: None, prefix, suffix }
    }
}

pub const REGEX_SYMBOL: &str = "$regex";
pub const OPTIONS_SYMBOL: &str = "$options";
pub const VALID_OPTIONS: &[char] = &['i', 'g', 's', 'x', 'm'];

const SEQUENCE: &[OperandKind] = &[OperandKind::Array];
const TEXT_OR_PATTERN: &[OperandKind] = &[OperandKind::String, OperandKind::Regex];
const BOOLEAN: &[OperandKind] = &[OperandKind::Bool];
const INTEGER: &[OperandKind] = &[OperandKind::Int, OperandKind::Long];
const INTEGER_OR_TEXT: &[OperandKind] = &[OperandKind::Int, OperandKind::Long, OperandKind::String];
const NESTED: &[OperandKind] = &[OperandKind::Object];

pub static TYPE_TAGS: TagSet = TagSet {
    codes: &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, -1, 127],
    aliases: &[
        "double",
        "string",
        "object",
        "array",
        "binData",
        "undefined",
        "objectId",
        "bool",
        "long",
        "date",
        "null",
        "regex",
        "dbPointer",
        "javascript",
        "symbol",
        "javascriptWithScope",
        "int",
        "timestamp",
        "decimal",
        "minKey",
        "maxKey",
        "number",
    ],
};

// Logical
static AND: OperatorSpec = OperatorSpec::new("$and", SEQUENCE);
static OR: OperatorSpec = OperatorSpec::new("$or", SEQUENCE);
static NOT: OperatorSpec = OperatorSpec::new("$not", SEQUENCE);
static NOR: OperatorSpec = OperatorSpec::new("$nor", SEQUENCE);

// Comparison
static EQ: OperatorSpec = OperatorSpec::unchecked(None);
static NEQ: OperatorSpec = OperatorSpec::unchecked(Some("$ne"));
static GT: OperatorSpec = OperatorSpec::unchecked(Some("$gt"));
static LT: OperatorSpec = OperatorSpec::unchecked(Some("$lt"));
static GTE: OperatorSpec = OperatorSpec::unchecked(Some("$gte"));
static LTE: OperatorSpec = OperatorSpec::unchecked(Some("$lte"));

// Range
static IN: OperatorSpec = OperatorSpec::new("$in", SEQUENCE);
static NIN: OperatorSpec = OperatorSpec::new("$nin", SEQUENCE);

// String
static CONTAINS: OperatorSpec = OperatorSpec::pattern(None, None);
static LACKS: OperatorSpec = OperatorSpec::pattern(Some("^((?!"), Some(").)*$"));
static STARTS: OperatorSpec = OperatorSpec::pattern(Some("^"), None);
static ENDS: OperatorSpec = OperatorSpec::pattern(None, Some("$"));
static REGEX: OperatorSpec = OperatorSpec::pattern(None, None);

// Element
static EXISTS: OperatorSpec = OperatorSpec::new("$exists", BOOLEAN);
static TYPE: OperatorSpec = OperatorSpec {
    symbol: Some("$type"),
    accepts: INTEGER_OR_TEXT,
    values: Some(&TYPE_TAGS),
    prefix: None,
    suffix: None,
};

// Array
static SIZE: OperatorSpec = OperatorSpec::new("$size", INTEGER);
static ELEM_MATCH: OperatorSpec = OperatorSpec::new("$elemMatch", NESTED);
static HAS: OperatorSpec = OperatorSpec::new("$all", SEQUENCE);

impl Operator {
    pub const ALL: [Self; 22] = [
        Self::Eq,
        Self::Neq,
        Self::Gt,
        Self::Lt,
        Self::Gte,
        Self::Lte,
        Self::Contains,
        Self::Lacks,
        Self::Starts,
        Self::Ends,
        Self::Regex,
        Self::In,
        Self::Nin,
        Self::Exists,
        Self::Type,
        Self::Size,
        Self::ElemMatch,
        Self::Has,
        Self::And,
        Self::Or,
        Self::Not,
        Self::Nor,
    ];

    /// DSL spelling of the operator.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Neq => "NEQ",
            Self::Gt => "GT",
            Self::Lt => "LT",
            Self::Gte => "GTE",
            Self::Lte => "LTE",
            Self::Contains => "CONTAINS",
            Self::Lacks => "LACKS",
            Self::Starts => "STARTS",
            Self::Ends => "ENDS",
            Self::Regex => "REGEX",
            Self::In => "IN",
            Self::Nin => "NIN",
            Self::Exists => "EXISTS",
            Self::Type => "TYPE",
            Self::Size => "SIZE",
            Self::ElemMatch => "ELEM_MATCH",
            Self::Has => "HAS",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Nor => "NOR",
        }
    }

    pub const fn category(self) -> Category {
        match self {
            Self::And | Self::Or | Self::Not | Self::Nor => Category::Logical,
            Self::Eq | Self::Neq | Self::Gt | Self::Lt | Self::Gte | Self::Lte => {
                Category::Comparison
            }
            Self::In | Self::Nin => Category::Range,
            Self::Contains | Self::Lacks | Self::Starts | Self::Ends | Self::Regex => {
                Category::String
            }
            Self::Exists | Self::Type => Category::Element,
            Self::Size | Self::ElemMatch | Self::Has => Category::Array,
        }
    }

    pub fn spec(self) -> &'static OperatorSpec {
        match self {
            Self::Eq => &EQ,
            Self::Neq => &NEQ,
            Self::Gt => &GT,
            Self::Lt => &LT,
            Self::Gte => &GTE,
            Self::Lte => &LTE,
            Self::Contains => &CONTAINS,
            Self::Lacks => &LACKS,
            Self::Starts => &STARTS,
            Self::Ends => &ENDS,
            Self::Regex => &REGEX,
            Self::In => &IN,
            Self::Nin => &NIN,
            Self::Exists => &EXISTS,
            Self::Type => &TYPE,
            Self::Size => &SIZE,
            Self::ElemMatch => &ELEM_MATCH,
            Self::Has => &HAS,
            Self::And => &AND,
            Self::Or => &OR,
            Self::Not => &NOT,
            Self::Nor => &NOR,
        }
    }

    /// Applies the operator's prefix and suffix to plain pattern text.
    pub fn compose_pattern(self, text: &str) -> String {
        let spec = self.spec();
        let mut out = String::with_capacity(
            text.len() + spec.prefix.map_or(0, str::len) + spec.suffix.map_or(0, str::len),
        );
        if let Some(p) = spec.prefix {
            out.push_str(p);
        }
        out.push_str(text);
        if let Some(s) = spec.suffix {
            out.push_str(s);
        }
        out
    }
}

impl FromStr for Operator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|op| op.name() == s).ok_or(())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
