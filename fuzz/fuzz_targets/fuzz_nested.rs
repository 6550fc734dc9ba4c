#![no_main]
use arbitrary::Arbitrary;
use bson::{Bson, Document};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Leaf {
    Int(i64),
    Text(String),
    Flag(bool),
    List(Vec<i32>),
}

#[derive(Debug, Arbitrary)]
enum Expr {
    Logical { operator: u8, children: Vec<Expr> },
    Field { operator: u8, field: String, value: Option<Leaf>, options: Option<String> },
    ElemMatch { field: String, inner: Box<Expr> },
}

const NAMES: &[&str] = &[
    "EQ", "NEQ", "GT", "LT", "GTE", "LTE", "CONTAINS", "LACKS", "STARTS", "ENDS", "REGEX", "IN",
    "NIN", "EXISTS", "TYPE", "SIZE", "HAS", "UNKNOWN",
];
const LOGICAL: &[&str] = &["AND", "OR", "NOT", "NOR"];

fn leaf(l: Leaf) -> Bson {
    match l {
        Leaf::Int(i) => Bson::Int64(i),
        Leaf::Text(s) => Bson::String(s),
        Leaf::Flag(b) => Bson::Boolean(b),
        Leaf::List(v) => Bson::Array(v.into_iter().map(Bson::Int32).collect()),
    }
}

fn to_bson(e: Expr) -> Bson {
    let mut d = Document::new();
    match e {
        Expr::Logical { operator, children } => {
            d.insert("operator", LOGICAL[usize::from(operator) % LOGICAL.len()]);
            d.insert("expressions", children.into_iter().map(to_bson).collect::<Vec<_>>());
        }
        Expr::Field { operator, field, value, options } => {
            d.insert("operator", NAMES[usize::from(operator) % NAMES.len()]);
            d.insert("field", field);
            if let Some(v) = value {
                d.insert("value", leaf(v));
            }
            if let Some(o) = options {
                d.insert("options", o);
            }
        }
        Expr::ElemMatch { field, inner } => {
            d.insert("operator", "ELEM_MATCH");
            d.insert("field", field);
            d.insert("value", to_bson(*inner));
        }
    }
    Bson::Document(d)
}

fuzz_target!(|expr: Expr| {
    let compiler = jsonquery::Compiler::new().max_depth(16);
    let _ = compiler.compile(&to_bson(expr));
});
