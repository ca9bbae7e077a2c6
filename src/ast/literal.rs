use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// A constant compared against in filter predicates. Strings are quoted
/// when rendered, numbers are emitted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{s}"),
            Literal::Integer(i) => write!(f, "{i}"),
            // `{:?}` keeps the trailing `.0` on whole floats
            Literal::Float(n) => write!(f, "{n:?}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Literal::Integer(i)
    }
}

impl From<i32> for Literal {
    fn from(i: i32) -> Self {
        Literal::Integer(i as i64)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Float(n)
    }
}
