use serde::Serialize;
use std::fmt;

/// One display value in a diff row or summary.
///
/// Equality is normalized: a whole-number `Float` equals the matching `Int`
/// (`5.0 == 5`), and floats compare by total order so a `NaN` cell equals itself.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// No value (absent signal slot, empty comment/unit/...).
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Float cell, stored as `Int` when it holds a whole number.
    pub fn number(value: f64) -> Cell {
        match whole_number(value) {
            Some(int) => Cell::Int(int),
            None => Cell::Float(value),
        }
    }

    /// Text cell, `Empty` when `text` is empty.
    pub fn text_or_empty(text: &str) -> Cell {
        if text.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

// i64 covers [-2^63, 2^63)
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn whole_number(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&value) {
        Some(value as i64)
    } else {
        None
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Empty, Cell::Empty) => true,
            (Cell::Int(a), Cell::Int(b)) => a == b,
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::Float(a), Cell::Float(b)) => a == b || a.total_cmp(b).is_eq(),
            (Cell::Int(i), Cell::Float(f)) | (Cell::Float(f), Cell::Int(i)) => {
                whole_number(*f) == Some(*i)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}
