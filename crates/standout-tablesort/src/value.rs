//! Cell value coercion and the single-value inclusion test.
//!
//! Cells arrive as text. Under [`ColumnType::Infer`] each side of a
//! comparison is independently parsed as a number when it looks like one;
//! under [`ColumnType::Text`] everything compares as strings.

use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::op::Operator;

static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid integer pattern"));
static FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]*)?([eE][0-9]*)?$").expect("valid float pattern"));

/// How a column's cells are interpreted for comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Attempt a numeric interpretation, falling back to text.
    #[default]
    Infer,
    /// Always compare as strings.
    Text,
}

/// A cell or compare value after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Matched the integer pattern.
    Integer(i64),
    /// Matched the decimal/exponent pattern.
    Float(f64),
    /// Anything else, or any value in a text column.
    Text(String),
}

impl CellValue {
    /// Coerces raw text according to the column type.
    ///
    /// Text values are uppercased when `ignore_case` is set. Numbers are left
    /// alone since case has no meaning for them.
    pub fn coerce(raw: &str, column_type: ColumnType, ignore_case: bool) -> CellValue {
        if column_type == ColumnType::Infer {
            if let Some(number) = parse_pattern_number(raw) {
                return number;
            }
        }
        if ignore_case {
            CellValue::Text(raw.to_uppercase())
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    /// Returns `true` for `Integer` and `Float` values.
    pub fn is_number(&self) -> bool {
        !matches!(self, CellValue::Text(_))
    }

    /// Compares two coerced values.
    ///
    /// Numbers compare numerically and strings lexicographically. A number
    /// and a string never compare, so they match no relational operator.
    pub fn compare(&self, other: &CellValue) -> Option<Ordering> {
        match (self, other) {
            (CellValue::Integer(a), CellValue::Integer(b)) => Some(a.cmp(b)),
            (CellValue::Text(a), CellValue::Text(b)) => Some(a.cmp(b)),
            (CellValue::Text(_), _) | (_, CellValue::Text(_)) => None,
            (a, b) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(n) => Some(*n as f64),
            CellValue::Float(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

fn parse_pattern_number(raw: &str) -> Option<CellValue> {
    if INTEGER.is_match(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return Some(CellValue::Integer(n));
        }
        // too wide for i64, still numeric
        return raw.parse::<f64>().ok().map(CellValue::Float);
    }
    if FLOAT.is_match(raw) {
        // a dangling exponent marker ("1e") reads as the mantissa alone
        return raw
            .parse::<f64>()
            .or_else(|_| raw.trim_end_matches(|c: char| c == 'e' || c == 'E').parse())
            .ok()
            .map(CellValue::Float);
    }
    None
}

/// Strict numeric parse used for sorting.
///
/// The whole text must be a finite number; signs and exponents are allowed.
/// Empty text, `inf` and `NaN` are not numbers.
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Decides whether a cell value passes an operator test against a compare value.
///
/// The relational bits are tested first (`EQUALS`, then `LESS_THAN`, then
/// `GREATER_THAN`). Only when none of them matched is `CONTAINS` consulted:
/// the compare value's string form must be a substring of the cell's, with
/// the outcome flipped by `NOT`.
///
/// `NOT` alongside `CONTAINS` alone tests all three relations, so it matches
/// any comparable pair. The flipped substring test is only reached when the
/// two sides cannot be compared, a number against text.
///
/// ```
/// use standout_tablesort::{should_include, ColumnType, Operator};
///
/// assert!(should_include("10", Operator::GREATER_OR_EQUAL, "10", ColumnType::Infer));
/// assert!(!should_include("9", Operator::GREATER_OR_EQUAL, "10", ColumnType::Infer));
/// assert!(should_include(
///     "ABC",
///     Operator::CONTAINS | Operator::IGNORE_CASE,
///     "b",
///     ColumnType::Text,
/// ));
/// ```
pub fn should_include(
    cell_value: &str,
    op: Operator,
    compare_value: &str,
    column_type: ColumnType,
) -> bool {
    let ignore_case = op.ignores_case();
    let cell = CellValue::coerce(cell_value, column_type, ignore_case);
    let compare = CellValue::coerce(compare_value, column_type, ignore_case);

    let relational = op.effective_relational();
    if !relational.is_empty() {
        if let Some(ordering) = cell.compare(&compare) {
            let matched = match ordering {
                Ordering::Equal => relational.contains(Operator::EQUALS),
                Ordering::Less => relational.contains(Operator::LESS_THAN),
                Ordering::Greater => relational.contains(Operator::GREATER_THAN),
            };
            if matched {
                return true;
            }
        }
    }

    if op.contains(Operator::CONTAINS) {
        let (mut haystack, mut needle) = (cell.to_string(), compare.to_string());
        if ignore_case {
            haystack = haystack.to_uppercase();
            needle = needle.to_uppercase();
        }
        return haystack.contains(&needle) != op.is_negated();
    }

    false
}
