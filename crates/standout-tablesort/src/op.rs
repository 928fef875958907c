//! Comparison operator flags.
//!
//! An [`Operator`] is a set of flags. The relational bits (`EQUALS`,
//! `LESS_THAN`, `GREATER_THAN`) may be combined, so `LESS_THAN | EQUALS`
//! reads as "≤". `CONTAINS` is a separate substring test, consulted only when
//! no relational bit matched. `IGNORE_CASE` and `NOT` modify the others.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::TableError;

bitflags! {
    /// Operator bitmask for one value comparison.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Operator: u8 {
        /// Values compare equal.
        const EQUALS = 1 << 0;
        /// Cell value is less than the compare value.
        const LESS_THAN = 1 << 1;
        /// Cell value is greater than the compare value.
        const GREATER_THAN = 1 << 2;
        /// Compare value is a substring of the cell value.
        const CONTAINS = 1 << 3;
        /// Fold case before comparing strings.
        const IGNORE_CASE = 1 << 4;
        /// Invert the relational bits and the `CONTAINS` outcome.
        const NOT = 1 << 5;
    }
}

impl Operator {
    /// All relational bits.
    pub const RELATIONAL: Operator = Operator::EQUALS
        .union(Operator::LESS_THAN)
        .union(Operator::GREATER_THAN);

    /// `<=`
    pub const LESS_OR_EQUAL: Operator = Operator::LESS_THAN.union(Operator::EQUALS);

    /// `>=`
    pub const GREATER_OR_EQUAL: Operator = Operator::GREATER_THAN.union(Operator::EQUALS);

    /// `!=`
    pub const NOT_EQUAL: Operator = Operator::EQUALS.union(Operator::NOT);

    /// Returns the relational bits as written, ignoring modifiers.
    pub fn relational(self) -> Operator {
        self.intersection(Self::RELATIONAL)
    }

    /// Returns the relational bits to test, after applying `NOT`.
    ///
    /// `NOT` complements the relational bits within the relational range
    /// only, so `!=` becomes `<` or `>`. With no relational bits written the
    /// complement is the whole range: every comparable pair then matches.
    pub fn effective_relational(self) -> Operator {
        let rel = self.relational();
        if self.contains(Operator::NOT) {
            Self::RELATIONAL.difference(rel)
        } else {
            rel
        }
    }

    /// Returns `true` if string comparisons should fold case.
    pub fn ignores_case(self) -> bool {
        self.contains(Operator::IGNORE_CASE)
    }

    /// Returns `true` if the `NOT` modifier is set.
    pub fn is_negated(self) -> bool {
        self.contains(Operator::NOT)
    }

    /// Parses an operation token.
    ///
    /// | Token | Operator |
    /// |-------|----------|
    /// | `=`   | `EQUALS` |
    /// | `!=`  | `EQUALS \| NOT` |
    /// | `<`   | `LESS_THAN` |
    /// | `>`   | `GREATER_THAN` |
    /// | `<=`  | `LESS_THAN \| EQUALS` |
    /// | `>=`  | `GREATER_THAN \| EQUALS` |
    /// | `~`   | `CONTAINS \| IGNORE_CASE` |
    /// | `~~`  | `CONTAINS` |
    pub fn from_token(token: &str) -> Result<Operator, TableError> {
        match token {
            "=" => Ok(Operator::EQUALS),
            "!=" => Ok(Operator::NOT_EQUAL),
            "<" => Ok(Operator::LESS_THAN),
            ">" => Ok(Operator::GREATER_THAN),
            "<=" => Ok(Operator::LESS_OR_EQUAL),
            ">=" => Ok(Operator::GREATER_OR_EQUAL),
            "~" => Ok(Operator::CONTAINS | Operator::IGNORE_CASE),
            "~~" => Ok(Operator::CONTAINS),
            other => Err(TableError::UnknownOperation(other.to_string())),
        }
    }

    /// Returns the operation token for this operator, if it has one.
    pub fn token(self) -> Option<&'static str> {
        const TOKENS: [(&str, Operator); 8] = [
            ("=", Operator::EQUALS),
            ("!=", Operator::NOT_EQUAL),
            ("<", Operator::LESS_THAN),
            (">", Operator::GREATER_THAN),
            ("<=", Operator::LESS_OR_EQUAL),
            (">=", Operator::GREATER_OR_EQUAL),
            ("~", Operator::CONTAINS.union(Operator::IGNORE_CASE)),
            ("~~", Operator::CONTAINS),
        ];
        TOKENS
            .iter()
            .find(|(_, op)| *op == self)
            .map(|(token, _)| *token)
    }
}

impl FromStr for Operator {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_token(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token() {
            Some(token) => f.write_str(token),
            None => bitflags::parser::to_writer(self, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relational_ignores_modifiers() {
        let op = Operator::LESS_THAN | Operator::CONTAINS | Operator::IGNORE_CASE;
        assert_eq!(op.relational(), Operator::LESS_THAN);
    }

    #[test]
    fn not_complements_within_relational_range() {
        assert_eq!(
            Operator::NOT_EQUAL.effective_relational(),
            Operator::LESS_THAN | Operator::GREATER_THAN
        );
        assert_eq!(
            (Operator::LESS_OR_EQUAL | Operator::NOT).effective_relational(),
            Operator::GREATER_THAN
        );
        // never leaks into CONTAINS or IGNORE_CASE
        let inverted = (Operator::EQUALS | Operator::NOT).effective_relational();
        assert!(!inverted.contains(Operator::CONTAINS));
        assert!(!inverted.contains(Operator::IGNORE_CASE));
    }

    #[test]
    fn not_without_relational_bits_tests_every_relation() {
        let op = Operator::CONTAINS | Operator::NOT;
        assert_eq!(op.effective_relational(), Operator::RELATIONAL);
        assert!(op.is_negated());
        assert!(Operator::CONTAINS.effective_relational().is_empty());
    }

    #[test]
    fn tokens_parse() {
        assert_eq!(Operator::from_token("=").unwrap(), Operator::EQUALS);
        assert_eq!(Operator::from_token("!=").unwrap(), Operator::NOT_EQUAL);
        assert_eq!(
            Operator::from_token(">=").unwrap(),
            Operator::GREATER_THAN | Operator::EQUALS
        );
        assert_eq!(
            Operator::from_token("~").unwrap(),
            Operator::CONTAINS | Operator::IGNORE_CASE
        );
        assert_eq!(Operator::from_token("~~").unwrap(), Operator::CONTAINS);
        assert_eq!("<".parse::<Operator>().unwrap(), Operator::LESS_THAN);
    }

    #[test]
    fn unknown_token_is_rejected() {
        assert_eq!(
            Operator::from_token("=~"),
            Err(TableError::UnknownOperation("=~".to_string()))
        );
    }

    #[test]
    fn display_prefers_tokens() {
        assert_eq!(Operator::LESS_OR_EQUAL.to_string(), "<=");
        assert_eq!(
            (Operator::CONTAINS | Operator::NOT).to_string(),
            "CONTAINS | NOT"
        );
    }
}
