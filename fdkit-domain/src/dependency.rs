use crate::attrs::AttributeSet;
use crate::error::{ParseError, ParseErrorKind};
use std::fmt;
use std::str::FromStr;

const ARROW: &str = "->";

/// A functional dependency `lhs -> rhs`.
///
/// Equality compares both sides as sets, independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionalDependency {
    lhs: AttributeSet,
    rhs: AttributeSet,
}

impl FunctionalDependency {
    pub fn new(lhs: AttributeSet, rhs: AttributeSet) -> Self {
        Self { lhs, rhs }
    }

    pub fn lhs(&self) -> &AttributeSet {
        &self.lhs
    }

    pub fn rhs(&self) -> &AttributeSet {
        &self.rhs
    }

    /// True when `attrs` covers the left-hand side.
    pub fn entails(&self, attrs: &AttributeSet) -> bool {
        attrs.has_subset(&self.lhs)
    }

    /// `attrs ∪ rhs` when entailed, otherwise `attrs` unchanged.
    pub fn apply(&self, attrs: &AttributeSet) -> AttributeSet {
        if self.entails(attrs) {
            attrs.union(&self.rhs)
        } else {
            attrs.clone()
        }
    }

    pub fn is_trivial(&self) -> bool {
        self.lhs.has_subset(&self.rhs)
    }

    pub fn with_lhs(&self, lhs: AttributeSet) -> Self {
        Self::new(lhs, self.rhs.clone())
    }

    /// One dependency per right-hand attribute, in right-hand order.
    pub fn split(&self) -> Vec<FunctionalDependency> {
        self.rhs
            .iter()
            .map(|attr| Self::new(self.lhs.clone(), std::iter::once(attr).collect()))
            .collect()
    }

    pub(crate) fn parse_line(text: &str, line: usize) -> Result<Self, ParseError> {
        let Some((lhs, rhs)) = text.split_once(ARROW) else {
            return Err(ParseError::new(line, text, ParseErrorKind::MissingSeparator));
        };
        if rhs.contains(ARROW) {
            return Err(ParseError::new(line, text, ParseErrorKind::RepeatedSeparator));
        }

        let lhs = AttributeSet::from_text(lhs);
        let rhs = AttributeSet::from_text(rhs);
        if lhs.is_empty() {
            return Err(ParseError::new(line, text, ParseErrorKind::EmptyLhs));
        }
        if rhs.is_empty() {
            return Err(ParseError::new(line, text, ParseErrorKind::EmptyRhs));
        }
        // Dropping whitespace and duplicates can join `-` and `>` into a new arrow.
        if lhs.to_string().contains(ARROW) || rhs.to_string().contains(ARROW) {
            return Err(ParseError::new(line, text, ParseErrorKind::RepeatedSeparator));
        }

        Ok(Self::new(lhs, rhs))
    }
}

impl FromStr for FunctionalDependency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s.trim(), 1)
    }
}

impl fmt::Display for FunctionalDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.lhs, ARROW, self.rhs)
    }
}
