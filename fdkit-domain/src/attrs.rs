use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A single attribute symbol.
pub type Attribute = char;

/// A deduplicated set of attributes.
///
/// Members keep the order in which they were first inserted. That order never affects
/// equality, but it fixes the canonical string and the enumeration order of
/// [`AttributeSet::powerset`], which the algorithms rely on for deterministic tie-breaking.
#[derive(Debug, Clone, Default, Eq)]
pub struct AttributeSet {
    attrs: Vec<Attribute>,
}

impl AttributeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from text, one attribute per character. Whitespace is skipped and
    /// repeated symbols collapse onto their first occurrence.
    pub fn from_text(text: &str) -> Self {
        text.chars().collect()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn contains(&self, attr: Attribute) -> bool {
        self.attrs.contains(&attr)
    }

    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.attrs.iter().copied()
    }

    fn insert(&mut self, attr: Attribute) {
        if !attr.is_whitespace() && !self.contains(attr) {
            self.attrs.push(attr);
        }
    }

    pub fn union(&self, other: &AttributeSet) -> AttributeSet {
        let mut out = self.clone();
        for attr in other.iter() {
            out.insert(attr);
        }
        out
    }

    pub fn intersect(&self, other: &AttributeSet) -> AttributeSet {
        self.iter().filter(|a| other.contains(*a)).collect()
    }

    /// `self - other`.
    pub fn difference(&self, other: &AttributeSet) -> AttributeSet {
        self.iter().filter(|a| !other.contains(*a)).collect()
    }

    /// True iff `candidate` is a subset of `self`.
    pub fn has_subset(&self, candidate: &AttributeSet) -> bool {
        candidate.iter().all(|a| self.contains(a))
    }

    pub fn is_proper_superset_of(&self, other: &AttributeSet) -> bool {
        self.len() > other.len() && self.has_subset(other)
    }

    /// All non-empty subsets, `2^n - 1` of them.
    ///
    /// Subsets come out in binary-counting order: the k-th subset (k >= 1) holds the
    /// members whose bit is set in `k`, bit `i` standing for the i-th member in insertion
    /// order. For `ABC` that is `A, B, AB, C, AC, BC, ABC`. Each subset lists its members
    /// in insertion order.
    pub fn powerset(&self) -> Vec<AttributeSet> {
        let mut subsets = vec![AttributeSet::empty()];
        for attr in self.iter() {
            let extended: Vec<AttributeSet> = subsets
                .iter()
                .map(|s| {
                    let mut next = s.clone();
                    next.attrs.push(attr);
                    next
                })
                .collect();
            subsets.extend(extended);
        }
        subsets.remove(0);
        subsets
    }
}

impl PartialEq for AttributeSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.has_subset(other)
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut out = AttributeSet::empty();
        for attr in iter {
            out.insert(attr);
        }
        out
    }
}

impl From<&str> for AttributeSet {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl FromStr for AttributeSet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_text(s))
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attr in &self.attrs {
            write!(f, "{attr}")?;
        }
        Ok(())
    }
}
