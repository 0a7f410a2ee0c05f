use crate::attrs::AttributeSet;
use crate::dependency::FunctionalDependency;
use crate::error::ParseError;
use crate::log::{ClosureDiagnostic, ClosureLog};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

/// An ordered collection of functional dependencies, optionally over a declared schema.
///
/// Order never changes what a closure or a key is; it only decides which dependency wins
/// when an algorithm has to pick "the first" one.
///
/// Keys and prime attributes are computed on first request and cached. The cache is
/// written at most once and never observed by equality.
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    fds: Vec<FunctionalDependency>,
    schema: AttributeSet,
    keys: OnceLock<Vec<AttributeSet>>,
    primes: OnceLock<AttributeSet>,
}

impl DependencySet {
    pub fn from_fds(fds: Vec<FunctionalDependency>) -> Self {
        Self::from_parts(fds, AttributeSet::empty())
    }

    fn from_parts(fds: Vec<FunctionalDependency>, schema: AttributeSet) -> Self {
        Self {
            fds,
            schema,
            keys: OnceLock::new(),
            primes: OnceLock::new(),
        }
    }

    /// Parse one dependency per non-blank line (`AB->C`). Fails on the first bad line
    /// without producing a partial set.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut fds = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let fd = FunctionalDependency::parse_line(line, idx + 1)?;
            fds.push(fd);
        }
        Ok(Self::from_fds(fds))
    }

    /// Same dependencies over a declared relation schema. Schema attributes that no
    /// dependency mentions still belong to the universe.
    pub fn with_schema(&self, schema: AttributeSet) -> Self {
        Self::from_parts(self.fds.clone(), schema)
    }

    pub fn schema(&self) -> &AttributeSet {
        &self.schema
    }

    pub fn fds(&self) -> &[FunctionalDependency] {
        &self.fds
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FunctionalDependency> {
        self.fds.iter()
    }

    pub fn len(&self) -> usize {
        self.fds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fds.is_empty()
    }

    /// This set followed by every dependency of `other` not already present.
    pub fn union(&self, other: &DependencySet) -> Self {
        let mut fds = self.fds.clone();
        for fd in other.iter() {
            if !fds.contains(fd) {
                fds.push(fd.clone());
            }
        }
        Self::from_parts(fds, self.schema.union(&other.schema))
    }

    /// Drop every dependency equal to `target`.
    pub fn remove(&self, target: &FunctionalDependency) -> Self {
        let fds = self.iter().filter(|fd| *fd != target).cloned().collect();
        Self::from_parts(fds, self.schema.clone())
    }

    /// Replace every dependency equal to `find` with `replacement`, in place.
    pub fn replace(&self, find: &FunctionalDependency, replacement: &FunctionalDependency) -> Self {
        let fds = self
            .iter()
            .map(|fd| {
                if fd == find {
                    replacement.clone()
                } else {
                    fd.clone()
                }
            })
            .collect();
        Self::from_parts(fds, self.schema.clone())
    }

    /// Drop the dependency at `index` only, keeping any equal copies elsewhere.
    pub(crate) fn without_position(&self, index: usize) -> Self {
        let fds = self
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, fd)| fd.clone())
            .collect();
        Self::from_parts(fds, self.schema.clone())
    }

    pub(crate) fn with_fds(&self, fds: Vec<FunctionalDependency>) -> Self {
        Self::from_parts(fds, self.schema.clone())
    }

    pub fn all_lhs(&self) -> AttributeSet {
        self.iter()
            .fold(AttributeSet::empty(), |acc, fd| acc.union(fd.lhs()))
    }

    pub fn all_rhs(&self) -> AttributeSet {
        self.iter()
            .fold(AttributeSet::empty(), |acc, fd| acc.union(fd.rhs()))
    }

    /// The attribute universe: declared schema, then every left side, then every right side.
    pub fn all_attrs(&self) -> AttributeSet {
        self.schema.union(&self.all_lhs()).union(&self.all_rhs())
    }

    /// Closure of `source`, with the step-by-step derivation.
    pub fn closure(&self, source: &AttributeSet) -> (AttributeSet, ClosureLog) {
        self.closure_with_limit(source, self.len())
    }

    pub fn closure_attrs(&self, source: &AttributeSet) -> AttributeSet {
        self.closure(source).0
    }

    /// Closure of `source` with an explicit bound on the number of rounds.
    ///
    /// Each round applies the first entailed dependency of a working copy and then drops
    /// it from that copy, so a dependency is used at most once per call. The loop stops
    /// when nothing is entailed, when the universe is reached, or when `limit` rounds have
    /// been exceeded; the last case is flagged on the log and the partial result returned.
    pub fn closure_with_limit(
        &self,
        source: &AttributeSet,
        limit: usize,
    ) -> (AttributeSet, ClosureLog) {
        let universe = self.all_attrs();
        let mut working = self.clone();
        let mut result = source.clone();
        let mut log = ClosureLog::given(source);
        let mut rounds = 0usize;

        while let Some(fd) = working.fds().iter().find(|fd| fd.entails(&result)).cloned() {
            working = working.remove(&fd);
            result = fd.apply(&result);
            rounds += 1;
            trace!(round = rounds, via = %fd, attrs = %result, "closure step");
            log.push(&result, &fd);

            if result == universe {
                break;
            }

            if rounds > limit {
                let diagnostic = ClosureDiagnostic::RoundLimitExceeded { rounds, limit };
                warn!(source = %source, "{}", diagnostic);
                log.flag(diagnostic);
                break;
            }
        }

        (result, log)
    }

    /// Minimal candidate keys, in powerset order of the universe.
    ///
    /// Enumerates every non-empty subset of the universe, so the cost is exponential in the
    /// number of attributes. An empty universe has no keys.
    pub fn keys(&self) -> &[AttributeSet] {
        self.keys.get_or_init(|| self.compute_keys())
    }

    fn compute_keys(&self) -> Vec<AttributeSet> {
        let universe = self.all_attrs();
        let superkeys: Vec<AttributeSet> = universe
            .powerset()
            .into_iter()
            .filter(|candidate| self.closure_attrs(candidate) == universe)
            .collect();

        let keys: Vec<AttributeSet> = superkeys
            .iter()
            .filter(|k| !superkeys.iter().any(|other| k.is_proper_superset_of(other)))
            .cloned()
            .collect();

        debug!(
            attributes = universe.len(),
            superkeys = superkeys.len(),
            keys = keys.len(),
            "enumerated candidate keys"
        );
        keys
    }

    /// Union of all candidate keys.
    pub fn prime_attrs(&self) -> &AttributeSet {
        self.primes.get_or_init(|| {
            self.keys()
                .iter()
                .fold(AttributeSet::empty(), |acc, key| acc.union(key))
        })
    }

    pub fn is_superkey(&self, attrs: &AttributeSet) -> bool {
        self.closure_attrs(attrs).has_subset(&self.all_attrs())
    }

    /// True when `fd` follows from this set.
    pub fn implies(&self, fd: &FunctionalDependency) -> bool {
        self.closure_attrs(fd.lhs()).has_subset(fd.rhs())
    }

    /// True when every dependency of `other` follows from this set.
    pub fn covers(&self, other: &DependencySet) -> bool {
        other.iter().all(|fd| self.implies(fd))
    }

    pub fn is_equivalent(&self, other: &DependencySet) -> bool {
        self.covers(other) && other.covers(self)
    }
}

impl PartialEq for DependencySet {
    fn eq(&self, other: &Self) -> bool {
        self.fds == other.fds && self.schema == other.schema
    }
}

impl Eq for DependencySet {}

impl FromIterator<FunctionalDependency> for DependencySet {
    fn from_iter<I: IntoIterator<Item = FunctionalDependency>>(iter: I) -> Self {
        Self::from_fds(iter.into_iter().collect())
    }
}

impl FromStr for DependencySet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One dependency per line, in order. The declared schema is not part of the text form.
impl fmt::Display for DependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fd) in self.fds.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{fd}")?;
        }
        Ok(())
    }
}
