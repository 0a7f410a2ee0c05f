//! BCNF and 3NF classification of each dependency in a set.
//!
//! A dependency's left side counts as a key only when it equals one of the minimal
//! candidate keys exactly; a strict superkey does not qualify.

use crate::dependency::FunctionalDependency;
use crate::set::DependencySet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalForm {
    Bcnf,
    Third,
}

impl fmt::Display for NormalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalForm::Bcnf => f.write_str("BCNF"),
            NormalForm::Third => f.write_str("3NF"),
        }
    }
}

/// Why a dependency was judged the way it was. Only `Violation` is non-compliant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    Trivial,
    LhsIsKey,
    RhsIsPrime,
    Violation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub fd: FunctionalDependency,
    pub form: NormalForm,
    pub reason: Reason,
}

impl Verdict {
    pub fn is_compliant(&self) -> bool {
        self.reason != Reason::Violation
    }

    pub fn describe(&self) -> &'static str {
        match (self.reason, self.form) {
            (Reason::Trivial, _) => "trivial",
            (Reason::LhsIsKey, _) => "LHS is key",
            (Reason::RhsIsPrime, _) => "RHS is prime",
            (Reason::Violation, NormalForm::Bcnf) => "LHS not key, not trivial",
            (Reason::Violation, NormalForm::Third) => "LHS not key, not trivial, RHS not prime",
        }
    }
}

impl DependencySet {
    pub fn check_bcnf(&self) -> Vec<Verdict> {
        self.classify(NormalForm::Bcnf)
    }

    pub fn check_3nf(&self) -> Vec<Verdict> {
        self.classify(NormalForm::Third)
    }

    /// One verdict per dependency, in set order; the first matching rule wins.
    pub fn classify(&self, form: NormalForm) -> Vec<Verdict> {
        let keys = self.keys();
        let primes = self.prime_attrs();

        self.iter()
            .map(|fd| {
                let reason = if fd.is_trivial() {
                    Reason::Trivial
                } else if keys.iter().any(|key| key == fd.lhs()) {
                    Reason::LhsIsKey
                } else if form == NormalForm::Third && primes.has_subset(fd.rhs()) {
                    Reason::RhsIsPrime
                } else {
                    Reason::Violation
                };
                Verdict {
                    fd: fd.clone(),
                    form,
                    reason,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{NormalForm, Reason};
    use crate::set::DependencySet;
    use pretty_assertions::assert_eq;

    fn reasons(fds: &DependencySet, form: NormalForm) -> Vec<Reason> {
        fds.classify(form).iter().map(|v| v.reason).collect()
    }

    #[test]
    fn lhs_equal_to_key_is_compliant() {
        let fds = DependencySet::parse("A->B").unwrap();
        let verdicts = fds.check_bcnf();
        assert_eq!(verdicts.len(), 1);
        assert!(verdicts[0].is_compliant());
        assert_eq!(verdicts[0].reason, Reason::LhsIsKey);
        assert_eq!(verdicts[0].describe(), "LHS is key");
    }

    #[test]
    fn trivial_wins_before_key_test() {
        let fds = DependencySet::parse("AB->A\nA->B").unwrap();
        assert_eq!(
            reasons(&fds, NormalForm::Bcnf),
            vec![Reason::Trivial, Reason::LhsIsKey]
        );
    }

    #[test]
    fn strict_superkey_is_not_a_key() {
        // AB is a superkey but not minimal; A is the only key.
        let fds = DependencySet::parse("A->B\nAB->C").unwrap();
        let verdicts = fds.check_bcnf();
        assert_eq!(verdicts[1].reason, Reason::Violation);
        assert_eq!(verdicts[1].describe(), "LHS not key, not trivial");
    }

    #[test]
    fn third_normal_form_accepts_prime_rhs() {
        // keys: AB and AC (order: AB first); C->B has a prime RHS.
        let fds = DependencySet::parse("AB->C\nC->B").unwrap();
        assert_eq!(
            reasons(&fds, NormalForm::Bcnf),
            vec![Reason::LhsIsKey, Reason::Violation]
        );
        assert_eq!(
            reasons(&fds, NormalForm::Third),
            vec![Reason::LhsIsKey, Reason::RhsIsPrime]
        );
    }

    #[test]
    fn third_normal_form_violation_message() {
        let fds = DependencySet::parse("A->B\nB->C").unwrap();
        let verdicts = fds.check_3nf();
        assert_eq!(verdicts[1].reason, Reason::Violation);
        assert!(!verdicts[1].is_compliant());
        assert_eq!(
            verdicts[1].describe(),
            "LHS not key, not trivial, RHS not prime"
        );
    }

    #[test]
    fn bcnf_never_reports_prime_rhs() {
        let fds = DependencySet::parse("AB->C\nC->B\nC->A").unwrap();
        assert!(
            fds.check_bcnf()
                .iter()
                .all(|v| v.reason != Reason::RhsIsPrime)
        );
    }
}
