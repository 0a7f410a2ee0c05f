//! Minimal (canonical) cover: standard form, left-side reduction, redundancy removal.
//!
//! Every phase scans the working set front to back and takes the first match, so two runs
//! over the same input always agree. The result is *a* minimal cover, not a unique one.

use crate::dependency::FunctionalDependency;
use crate::log::{CoverLog, Minimization};
use crate::set::DependencySet;
use tracing::debug;

impl DependencySet {
    /// Split every dependency into single-attribute right sides, keeping set order.
    pub fn standard_form(&self) -> DependencySet {
        self.with_fds(self.iter().flat_map(FunctionalDependency::split).collect())
    }

    pub fn minimal_cover(&self) -> (DependencySet, CoverLog) {
        let standard = self.standard_form();
        let mut log = CoverLog::new(&standard);

        let minimized = reduce_left_sides(standard, &mut log);
        log.minimized = minimized.clone();

        let cover = drop_redundant(minimized, &mut log);
        log.cover = cover.clone();

        debug!(
            input = self.len(),
            cover = cover.len(),
            minimizations = log.minimizations.len(),
            redundant = log.redundant.len(),
            "computed minimal cover"
        );
        (cover, log)
    }
}

/// Phase 2. Each dependency with a composite left side is attempted once: the first
/// proper subset (powerset order) whose closure over the current working set reaches the
/// right side replaces the left side. A replacement is not attempted again.
fn reduce_left_sides(mut working: DependencySet, log: &mut CoverLog) -> DependencySet {
    let mut attempted: Vec<FunctionalDependency> = Vec::new();

    while let Some(current) = working
        .fds()
        .iter()
        .find(|fd| fd.lhs().len() > 1 && !attempted.contains(fd))
        .cloned()
    {
        attempted.push(current.clone());

        let reduced = current
            .lhs()
            .powerset()
            .into_iter()
            .filter(|sub| sub != current.lhs())
            .find(|sub| working.closure_attrs(sub).has_subset(current.rhs()));

        if let Some(lhs) = reduced {
            let replacement = current.with_lhs(lhs);
            debug!(before = %current, after = %replacement, "reduced left side");
            working = working.replace(&current, &replacement);
            attempted.push(replacement.clone());
            log.minimizations.push(Minimization {
                before: current,
                after: replacement,
            });
        }
    }

    working
}

/// Phase 3. Repeatedly drop the first dependency implied by the rest of the set.
/// Removal is by position, so of two identical dependencies exactly one survives.
fn drop_redundant(mut working: DependencySet, log: &mut CoverLog) -> DependencySet {
    loop {
        let redundant = working.iter().enumerate().find_map(|(idx, fd)| {
            let rest = working.without_position(idx);
            rest.implies(fd).then(|| (rest, fd.clone()))
        });

        let Some((rest, fd)) = redundant else {
            break;
        };
        debug!(dependency = %fd, "removed redundant dependency");
        log.redundant.push(fd);
        working = rest;
    }

    working
}
