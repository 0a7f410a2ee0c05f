//! Engine values to wire DTOs. Everything travels as canonical strings.

use fdkit_domain::{
    AttributeSet, ClosureLog, CoverLog, DependencySet, Reason, Verdict,
};
use fdkit_types::report::{
    ClosureReport, ClosureStepReport, CoverReport, MinimizationReport, ReasonToken,
    VerdictReport,
};

pub(crate) fn lines(fds: &DependencySet) -> Vec<String> {
    fds.iter().map(|fd| fd.to_string()).collect()
}

pub(crate) fn closure_report(
    source: &AttributeSet,
    result: &AttributeSet,
    log: &ClosureLog,
) -> ClosureReport {
    ClosureReport {
        source: source.to_string(),
        result: result.to_string(),
        steps: log
            .steps()
            .iter()
            .map(|step| ClosureStepReport {
                index: step.index as u64,
                attributes: step.attrs.to_string(),
                via: step.via.as_ref().map(|fd| fd.to_string()),
            })
            .collect(),
        diagnostic: log.diagnostic().map(|d| d.to_string()),
    }
}

pub(crate) fn cover_report(log: &CoverLog) -> CoverReport {
    CoverReport {
        standard_form: lines(&log.standard_form),
        minimizations: log
            .minimizations
            .iter()
            .map(|m| MinimizationReport {
                before: m.before.to_string(),
                after: m.after.to_string(),
            })
            .collect(),
        redundant: log.redundant.iter().map(|fd| fd.to_string()).collect(),
        cover: lines(&log.cover),
    }
}

pub(crate) fn verdict_report(verdict: &Verdict) -> VerdictReport {
    VerdictReport {
        dependency: verdict.fd.to_string(),
        compliant: verdict.is_compliant(),
        reason: reason_token(verdict.reason),
        message: verdict.describe().to_string(),
    }
}

fn reason_token(reason: Reason) -> ReasonToken {
    match reason {
        Reason::Trivial => ReasonToken::Trivial,
        Reason::LhsIsKey => ReasonToken::LhsIsKey,
        Reason::RhsIsPrime => ReasonToken::RhsIsPrime,
        Reason::Violation => ReasonToken::Violation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn closure_steps_carry_applied_dependency() {
        let fds = DependencySet::parse("A->B\nB->C").unwrap();
        let source = AttributeSet::from_text("A");
        let (result, log) = fds.closure(&source);

        let report = closure_report(&source, &result, &log);
        assert_eq!(report.result, "ABC");
        assert_eq!(report.steps.len(), 3);
        assert_eq!(report.steps[0].via, None);
        assert_eq!(report.steps[1].via.as_deref(), Some("A->B"));
        assert_eq!(report.steps[2].attributes, "ABC");
        assert!(report.diagnostic.is_none());
    }

    #[test]
    fn diagnostic_is_rendered_as_message() {
        let fds = DependencySet::parse("A->B\nB->C\nC->D").unwrap();
        let source = AttributeSet::from_text("A");
        let (result, log) = fds.closure_with_limit(&source, 0);

        let report = closure_report(&source, &result, &log);
        assert_eq!(report.result, "AB");
        let msg = report.diagnostic.expect("diagnostic present");
        assert!(msg.contains("limit 0"));
    }

    #[test]
    fn verdict_tokens_follow_reason() {
        let fds = DependencySet::parse("A->B\nB->C\nAB->A").unwrap();
        let verdicts: Vec<VerdictReport> = fds.check_3nf().iter().map(verdict_report).collect();
        assert_eq!(verdicts[0].reason, ReasonToken::LhsIsKey);
        assert_eq!(verdicts[1].reason, ReasonToken::Violation);
        assert!(!verdicts[1].compliant);
        assert_eq!(verdicts[2].reason, ReasonToken::Trivial);
        assert_eq!(verdicts[2].message, "trivial");
    }

    #[test]
    fn cover_report_lists_every_phase() {
        let fds = DependencySet::parse("A->BC\nAB->C\nB->C").unwrap();
        let (_, log) = fds.minimal_cover();
        let report = cover_report(&log);
        assert_eq!(report.standard_form, vec!["A->B", "A->C", "AB->C", "B->C"]);
        assert_eq!(report.minimizations.len(), 1);
        assert_eq!(report.minimizations[0].before, "AB->C");
        assert_eq!(report.minimizations[0].after, "A->C");
        assert_eq!(report.redundant, vec!["A->C", "A->C"]);
        assert_eq!(report.cover, vec!["A->B", "B->C"]);
    }
}
