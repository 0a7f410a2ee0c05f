//! Analysis pipeline, extracted from the CLI.
//!
//! The entry points are I/O-agnostic: dependency text comes in through a
//! [`DependencySource`] and artifacts go out through a [`WritePort`].

use crate::convert;
use crate::ports::{DependencySource, WritePort};
use crate::settings::AnalysisSettings;
use anyhow::Context;
use fdkit_domain::{AttributeSet, DependencySet, ParseError};
use fdkit_types::report::{AnalysisReport, InputInfo, NormalFormReport, ToolInfo};
use tracing::{debug, info};

/// Error type for pipeline results. Exit code 2 = input problem, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("{attributes} attributes exceed the key search limit of {max}")]
    AttributeLimit { attributes: usize, max: usize },

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::Parse(_) | ToolError::AttributeLimit { .. } => 2,
            ToolError::Internal(_) => 1,
        }
    }
}

/// Outcome of `run_analysis`.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    /// The parsed set the report was built from, declared schema included.
    pub dependencies: DependencySet,
}

/// Run the analysis pipeline: read, parse, reason, and build the report.
///
/// The caller is responsible for writing artifacts (via `WritePort`) or the
/// convenience `write_analysis_artifacts` helper.
pub fn run_analysis(
    settings: &AnalysisSettings,
    source: &dyn DependencySource,
    tool: ToolInfo,
) -> Result<AnalysisOutcome, ToolError> {
    let text = source.read_dependencies().context("load dependencies")?;

    let mut fds = DependencySet::parse(&text)?;
    if let Some(schema) = settings.schema.as_deref() {
        fds = fds.with_schema(AttributeSet::from_text(schema));
    }

    let universe = fds.all_attrs();
    debug!(
        dependencies = fds.len(),
        attributes = universe.len(),
        "parsed dependency set"
    );

    let needs_keys = settings.candidate_keys || settings.normal_forms;
    if needs_keys
        && let Some(max) = settings.max_key_attributes
        && universe.len() > max
    {
        return Err(ToolError::AttributeLimit {
            attributes: universe.len(),
            max,
        });
    }

    let input = InputInfo {
        path: source.origin(),
        dependencies: convert::lines(&fds),
        schema: settings
            .schema
            .as_deref()
            .map(|s| AttributeSet::from_text(s).to_string()),
    };
    let mut report = AnalysisReport::new(tool, input);
    report.attributes = universe.to_string();

    for raw in &settings.closures {
        let attrs = AttributeSet::from_text(raw);
        let (result, log) = match settings.closure_round_limit {
            Some(limit) => fds.closure_with_limit(&attrs, limit),
            None => fds.closure(&attrs),
        };
        report
            .closures
            .push(convert::closure_report(&attrs, &result, &log));
    }

    if settings.candidate_keys {
        report.keys = fds.keys().iter().map(|k| k.to_string()).collect();
        report.prime_attributes = fds.prime_attrs().to_string();
    }

    if settings.minimal_cover {
        let (_, log) = fds.minimal_cover();
        report.minimal_cover = Some(convert::cover_report(&log));
    }

    if settings.normal_forms {
        report.normal_forms = Some(NormalFormReport {
            bcnf: fds.check_bcnf().iter().map(convert::verdict_report).collect(),
            third_nf: fds.check_3nf().iter().map(convert::verdict_report).collect(),
        });
    }

    fill_summary(&mut report, &fds, needs_keys);
    info!(
        dependencies = report.summary.dependencies,
        keys = report.summary.keys,
        diagnostics = report.summary.diagnostics,
        "analysis complete"
    );

    Ok(AnalysisOutcome {
        report,
        dependencies: fds,
    })
}

/// The key count stays zero when no key search ran.
fn fill_summary(report: &mut AnalysisReport, fds: &DependencySet, keys_computed: bool) {
    let summary = &mut report.summary;
    summary.dependencies = fds.len() as u64;
    summary.attributes = fds.all_attrs().len() as u64;
    summary.keys = if keys_computed { fds.keys().len() as u64 } else { 0 };
    summary.cover_size = report.minimal_cover.as_ref().map(|c| c.cover.len() as u64);
    if let Some(nf) = &report.normal_forms {
        let violations = |vs: &[fdkit_types::report::VerdictReport]| {
            vs.iter().filter(|v| !v.compliant).count() as u64
        };
        summary.bcnf_violations = Some(violations(&nf.bcnf));
        summary.third_nf_violations = Some(violations(&nf.third_nf));
    }
    summary.diagnostics = report
        .closures
        .iter()
        .filter(|c| c.diagnostic.is_some())
        .count() as u64;
}

/// Write the report into the output directory as `report.json`.
pub fn write_analysis_artifacts(
    outcome: &AnalysisOutcome,
    out_dir: &camino::Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let json = serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), json.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InlineDependencySource;
    use camino::{Utf8Path, Utf8PathBuf};
    use fdkit_types::report::ReasonToken;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    const SAMPLE: &str = "EF->BC\nA->D\nB->AE\nBD->C\n";

    fn tool() -> ToolInfo {
        ToolInfo {
            name: "fdkit".to_string(),
            version: Some("test".to_string()),
        }
    }

    fn analyse(text: &str, settings: &AnalysisSettings) -> Result<AnalysisOutcome, ToolError> {
        run_analysis(settings, &InlineDependencySource::new(text), tool())
    }

    #[derive(Default)]
    struct RecordingWriter {
        files: RefCell<Vec<(Utf8PathBuf, Vec<u8>)>>,
        dirs: RefCell<Vec<Utf8PathBuf>>,
    }

    impl WritePort for RecordingWriter {
        fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
            self.files
                .borrow_mut()
                .push((path.to_path_buf(), contents.to_vec()));
            Ok(())
        }

        fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
            self.dirs.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    struct FailingSource;

    impl DependencySource for FailingSource {
        fn read_dependencies(&self) -> anyhow::Result<String> {
            anyhow::bail!("disk on fire")
        }

        fn origin(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn sample_report_has_every_section() {
        let settings = AnalysisSettings {
            closures: vec!["EF".to_string()],
            ..AnalysisSettings::default()
        };
        let outcome = analyse(SAMPLE, &settings).expect("analysis");
        let report = &outcome.report;

        assert_eq!(report.attributes, "EFABDC");
        assert_eq!(report.keys, vec!["EF", "FB"]);
        assert_eq!(report.prime_attributes, "EFB");
        assert_eq!(report.closures.len(), 1);
        assert_eq!(report.closures[0].result, "EFBCAD");

        let cover = report.minimal_cover.as_ref().expect("cover");
        assert_eq!(cover.cover, vec!["EF->B", "A->D", "B->A", "B->E", "B->C"]);

        let nf = report.normal_forms.as_ref().expect("normal forms");
        assert_eq!(nf.bcnf[0].reason, ReasonToken::LhsIsKey);
        assert_eq!(nf.third_nf[3].message, "LHS not key, not trivial, RHS not prime");

        assert_eq!(report.summary.dependencies, 4);
        assert_eq!(report.summary.attributes, 6);
        assert_eq!(report.summary.keys, 2);
        assert_eq!(report.summary.cover_size, Some(5));
        assert_eq!(report.summary.bcnf_violations, Some(3));
        assert_eq!(report.summary.third_nf_violations, Some(3));
        assert_eq!(report.summary.diagnostics, 0);
    }

    #[test]
    fn disabled_sections_are_left_out() {
        let settings = AnalysisSettings {
            candidate_keys: false,
            minimal_cover: false,
            normal_forms: false,
            ..AnalysisSettings::default()
        };
        let report = analyse(SAMPLE, &settings).expect("analysis").report;
        assert!(report.keys.is_empty());
        assert!(report.minimal_cover.is_none());
        assert!(report.normal_forms.is_none());
        assert_eq!(report.summary.cover_size, None);
        assert_eq!(report.summary.bcnf_violations, None);
    }

    #[test]
    fn summary_counts_keys_found_for_normal_forms() {
        let settings = AnalysisSettings {
            candidate_keys: false,
            minimal_cover: false,
            ..AnalysisSettings::default()
        };
        let report = analyse(SAMPLE, &settings).expect("analysis").report;
        assert!(report.keys.is_empty());
        assert_eq!(report.summary.keys, 2);
        assert_eq!(report.summary.bcnf_violations, Some(3));
    }

    #[test]
    fn declared_schema_joins_universe() {
        let settings = AnalysisSettings {
            schema: Some("X".to_string()),
            ..AnalysisSettings::default()
        };
        let outcome = analyse("", &settings).expect("analysis");
        assert_eq!(outcome.report.attributes, "X");
        assert_eq!(outcome.report.keys, vec!["X"]);
        assert_eq!(outcome.report.input.schema.as_deref(), Some("X"));
        assert_eq!(outcome.dependencies.schema().to_string(), "X");
    }

    #[test]
    fn parse_error_maps_to_input_exit_code() {
        let err = analyse("A->B\nbroken", &AnalysisSettings::default()).unwrap_err();
        assert!(matches!(err, ToolError::Parse(ref e) if e.line == 2));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn attribute_limit_guards_key_search() {
        let settings = AnalysisSettings {
            max_key_attributes: Some(3),
            ..AnalysisSettings::default()
        };
        let err = analyse("AB->CD", &settings).unwrap_err();
        assert!(matches!(
            err,
            ToolError::AttributeLimit {
                attributes: 4,
                max: 3
            }
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn attribute_limit_is_skipped_without_keys() {
        let settings = AnalysisSettings {
            candidate_keys: false,
            normal_forms: false,
            max_key_attributes: Some(1),
            closures: vec!["A".to_string()],
            ..AnalysisSettings::default()
        };
        let report = analyse("AB->CD", &settings).expect("analysis").report;
        assert_eq!(report.closures[0].result, "A");
    }

    #[test]
    fn round_limit_override_is_counted_as_diagnostic() {
        let settings = AnalysisSettings {
            closures: vec!["A".to_string()],
            closure_round_limit: Some(0),
            ..AnalysisSettings::default()
        };
        let report = analyse("A->B\nB->C\nC->D", &settings)
            .expect("analysis")
            .report;
        assert_eq!(report.closures[0].result, "AB");
        assert!(report.closures[0].diagnostic.is_some());
        assert_eq!(report.summary.diagnostics, 1);
    }

    #[test]
    fn source_failure_is_internal() {
        let err = run_analysis(&AnalysisSettings::default(), &FailingSource, tool()).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn artifacts_write_pretty_report() {
        let outcome = analyse("A->B", &AnalysisSettings::default()).expect("analysis");
        let writer = RecordingWriter::default();
        write_analysis_artifacts(&outcome, Utf8Path::new("out"), &writer).expect("write");

        assert_eq!(writer.dirs.borrow().as_slice(), &[Utf8PathBuf::from("out")]);
        let files = writer.files.borrow();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, Utf8PathBuf::from("out/report.json"));

        let value: serde_json::Value = serde_json::from_slice(&files[0].1).expect("json");
        assert_eq!(value["schema"], "fdkit.report.v1");
        assert_eq!(value["keys"], serde_json::json!(["A"]));
    }
}
