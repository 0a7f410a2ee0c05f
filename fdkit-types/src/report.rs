use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub input: InputInfo,

    /// Attribute universe of the analysed set.
    pub attributes: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub closures: Vec<ClosureReport>,

    #[serde(default)]
    pub keys: Vec<String>,

    #[serde(default)]
    pub prime_attributes: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimal_cover: Option<CoverReport>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_forms: Option<NormalFormReport>,

    pub summary: ReportSummary,
}

impl AnalysisReport {
    pub fn new(tool: ToolInfo, input: InputInfo) -> Self {
        Self {
            schema: crate::schema::FDKIT_REPORT_V1.to_string(),
            tool,
            input,
            attributes: String::new(),
            closures: vec![],
            keys: vec![],
            prime_attributes: String::new(),
            minimal_cover: None,
            normal_forms: None,
            summary: ReportSummary::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Declared relation schema, when one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureReport {
    pub source: String,
    pub result: String,

    #[serde(default)]
    pub steps: Vec<ClosureStepReport>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureStepReport {
    pub index: u64,
    pub attributes: String,

    /// Dependency applied at this step; absent for the given source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverReport {
    #[serde(default)]
    pub standard_form: Vec<String>,

    #[serde(default)]
    pub minimizations: Vec<MinimizationReport>,

    #[serde(default)]
    pub redundant: Vec<String>,

    #[serde(default)]
    pub cover: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimizationReport {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalFormReport {
    #[serde(default)]
    pub bcnf: Vec<VerdictReport>,

    #[serde(default)]
    pub third_nf: Vec<VerdictReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictReport {
    pub dependency: String,
    pub compliant: bool,
    pub reason: ReasonToken,
    pub message: String,
}

/// Stable token for a verdict reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonToken {
    Trivial,
    LhsIsKey,
    RhsIsPrime,
    Violation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub dependencies: u64,
    pub attributes: u64,
    pub keys: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcnf_violations: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_nf_violations: Option<u64>,

    /// Closures that stopped on their round bound.
    #[serde(default)]
    pub diagnostics: u64,
}
