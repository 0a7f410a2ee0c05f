//! Clap-free settings for the analysis pipeline.

/// Default ceiling on universe size for the exponential key search.
pub const DEFAULT_MAX_KEY_ATTRIBUTES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    /// Declared relation schema; attributes named here join the universe.
    pub schema: Option<String>,

    /// Attribute sets whose closures should be reported, in order.
    pub closures: Vec<String>,

    pub candidate_keys: bool,
    pub minimal_cover: bool,
    pub normal_forms: bool,

    /// Refuse key enumeration over more attributes than this. `None` disables the guard.
    pub max_key_attributes: Option<usize>,

    /// Override the closure round bound (defaults to the dependency count).
    pub closure_round_limit: Option<usize>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            schema: None,
            closures: Vec::new(),
            candidate_keys: true,
            minimal_cover: true,
            normal_forms: true,
            max_key_attributes: Some(DEFAULT_MAX_KEY_ATTRIBUTES),
            closure_round_limit: None,
        }
    }
}
