//! Configuration file loading for fdkit.
//!
//! Discovers and loads `fdkit.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fdkit_core::settings::{AnalysisSettings, DEFAULT_MAX_KEY_ATTRIBUTES};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "fdkit.toml";

/// Top-level configuration from fdkit.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FdkitConfig {
    /// What to analyse and report.
    pub analysis: AnalysisConfig,

    /// Bounds on the exponential and iterative parts of the engine.
    pub limits: LimitsConfig,
}

/// Analysis section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Declared relation schema (attributes that may appear in no dependency).
    pub schema: Option<String>,

    /// Attribute sets whose closures `analyze` reports.
    pub closures: Vec<String>,

    pub minimal_cover: bool,
    pub normal_forms: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            schema: None,
            closures: Vec::new(),
            minimal_cover: true,
            normal_forms: true,
        }
    }
}

/// Limits section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Largest attribute universe the key search will accept.
    pub max_key_attributes: Option<usize>,

    /// Closure round bound; the dependency count when unset.
    pub closure_round_limit: Option<usize>,
}

/// Discover the fdkit.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse an fdkit.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<FdkitConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<FdkitConfig> {
    let config: FdkitConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load an explicit config path, or discover one in `dir`, or fall back to defaults.
pub fn load_or_default(explicit: Option<&Utf8Path>, dir: &Utf8Path) -> anyhow::Result<FdkitConfig> {
    match explicit.map(Utf8Path::to_path_buf).or_else(|| discover_config(dir)) {
        Some(path) => load_config(&path),
        None => Ok(FdkitConfig::default()),
    }
}

/// Analysis options given on the command line. `None` / `false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub schema: Option<String>,
    pub closures: Vec<String>,
    pub no_cover: bool,
    pub no_normal_forms: bool,
    pub max_key_attributes: Option<usize>,
    pub closure_round_limit: Option<usize>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: FdkitConfig,
}

impl ConfigMerger {
    pub fn new(config: FdkitConfig) -> Self {
        Self { config }
    }

    /// Merge into pipeline settings.
    ///
    /// Scalars given on the CLI replace the config value; CLI closures extend the
    /// config list; `--no-*` flags can only switch a section off.
    pub fn merge(self, cli: &CliOverrides) -> AnalysisSettings {
        let FdkitConfig { analysis, limits } = self.config;

        let mut closures = analysis.closures;
        for attrs in &cli.closures {
            if !closures.contains(attrs) {
                closures.push(attrs.clone());
            }
        }

        AnalysisSettings {
            schema: cli.schema.clone().or(analysis.schema),
            closures,
            candidate_keys: true,
            minimal_cover: analysis.minimal_cover && !cli.no_cover,
            normal_forms: analysis.normal_forms && !cli.no_normal_forms,
            max_key_attributes: Some(
                cli.max_key_attributes
                    .or(limits.max_key_attributes)
                    .unwrap_or(DEFAULT_MAX_KEY_ATTRIBUTES),
            ),
            closure_round_limit: cli.closure_round_limit.or(limits.closure_round_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_example_config() {
        let config = parse_config(
            r#"
[analysis]
schema = "ABCDEF"
closures = ["EF", "B"]
minimal_cover = false

[limits]
max_key_attributes = 12
closure_round_limit = 50
"#,
        )
        .expect("parse config");

        assert_eq!(config.analysis.schema.as_deref(), Some("ABCDEF"));
        assert_eq!(config.analysis.closures, vec!["EF", "B"]);
        assert!(!config.analysis.minimal_cover);
        assert!(config.analysis.normal_forms);
        assert_eq!(config.limits.max_key_attributes, Some(12));
        assert_eq!(config.limits.closure_round_limit, Some(50));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").expect("parse empty");
        assert!(config.analysis.schema.is_none());
        assert!(config.analysis.minimal_cover);
        assert!(config.limits.max_key_attributes.is_none());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = parse_config("[analysis]\nminimal_covers = true\n").expect_err("typo");
        assert!(format!("{err:#}").contains("minimal_covers"));
    }

    #[test]
    fn test_merge_defaults_match_pipeline_defaults() {
        let settings = ConfigMerger::new(FdkitConfig::default()).merge(&CliOverrides::default());
        assert_eq!(settings, AnalysisSettings::default());
    }

    #[test]
    fn test_merge_cli_extends_closures_and_wins_scalars() {
        let config = parse_config(
            r#"
[analysis]
schema = "ABC"
closures = ["A", "B"]

[limits]
max_key_attributes = 8
closure_round_limit = 3
"#,
        )
        .expect("parse config");

        let cli = CliOverrides {
            schema: Some("XYZ".to_string()),
            closures: vec!["B".to_string(), "C".to_string()],
            max_key_attributes: Some(4),
            ..CliOverrides::default()
        };
        let settings = ConfigMerger::new(config).merge(&cli);

        assert_eq!(settings.schema.as_deref(), Some("XYZ"));
        assert_eq!(settings.closures, vec!["A", "B", "C"]);
        assert_eq!(settings.max_key_attributes, Some(4));
        assert_eq!(settings.closure_round_limit, Some(3));
    }

    #[test]
    fn test_merge_no_flags_switch_sections_off() {
        let cli = CliOverrides {
            no_cover: true,
            no_normal_forms: true,
            ..CliOverrides::default()
        };
        let settings = ConfigMerger::new(FdkitConfig::default()).merge(&cli);
        assert!(!settings.minimal_cover);
        assert!(!settings.normal_forms);
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn test_explicit_path_beats_discovery() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        std::fs::write(root.join(CONFIG_FILE_NAME), "[analysis]\nschema = \"A\"\n")
            .expect("write discovered");
        let explicit = root.join("other.toml");
        std::fs::write(&explicit, "[analysis]\nschema = \"B\"\n").expect("write explicit");

        let cfg = load_or_default(Some(&explicit), &root).expect("load explicit");
        assert_eq!(cfg.analysis.schema.as_deref(), Some("B"));

        let cfg = load_or_default(None, &root).expect("load discovered");
        assert_eq!(cfg.analysis.schema.as_deref(), Some("A"));
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let cfg = load_or_default(None, &root).expect("load default");
        assert!(cfg.analysis.closures.is_empty());
        assert!(cfg.analysis.normal_forms);
    }
}
