mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use config::{CliOverrides, ConfigMerger};
use fdkit_core::adapters::{FsDependencySource, FsWritePort, StdinDependencySource};
use fdkit_core::pipeline::{AnalysisOutcome, ToolError, run_analysis, write_analysis_artifacts};
use fdkit_core::ports::DependencySource;
use fdkit_core::settings::AnalysisSettings;
use fdkit_types::report::ToolInfo;
use serde::Serialize;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "fdkit",
    version,
    about = "Reason about functional dependencies: closures, keys, minimal covers, BCNF/3NF."
)]
struct Cli {
    /// Config file (default: ./fdkit.toml when present).
    #[arg(long, global = true, env = "FDKIT_CONFIG")]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run every analysis and emit the full report.
    Analyze(AnalyzeArgs),
    /// Compute the closure of one or more attribute sets, with derivation steps.
    Closure(ClosureArgs),
    /// List candidate keys and prime attributes.
    Keys(InputArgs),
    /// Compute a minimal cover and the log of each phase.
    Cover(InputArgs),
    /// Classify every dependency against a normal form.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Dependency file, one `lhs->rhs` per line (`-` for stdin).
    #[arg(long, short, default_value = "-")]
    input: Utf8PathBuf,

    /// Declared relation schema, e.g. `ABCDEF`.
    #[arg(long)]
    schema: Option<String>,

    /// Refuse key search over more attributes than this.
    #[arg(long)]
    max_key_attributes: Option<usize>,

    /// Closure round bound (default: the dependency count).
    #[arg(long)]
    closure_round_limit: Option<usize>,
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Attribute set to close over; may be repeated.
    #[arg(long = "closure")]
    closures: Vec<String>,

    /// Skip the minimal cover.
    #[arg(long, default_value_t = false)]
    no_cover: bool,

    /// Skip the BCNF/3NF checks.
    #[arg(long, default_value_t = false)]
    no_normal_forms: bool,

    /// Write report.json here instead of printing it.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Args)]
struct ClosureArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Attribute set to close over; may be repeated.
    #[arg(long, required = true)]
    attrs: Vec<String>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Normal form to check against.
    #[arg(long, value_enum)]
    form: FormArg,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormArg {
    Bcnf,
    #[value(name = "3nf")]
    Third,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match real_main() {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            error!("{:#}", e);
            let code = e.downcast_ref::<ToolError>().map_or(1, ToolError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    match cli.cmd {
        Command::Analyze(args) => cmd_analyze(args, config_path),
        Command::Closure(args) => cmd_closure(args, config_path),
        Command::Keys(args) => cmd_keys(args, config_path),
        Command::Cover(args) => cmd_cover(args, config_path),
        Command::Check(args) => cmd_check(args, config_path),
    }
}

fn cmd_analyze(args: AnalyzeArgs, config_path: Option<&Utf8Path>) -> anyhow::Result<()> {
    let mut overrides = overrides(&args.input);
    overrides.closures = args.closures;
    overrides.no_cover = args.no_cover;
    overrides.no_normal_forms = args.no_normal_forms;

    let settings = merged_settings(config_path, &overrides)?;
    let outcome = analyse(&settings, &args.input.input)?;

    match args.out_dir {
        Some(out_dir) => {
            write_analysis_artifacts(&outcome, &out_dir, &FsWritePort)
                .with_context(|| format!("write artifacts to {}", out_dir))?;
            info!("wrote report to {}", out_dir.join("report.json"));
            Ok(())
        }
        None => print_json(&outcome.report),
    }
}

fn cmd_closure(args: ClosureArgs, config_path: Option<&Utf8Path>) -> anyhow::Result<()> {
    let mut settings = merged_settings(config_path, &overrides(&args.input))?;
    settings.closures = args.attrs;
    settings.candidate_keys = false;
    settings.minimal_cover = false;
    settings.normal_forms = false;

    let outcome = analyse(&settings, &args.input.input)?;
    print_json(&outcome.report.closures)
}

#[derive(Serialize)]
struct KeysOutput<'a> {
    attributes: &'a str,
    keys: &'a [String],
    prime_attributes: &'a str,
}

fn cmd_keys(args: InputArgs, config_path: Option<&Utf8Path>) -> anyhow::Result<()> {
    let mut settings = merged_settings(config_path, &overrides(&args))?;
    settings.closures.clear();
    settings.minimal_cover = false;
    settings.normal_forms = false;

    let outcome = analyse(&settings, &args.input)?;
    let report = &outcome.report;
    print_json(&KeysOutput {
        attributes: &report.attributes,
        keys: &report.keys,
        prime_attributes: &report.prime_attributes,
    })
}

fn cmd_cover(args: InputArgs, config_path: Option<&Utf8Path>) -> anyhow::Result<()> {
    let mut settings = merged_settings(config_path, &overrides(&args))?;
    settings.closures.clear();
    settings.candidate_keys = false;
    settings.minimal_cover = true;
    settings.normal_forms = false;

    let outcome = analyse(&settings, &args.input)?;
    let cover = outcome
        .report
        .minimal_cover
        .context("minimal cover missing from report")?;
    print_json(&cover)
}

fn cmd_check(args: CheckArgs, config_path: Option<&Utf8Path>) -> anyhow::Result<()> {
    let mut settings = merged_settings(config_path, &overrides(&args.input))?;
    settings.closures.clear();
    settings.candidate_keys = false;
    settings.minimal_cover = false;
    settings.normal_forms = true;

    let outcome = analyse(&settings, &args.input.input)?;
    let forms = outcome
        .report
        .normal_forms
        .context("normal forms missing from report")?;
    let verdicts = match args.form {
        FormArg::Bcnf => forms.bcnf,
        FormArg::Third => forms.third_nf,
    };
    print_json(&verdicts)
}

fn overrides(args: &InputArgs) -> CliOverrides {
    CliOverrides {
        schema: args.schema.clone(),
        max_key_attributes: args.max_key_attributes,
        closure_round_limit: args.closure_round_limit,
        ..CliOverrides::default()
    }
}

fn merged_settings(
    config_path: Option<&Utf8Path>,
    overrides: &CliOverrides,
) -> anyhow::Result<AnalysisSettings> {
    let file_config = config::load_or_default(config_path, Utf8Path::new("."))
        .context("load fdkit.toml config")?;
    let settings = ConfigMerger::new(file_config).merge(overrides);
    debug!("merged settings: {:?}", settings);
    Ok(settings)
}

fn analyse(settings: &AnalysisSettings, input: &Utf8Path) -> anyhow::Result<AnalysisOutcome> {
    let source: Box<dyn DependencySource> = if input.as_str() == "-" {
        Box::new(StdinDependencySource)
    } else {
        Box::new(FsDependencySource::new(input.to_path_buf()))
    };
    Ok(run_analysis(settings, source.as_ref(), tool_info())?)
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "fdkit".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}
