use anyhow::Context;
use clap::{Parser, Subcommand};
use fs_err as fs;
use std::path::Path;
use std::process::Command as ProcessCommand;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print schema identifiers used by fdkit.
    PrintSchemas,
    /// Scaffold tests/fixtures/<name> with an empty input.fds.
    NewFixture {
        name: String,
    },
    /// Bless golden fixtures (overwrite expected outputs).
    BlessFixtures,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!("{}", fdkit_types::schema::FDKIT_REPORT_V1);
        }
        Command::NewFixture { name } => {
            let dir = Path::new("tests").join("fixtures").join(&name);
            if dir.exists() {
                anyhow::bail!("fixture {} already exists", dir.display());
            }
            fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
            fs::write(dir.join("input.fds"), "")?;
            fs::write(dir.join("closures.txt"), "")?;
            println!(
                "initialized {}; add a golden_{name} test, then run `cargo run -p xtask -- bless-fixtures`",
                dir.display()
            );
        }
        Command::BlessFixtures => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "fdkit-core", "--test", "golden_fixtures"])
                .env("FDKIT_BLESS", "1")
                .status()
                .context("run golden fixture blessing")?;
            if !status.success() {
                anyhow::bail!("bless-fixtures failed");
            }
        }
    }
    Ok(())
}
