//! Payroll export consistency checker.
//!
//! Validates dataset folders (GTN export, Payrun export, `mapping.json`)
//! and prints one verdict per check. See `gtncheck checks` for the list.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use gtncheck::core::verdict::CheckId;
use gtncheck::exit_codes;
use gtncheck::io::config::{CONFIG_FILE, ValidatorConfig, load_config};
use gtncheck::io::dataset::discover_datasets;
use gtncheck::logging;
use gtncheck::report::{aggregate, render_json, render_text};
use gtncheck::run::run_datasets;

#[derive(Parser)]
#[command(
    name = "gtncheck",
    version,
    about = "Structural consistency checks for GTN and Payrun payroll exports"
)]
struct Cli {
    /// Config file (default: `gtncheck.toml` in the working directory, if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every check on each dataset folder.
    Run {
        /// Dataset folders to validate.
        datasets: Vec<PathBuf>,
        /// Also validate every subfolder of this directory.
        #[arg(long)]
        root: Option<PathBuf>,
        /// Run only these checks (label or number, repeatable). Default: all.
        #[arg(long = "check", value_name = "CHECK")]
        checks: Vec<CheckId>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the dataset folders found under a directory.
    List {
        #[arg(long)]
        root: PathBuf,
    },
    /// Print the check identifiers and what each one verifies.
    Checks,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            datasets,
            root,
            checks,
            format,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            cmd_run(&config, datasets, root.as_deref(), &checks, format)
        }
        Command::List { root } => cmd_list(&root),
        Command::Checks => cmd_checks(),
    }
}

fn resolve_config(explicit: Option<&Path>) -> Result<ValidatorConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} not found", path.display());
            }
            load_config(path)
        }
        None => load_config(Path::new(CONFIG_FILE)),
    }
}

fn cmd_run(
    config: &ValidatorConfig,
    mut datasets: Vec<PathBuf>,
    root: Option<&Path>,
    checks: &[CheckId],
    format: Format,
) -> Result<i32> {
    if let Some(root) = root {
        datasets.extend(discover_datasets(root).context("discover datasets")?);
    }
    if datasets.is_empty() {
        bail!("no datasets given: pass dataset folders or --root");
    }
    let selected = if checks.is_empty() {
        CheckId::ALL.as_slice()
    } else {
        checks
    };
    debug!(datasets = datasets.len(), checks = selected.len(), ?format, "running checks");

    let reports = run_datasets(&datasets, config, selected);
    let summary = aggregate(&reports);
    match format {
        Format::Text => print!("{}", render_text(&reports, &summary)),
        Format::Json => print!("{}", render_json(&reports, &summary)?),
    }
    Ok(summary.exit_code())
}

fn cmd_list(root: &Path) -> Result<i32> {
    for dataset in discover_datasets(root).context("discover datasets")? {
        println!("{}", dataset.display());
    }
    Ok(exit_codes::OK)
}

fn cmd_checks() -> Result<i32> {
    for check in CheckId::ALL {
        println!("{} {} {}", check.number(), check, check.title());
    }
    Ok(exit_codes::OK)
}
