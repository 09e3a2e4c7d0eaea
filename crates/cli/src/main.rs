mod table;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use optenv_schema::{Report, run_table};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use crate::table::load_table;

#[derive(Parser)]
#[command(name = "optenv", disable_help_subcommand = true)]
#[command(version, about = "Inspect and exercise declarative option tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the help text the parser renders for a table
    Help(TableArgs),

    /// Check a table (and nested command tables) for definition defects
    Check(TableArgs),

    /// Parse an argument vector against a table and report what happened
    Parse(ParseArgs),
}

#[derive(Parser)]
struct TableArgs {
    /// Path to the option table (JSON)
    #[arg(value_name = "TABLE")]
    table: PathBuf,
}

#[derive(Parser)]
struct ParseArgs {
    /// Path to the option table (JSON)
    #[arg(value_name = "TABLE")]
    table: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Arguments to parse (pass after `--`)
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

fn main() -> Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Help(args) => help(args),
        Commands::Check(args) => check(args),
        Commands::Parse(args) => parse(args),
    }
}

fn help(args: TableArgs) -> Result<()> {
    tracing::debug!("executing help command");
    let table = load_table(&args.table)?;
    print!("{}", table.help());
    Ok(())
}

fn check(args: TableArgs) -> Result<()> {
    tracing::debug!("executing check command");
    let table = load_table(&args.table)?;
    table
        .check()
        .with_context(|| format!("invalid option table: {}", args.table.display()))?;
    eprintln!("OK: {}", args.table.display());
    Ok(())
}

fn parse(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");
    let table = load_table(&args.table)?;
    if let Err(err) = table.check() {
        tracing::warn!("{err}");
    }

    let report = run_table(&table, &args.args);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, 0);
    }

    if !report.ok {
        std::process::exit(1);
    }
    Ok(())
}

fn print_report(report: &Report, depth: usize) {
    let pad = "  ".repeat(depth);
    println!("{pad}{}:", report.command);
    for invocation in &report.invocations {
        if invocation.values.is_empty() {
            println!("{pad}  {}", invocation.option);
        } else {
            println!("{pad}  {} {}", invocation.option, invocation.values.join(" "));
        }
        if let Some(sub) = &invocation.subcommand {
            print_report(sub, depth + 2);
        }
    }
    for error in &report.errors {
        println!("{pad}  error: {error}");
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
