use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use msbuild_finder::config::{self, Config};
use msbuild_finder::discovery::{find_mono_vm, register_default_finders};
use msbuild_finder::logging;
use msbuild_finder::search::{FinderRegistry, Searcher};
use msbuild_finder::tool::ToolEntry;
use msbuild_finder::version::compile_matcher;

#[derive(Parser)]
#[command(name = "msbuild-finder")]
#[command(version, about = "Locate MSBuild, XBuild and dotnet build installations")]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for this tool (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List build tools matching a filter such as "msbuild >=15 | xbuild"
    Find(FindArgs),
    /// Check whether a version satisfies a constraint such as "15.<9"
    Check { constraint: String, version: String },
    /// Show the Mono VM found on PATH
    Mono,
}

#[derive(Args, Default)]
struct FindArgs {
    filter: Option<String>,

    /// Print only the best match
    #[arg(long)]
    first: bool,

    /// Print entries as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(config::config_path);
    let config = Config::load(&config_path)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let _guard = logging::init(level, config.log_file_path().as_deref())?;
    debug!("Loaded config from {:?}", config_path);

    match cli.command.unwrap_or(Command::Find(FindArgs::default())) {
        Command::Find(args) => find(&config, args),
        Command::Check {
            constraint,
            version,
        } => check(&constraint, &version),
        Command::Mono => mono(),
    }
}

fn find(config: &Config, args: FindArgs) -> anyhow::Result<ExitCode> {
    let mut registry = FinderRegistry::new();
    register_default_finders(&mut registry, &config.finders);
    let searcher = Searcher::with_registry(&registry);

    let filter = args.filter.as_deref().or(config.default_filter.as_deref());
    let mut entries = searcher
        .find(filter)
        .with_context(|| format!("Invalid filter: {}", filter.unwrap_or_default()))?;
    if args.first {
        entries.truncate(1);
    }

    if entries.is_empty() {
        return Ok(ExitCode::FAILURE);
    }

    print_entries(&entries, args.json)?;
    Ok(ExitCode::SUCCESS)
}

fn print_entries(entries: &[ToolEntry], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
    } else {
        for entry in entries {
            println!("{entry}");
        }
    }
    Ok(())
}

fn check(constraint: &str, version: &str) -> anyhow::Result<ExitCode> {
    let matcher = compile_matcher(constraint)
        .with_context(|| format!("Invalid constraint: {constraint}"))?;
    let matched = matcher
        .matches_str(version)
        .with_context(|| format!("Invalid version: {version}"))?;

    println!("{version} {} {matcher}", if matched { "matches" } else { "does not match" });
    Ok(if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn mono() -> anyhow::Result<ExitCode> {
    match find_mono_vm() {
        Some(vm) => {
            println!("{vm}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("mono not found");
            Ok(ExitCode::FAILURE)
        }
    }
}
