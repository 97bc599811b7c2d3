use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dts_header_core::{TYPESCRIPT_VERSIONS, make_types_versions_for_package_json};
use dts_header_lint::{
    DEFAULT_CONFIG_FILE, DefinitionsRoot, LintConfig, LintReport, LintStatus, check_files,
};
use dts_header_parser::{Header, ParseMode, parse_header};

/// Exit code for a `check` run in which some header failed.
const EXIT_CHECK_FAILED: i32 = 2;

/// Output format for parsed headers and query results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

/// Output format for lint reports.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CheckOutputFormat {
    Json,
    Yaml,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "dts-header")]
#[command(about = "Parse and lint the metadata header of type-definition files")]
struct Cli {
    /// Log parser decisions to stderr (repeat for more detail).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse the header of a definition file.
    ParseFile(ParseFileArgs),
    /// Parse a header read from stdin.
    ParseStdin(ParseStdinArgs),
    /// Lint every package header under one or more definitions roots.
    Check(CheckArgs),
    /// Query the table of known TypeScript versions.
    Versions(VersionsArgs),
    /// Print the package.json `typesVersions` entry for the given versions.
    TypesVersions(TypesVersionsArgs),
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    /// Path to the definition file.
    #[arg(long)]
    input: PathBuf,
    /// Reject legacy constructs.
    #[arg(long)]
    strict: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    /// Reject legacy constructs.
    #[arg(long)]
    strict: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Definitions roots to scan.
    #[arg(required = true)]
    roots: Vec<PathBuf>,
    /// Lint configuration file (default: `.dts-header.yml` in the first root, if present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Check in lenient mode regardless of the configuration.
    #[arg(long)]
    lenient: bool,
    /// Number of parallel parse jobs.
    #[arg(long)]
    jobs: Option<usize>,
    /// Output format for the report.
    #[arg(long, default_value = "table")]
    format: CheckOutputFormat,
}

#[derive(Debug, Args)]
struct VersionsArgs {
    #[command(subcommand)]
    query: Option<VersionsQuery>,
    /// Output format.
    #[arg(long, global = true, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Subcommand)]
enum VersionsQuery {
    /// Every known version, deprecated ones first.
    List,
    /// Versions that are still supported.
    Supported,
    /// Supported versions at or above a minimum.
    Range {
        #[arg(long)]
        min: String,
    },
    /// The supported version before the given one.
    Previous { version: String },
    /// Distribution tags to repoint when the given version ships.
    Tags { version: String },
    /// Whether the given version understands header redirection.
    Redirectable { version: String },
}

#[derive(Debug, Args)]
struct TypesVersionsArgs {
    /// Versions that get their own `ts<version>/` directory.
    #[arg(required = true)]
    versions: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::ParseFile(args) => run_parse_file(args),
        Command::ParseStdin(args) => run_parse_stdin(args),
        Command::Check(args) => run_check(args),
        Command::Versions(args) => run_versions(args),
        Command::TypesVersions(args) => run_types_versions(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_parse_file(args: ParseFileArgs) -> Result<(), String> {
    let text = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    run_parse_text(&text, ParseMode::from_strict(args.strict), args.format)
}

fn run_parse_stdin(args: ParseStdinArgs) -> Result<(), String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;
    run_parse_text(&text, ParseMode::from_strict(args.strict), args.format)
}

fn run_parse_text(text: &str, mode: ParseMode, format: CliOutputFormat) -> Result<(), String> {
    let header: Header = parse_header(text, mode).map_err(|err| err.to_string())?;
    print!("{}", render(&header, format)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// check command
// ---------------------------------------------------------------------------

fn run_check(args: CheckArgs) -> Result<(), String> {
    let mut config = load_check_config(&args)?;
    if args.lenient {
        config.mode = ParseMode::Lenient;
    }
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    config.validate().map_err(|err| err.to_string())?;

    let mut packages = Vec::new();
    for root in &args.roots {
        let definitions = DefinitionsRoot::scan(root, &config).map_err(|err| err.to_string())?;
        debug!(root = %root.display(), packages = definitions.len(), "scanned definitions root");
        packages.extend_from_slice(definitions.packages());
    }

    let report = check_files(&packages, config.mode, config.jobs);
    match args.format {
        CheckOutputFormat::Json => print!("{}", render(&report, CliOutputFormat::Json)?),
        CheckOutputFormat::Yaml => print!("{}", render(&report, CliOutputFormat::Yaml)?),
        CheckOutputFormat::Table => print!("{}", report_to_table(&report)),
    }

    if !report.is_clean() {
        eprintln!(
            "{} of {} header(s) failed.",
            report.failure_count(),
            report.outcomes.len()
        );
        std::process::exit(EXIT_CHECK_FAILED);
    }
    Ok(())
}

fn load_check_config(args: &CheckArgs) -> Result<LintConfig, String> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => match args.roots.first().map(|root| root.join(DEFAULT_CONFIG_FILE)) {
            Some(path) if path.is_file() => path,
            _ => return Ok(LintConfig::default()),
        },
    };
    LintConfig::load(&path)
        .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))
}

fn report_to_table(report: &LintReport) -> String {
    let mut out = String::new();
    for outcome in &report.outcomes {
        let line = match &outcome.status {
            LintStatus::Valid { header } => format!(
                "{:<30} {:<5} {} {} (TypeScript {})",
                outcome.package,
                "OK",
                header.library_name,
                header.version_label(),
                header.typescript_version
            ),
            LintStatus::Invalid { message, .. } => {
                format!("{:<30} {:<5} {message}", outcome.package, "FAIL")
            }
            LintStatus::Unreadable { message } => {
                format!("{:<30} {:<5} {message}", outcome.package, "ERROR")
            }
        };
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!(
        "{} checked, {} passed, {} failed ({} mode)\n",
        report.outcomes.len(),
        report.valid_count(),
        report.failure_count(),
        mode_name(report.mode)
    ));
    out
}

fn mode_name(mode: ParseMode) -> &'static str {
    match mode {
        ParseMode::Strict => "strict",
        ParseMode::Lenient => "lenient",
    }
}

// ---------------------------------------------------------------------------
// version table queries
// ---------------------------------------------------------------------------

fn run_versions(args: VersionsArgs) -> Result<(), String> {
    let table = &TYPESCRIPT_VERSIONS;
    let output = match args.query.unwrap_or(VersionsQuery::List) {
        VersionsQuery::List => render(&table.all().collect::<Vec<_>>(), args.format)?,
        VersionsQuery::Supported => render(&table.supported(), args.format)?,
        VersionsQuery::Range { min } => render(&table.range(&min), args.format)?,
        VersionsQuery::Previous { version } => {
            require_supported(&version)?;
            render(&table.previous(&version), args.format)?
        }
        VersionsQuery::Tags { version } => {
            require_supported(&version)?;
            render(&table.tags_to_update(&version), args.format)?
        }
        VersionsQuery::Redirectable { version } => {
            require_known(&version)?;
            render(&table.is_redirectable(&version), args.format)?
        }
    };
    print!("{output}");
    Ok(())
}

fn require_known(version: &str) -> Result<(), String> {
    if TYPESCRIPT_VERSIONS.is_known(version) {
        Ok(())
    } else {
        Err(format!("unknown TypeScript version '{version}'"))
    }
}

fn require_supported(version: &str) -> Result<(), String> {
    if TYPESCRIPT_VERSIONS.is_supported(version) {
        Ok(())
    } else {
        Err(format!("TypeScript {version} is not a supported version"))
    }
}

fn run_types_versions(args: TypesVersionsArgs) -> Result<(), String> {
    for version in &args.versions {
        require_known(version)?;
    }
    let types_versions = make_types_versions_for_package_json(args.versions.as_slice());
    print!("{}", render(&types_versions, CliOutputFormat::Json)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

fn render<T: Serialize + ?Sized>(value: &T, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|json| format!("{json}\n"))
            .map_err(|err| format!("Failed to serialize output: {err}")),
        CliOutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|err| format!("Failed to serialize output: {err}")),
    }
}
