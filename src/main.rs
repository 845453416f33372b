// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use wmtformat::app_config::{self, Config};
use wmtformat::app_controller::{Controller, UnwrapRequest};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract source, reference and system output text files from a corpus
    Unwrap(UnwrapArgs),

    /// Insert a hypothesis text file into a source corpus
    Wrap(WrapArgs),

    /// Convert a corpus to JSON
    #[command(name = "to-json")]
    ToJson(ToJsonArgs),

    /// Generate shell completions for wmtformat
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct UnwrapArgs {
    /// Corpus XML file (defaults to standard input)
    #[arg(short, long = "in-file", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Prefix of the output files
    #[arg(short, long = "out-stem")]
    out_stem: Option<String>,

    /// Which translator to use for the reference side
    #[arg(long)]
    translator: Option<String>,

    /// Which system output to extract
    #[arg(long, conflicts_with = "all_systems")]
    system: Option<String>,

    /// Extract the output of every system
    #[arg(long)]
    all_systems: bool,

    /// Message to insert when translations are missing
    #[arg(short, long = "missing-translation-message")]
    missing_message: Option<String>,

    /// Mark document boundaries by an empty line
    #[arg(short, long)]
    document_boundaries: bool,

    /// Do not output test suites
    #[arg(long)]
    no_testsuites: bool,

    /// Limit unwrapping to these collections
    #[arg(short, long, num_args = 1..)]
    collections: Vec<String>,
}

#[derive(Args, Debug)]
struct WrapArgs {
    /// XML source file
    #[arg(short, long = "source-file")]
    source_file: PathBuf,

    /// Text file containing translations, ordered as in the source file
    #[arg(short = 't', long = "hypo-file")]
    hypo_file: PathBuf,

    /// Name of the MT system
    #[arg(short, long)]
    name: Option<String>,

    /// Language of the translations (defaults to the corpus reference language)
    #[arg(short, long)]
    lang: Option<String>,

    /// Output file (defaults to standard output)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ToJsonArgs {
    /// Corpus XML file (defaults to standard input)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (defaults to standard output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(short, long)]
    pretty: bool,
}

/// wmtformat - wrap and unwrap WMT test sets
///
/// Extracts aligned plain-text streams from WMT XML corpora and inserts
/// system output back into them for submission.
#[derive(Parser, Debug)]
#[command(name = "wmtformat")]
#[command(version)]
#[command(about = "Wrap and unwrap WMT XML test sets")]
#[command(long_about = "wmtformat extracts aligned source, reference and system output text from WMT XML test sets,
and wraps plain-text system output back into the XML format for submission.

EXAMPLES:
    wmtformat unwrap -i newstest.xml -o newstest        # Write newstest.<src> and newstest.<ref>
    wmtformat unwrap -d --translator A < newstest.xml   # Reference from translator A, blank line between docs
    wmtformat unwrap -c general --no-testsuites -i t.xml # Only the 'general' collection, no test suites
    wmtformat wrap -s newstest.xml -t hyp.txt -n my-sys  # Wrapped XML on standard output
    wmtformat to-json -i newstest.xml --pretty           # JSON view of a test set
    wmtformat completions bash > wmtformat.bash          # Generate bash completions

CONFIGURATION:
    Defaults can be stored in a JSON file passed with --config. Command line
    flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, global = true, default_value = "wmtformat.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn colour_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {}: {}\x1B[0m",
                Self::colour_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Effective level is set once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "wmtformat", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Unwrap(args) => run_unwrap(config, args),
        Commands::Wrap(args) => run_wrap(config, args),
        Commands::ToJson(args) => {
            let controller = Controller::with_config(config)?;
            controller.run_to_json(args.input.as_deref(), args.output.as_deref(), args.pretty)
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn run_unwrap(mut config: Config, args: UnwrapArgs) -> Result<()> {
    // Override config with CLI options if provided
    if let Some(stem) = args.out_stem {
        config.output_stem = stem;
    }
    if let Some(message) = args.missing_message {
        config.missing_message = message;
    }
    config.document_boundaries |= args.document_boundaries;
    config.no_testsuites |= args.no_testsuites;

    let controller = Controller::with_config(config)?;
    let request = UnwrapRequest {
        input: args.input,
        translator: args.translator,
        system: args.system,
        all_systems: args.all_systems,
        collections: args.collections,
    };
    controller.run_unwrap(&request)?;
    Ok(())
}

fn run_wrap(mut config: Config, args: WrapArgs) -> Result<()> {
    if let Some(name) = args.name {
        config.system_name = name;
    }

    let controller = Controller::with_config(config)?;
    controller.run_wrap(
        &args.source_file,
        &args.hypo_file,
        args.lang.as_deref(),
        args.output.as_deref(),
    )
}
