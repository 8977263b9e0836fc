use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Virtual Chemistry Lab Contributors",
    version,
    about = "chemlab - a terminal virtual chemistry lab: add elements and compounds to a beaker, heat and stir it, and watch the notebook.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a lab session from a script file, or from standard input.
    Run(RunArgs),
    /// Browse the reference catalog of elements, compounds and equipment.
    Catalog(CatalogArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Session script, one action per line. Reads standard input when omitted.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Path to a lab configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use a catalog file instead of the built-in catalog.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    // --- Beaker Overrides ---
    /// Override the starting temperature in degrees Celsius.
    #[arg(long, value_name = "FLOAT")]
    pub initial_temperature: Option<f64>,

    /// Override the temperature ceiling in degrees Celsius.
    #[arg(long, value_name = "FLOAT")]
    pub max_temperature: Option<f64>,

    /// Override how many degrees one use of the Bunsen burner adds.
    #[arg(long, value_name = "FLOAT")]
    pub heat_increment: Option<f64>,

    // --- Timing Overrides ---
    /// Override the simulated reaction time in milliseconds.
    #[arg(long, value_name = "MS")]
    pub reaction_delay_ms: Option<u64>,

    /// Override the stirring animation time in milliseconds.
    #[arg(long, value_name = "MS")]
    pub stir_delay_ms: Option<u64>,

    /// Advance simulated time instantly instead of waiting in real time.
    #[arg(long)]
    pub instant: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S beaker.max-temperature=250
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `catalog` subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,

    /// Use a catalog file instead of the built-in catalog.
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List elements, optionally filtered by name or symbol.
    Elements {
        #[arg(short, long, value_name = "TEXT")]
        search: Option<String>,
    },
    /// List compounds, optionally filtered by name or formula.
    Compounds {
        #[arg(short, long, value_name = "TEXT")]
        search: Option<String>,
    },
    /// List equipment, optionally limited to what a school grade may use.
    Equipment {
        #[arg(short, long, value_name = "GRADE")]
        grade: Option<u8>,
    },
}
