//! CLI argument definitions for the medicines client.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "medicines",
    version,
    about = "Medicines inventory client",
    long_about = "Browse and edit a medicines inventory served over HTTP.\n\n\
                  Every listing includes a data quality report: missing names,\n\
                  unusable prices and duplicate entries are flagged."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config file and MEDICINES_API_URL).
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show all medicines with the data quality report.
    List {
        /// Print the list container markup instead of text.
        #[arg(long = "html")]
        html: bool,
    },

    /// Add a medicine.
    Add(MedicineArgs),

    /// Update the medicine currently named ORIGINAL.
    Update {
        #[arg(value_name = "ORIGINAL")]
        original: String,

        #[command(flatten)]
        fields: MedicineArgs,
    },

    /// Delete a medicine by name.
    Delete {
        #[arg(value_name = "NAME")]
        name: String,

        /// Skip the confirmation prompt.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Show the average price.
    Average,

    /// Interactive session.
    Shell,
}

#[derive(Parser, Debug)]
pub struct MedicineArgs {
    /// Medicine name.
    #[arg(long = "name")]
    pub name: String,

    /// Price, as typed into the form.
    #[arg(long = "price", allow_hyphen_values = true)]
    pub price: String,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
