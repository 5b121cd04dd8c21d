//! datespan CLI - date parsing and calendar bucketing from the shell.

use anyhow::Result;
use chrono_tz::Tz;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "datespan")]
#[command(about = "Parse dates and slice them into calendar buckets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// IANA timezone for inputs without an embedded offset
    #[arg(short, long, global = true, default_value = "America/New_York")]
    timezone: String,

    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse date inputs and report instant and precision
    Parse {
        /// Layout strings, epoch numbers, Excel serials, or keywords
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// List the bucket keys a date range touches
    Keys {
        /// Range start (any accepted date input)
        from: String,

        /// Range end (any accepted date input)
        to: String,

        /// Bucket granularity (day, week, month, year)
        #[arg(short, long, default_value = "day")]
        granularity: String,
    },

    /// Show the tightest range covering every given input
    Span {
        /// Layout strings, epoch numbers, Excel serials, or keywords
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Validate bucket keys and show the ranges they cover
    Check {
        /// Bucket keys (YYYY, YYYY-MM, YYYY-Www, or YYYY-MM-DD)
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Parse a sampling interval string
    Interval {
        /// Resolution string, e.g. 30s, 5, 1h, 2w, 3m
        resolution: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let tz: Tz = cli
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown timezone: {}", cli.timezone))?;

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Parse { inputs } => commands::parse::parse_inputs(&inputs, tz, cli.json),
        Commands::Keys {
            from,
            to,
            granularity,
        } => commands::keys::list_keys(&from, &to, &granularity, tz, cli.json),
        Commands::Span { inputs } => commands::span::span_inputs(&inputs, tz, cli.json),
        Commands::Check { keys } => commands::check::check_keys(&keys, tz, cli.json),
        Commands::Interval { resolution } => {
            commands::interval::show_interval(&resolution, cli.json)
        }
    }
}
