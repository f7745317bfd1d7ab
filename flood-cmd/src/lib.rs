//! Command implementations for the flood outlook CLI.
//!
//! Provides subcommands for computing outlook tabs from a forecast file or
//! URL, keeping a cached forecast refreshed on a schedule, and printing the
//! risk lookup matrix.

use clap::{Subcommand, ValueEnum};

pub mod load;
pub mod matrix;
pub mod outlook;
pub mod watch;

/// Output format for the outlook command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the outlook tabs for a place
    Outlook {
        /// Forecast document: a file path or an http(s) URL
        #[arg(short = 'f', long)]
        forecast: String,

        /// Place descriptor JSON file with name and bbox2k
        #[arg(short = 'p', long)]
        place: String,

        /// Treat this date (YYYY-MM-DD) as today instead of the local date
        #[arg(long)]
        today: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Keep a cached forecast refreshed and log the outlook for a place
    Watch {
        /// Forecast API URL
        #[arg(short = 'u', long)]
        url: String,

        /// Place descriptor JSON file with name and bbox2k
        #[arg(short = 'p', long)]
        place: String,

        /// Seconds between refreshes
        #[arg(long, default_value_t = 900)]
        interval_secs: u64,

        /// Stop after this many refreshes (runs forever when omitted)
        #[arg(long)]
        iterations: Option<u32>,
    },

    /// Print the impact/likelihood risk lookup matrix
    Matrix,
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Outlook {
            forecast,
            place,
            today,
            format,
            output,
        } => {
            outlook::run_outlook(&forecast, &place, today.as_deref(), format, output.as_deref())
                .await
        }
        Command::Watch {
            url,
            place,
            interval_secs,
            iterations,
        } => watch::run_watch(&url, &place, interval_secs, iterations).await,
        Command::Matrix => {
            print!("{}", matrix::render_matrix());
            Ok(())
        }
    }
}
