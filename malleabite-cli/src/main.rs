mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "malleabite")]
#[command(about = "Inspect how Malleabite lays out overlapping calendar events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show each event's column and horizontal placement for a day
    Layout {
        /// Event file (.ics, or a JSON array of events)
        file: PathBuf,

        /// Day to lay out (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Time zone for the day view (e.g. "Europe/Berlin")
        #[arg(long)]
        tz: Option<String>,

        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the overlap groups for a day
    Groups {
        /// Event file (.ics, or a JSON array of events)
        file: PathBuf,

        /// Day to group (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Time zone for the day view (e.g. "Europe/Berlin")
        #[arg(long)]
        tz: Option<String>,
    },
    /// Show the config path, or create a default config file
    Config {
        /// Write a commented default config if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout {
            file,
            date,
            tz,
            json,
        } => {
            let day = commands::DayView::load(&file, date.as_deref(), tz.as_deref())?;
            commands::layout::run(day, json)
        }
        Commands::Groups { file, date, tz } => {
            let day = commands::DayView::load(&file, date.as_deref(), tz.as_deref())?;
            commands::groups::run(day)
        }
        Commands::Config { init } => commands::config::run(init),
    }
}
