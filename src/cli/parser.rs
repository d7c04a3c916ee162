use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for QuickTrack
/// Personal time tracking with SQLite storage and break compliance checks
#[derive(Parser)]
#[command(
    name = "quicktrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Personal time tracking: log what you work on, check mandatory breaks, see your balance",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Log what you are working on from now on
    Log {
        /// "project: message" or just "message"
        text: String,

        #[arg(
            long,
            short,
            help = "Entry mode: normal, break, quit, export, offtime"
        )]
        mode: Option<String>,

        #[arg(long = "at", help = "Time of the entry (HH:MM), default now")]
        at: Option<String>,

        #[arg(long, help = "Date of the entry (YYYY-MM-DD), default today")]
        date: Option<String>,
    },

    /// Start a break
    Break {
        /// Optional "project: message"
        text: Option<String>,

        #[arg(long = "at", help = "Time of the break (HH:MM), default now")]
        at: Option<String>,
    },

    /// End the working day
    Quit {
        #[arg(long = "at", help = "Time of the end (HH:MM), default now")]
        at: Option<String>,
    },

    /// Remove the latest entry of today
    Undo,

    /// List entries per day
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(
            long,
            short,
            help = "Number of days back (1 = today), week or month"
        )]
        days: Option<String>,
    },

    /// Search entries by word prefix
    Search {
        #[arg(required = true)]
        text: Vec<String>,

        #[arg(long, short, help = "Number of days back (1 = today), week, month or *")]
        days: Option<String>,
    },

    /// List projects with their counted time
    Projects,

    /// Change one entry
    Edit {
        id: i64,

        #[arg(long)]
        message: Option<String>,

        #[arg(long)]
        project: Option<String>,

        #[arg(long)]
        mode: Option<String>,

        #[arg(long, help = "New time of day (HH:MM)")]
        time: Option<String>,
    },

    /// Delete one entry
    Del { id: i64 },

    /// Show the time balance per month
    Total,

    /// Check mandatory breaks
    Breaks {
        #[arg(
            long,
            value_name = "RANGE",
            help = "Days to check (YYYY, YYYY-MM, YYYY-MM-DD, A:B or all), default current month"
        )]
        range: Option<String>,

        #[arg(long, help = "Store the inserted breaks")]
        apply: bool,
    },

    /// Export break-adjusted entries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, help = "Include entries of every mode")]
        all: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Audit {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long, help = "Only the newest N rows")]
        last: Option<usize>,
    },
}
