use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for hoslog
/// CLI application to record duty-status events and manage daily HOS logs
#[derive(Parser)]
#[command(
    name = "hoslog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record driver duty-status events, build daily Hours-of-Service logs, and manage certification",
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

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
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

    /// Print the internal operations log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the driver registry
    Driver {
        #[arg(long = "add", value_name = "USERNAME", help = "Register a new driver")]
        add: Option<String>,

        #[arg(long = "first", help = "Driver first name (with --add)")]
        first_name: Option<String>,

        #[arg(long = "last", help = "Driver last name (with --add)")]
        last_name: Option<String>,

        #[arg(long = "list", help = "List registered drivers")]
        list: bool,
    },

    /// Ingest a batch of duty-status events for a driver
    Sync {
        /// Driver username
        driver: String,

        /// JSON file holding the event batch (array of events)
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Submit per-day form metadata for a driver's log
    Form {
        /// Driver username
        driver: String,

        /// Log date (YYYY-MM-DD)
        date: String,

        /// JSON file holding a flat object of form fields
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        /// Inline form field (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Certify a day's log with a signature
    Certify {
        /// Driver username
        driver: String,

        /// Log date (YYYY-MM-DD)
        date: String,

        /// Signature text (stored as opaque bytes)
        #[arg(long, conflicts_with = "sig_file")]
        signature: Option<String>,

        /// File holding the signature bytes
        #[arg(long = "sig-file", value_name = "FILE")]
        sig_file: Option<String>,

        /// Name of the certifier (defaults to the driver)
        #[arg(long)]
        certifier: Option<String>,
    },

    /// Show the last days of a driver's logs
    Logs {
        /// Driver username
        driver: String,

        /// Number of days to include, ending today (default from config)
        #[arg(long)]
        days: Option<i64>,

        /// Emit the raw day views as JSON
        #[arg(long)]
        json: bool,

        /// Also list each day's individual events
        #[arg(long)]
        events: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export duty-event data
    Export {
        /// Driver username
        driver: String,

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

        #[arg(long, short = 'f')]
        force: bool,
    },
}
