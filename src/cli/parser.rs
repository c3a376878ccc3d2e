use clap::{Parser, Subcommand};

/// Command-line interface definition for tire
#[derive(Parser)]
#[command(
    name = "tire",
    version = env!("CARGO_PKG_VERSION"),
    about = "Simple Time Recording tool: track work sessions per project using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db", value_name = "FILENAME")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new database (and the configuration file)
    Init,

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Start working on a project
    Begin {
        /// Project name
        project: String,

        #[arg(
            long = "at",
            value_name = "TIMESTAMP",
            help = "Begin time (default: now). A bare time (HH:MM) means today at that time"
        )]
        at: Option<String>,
    },

    /// Stop working on the open project
    End {
        /// Project name (optional, must match the open project)
        project: Option<String>,

        #[arg(
            long = "at",
            value_name = "TIMESTAMP",
            help = "End time (default: now). A bare time (HH:MM) means today at that time"
        )]
        at: Option<String>,
    },

    /// Show the currently open session
    Status,

    /// List records
    List {
        #[arg(long, short, help = "Only records of this project")]
        project: Option<String>,

        #[arg(long = "open", help = "Only the open record", conflicts_with = "project")]
        open: bool,
    },

    /// Report time per day, week, month or year
    Report {
        #[arg(
            long,
            short,
            value_name = "DATE",
            help = "Reference date: YYYY-MM-DD, today or yesterday (default: today)"
        )]
        date: Option<String>,

        #[arg(long, value_name = "PERIOD", help = "day, week, month or year")]
        period: Option<String>,

        #[arg(long, short, help = "Sum durations per project")]
        accumulate: bool,

        #[arg(long, help = "List raw records", conflicts_with = "accumulate")]
        raw: bool,
    },

    /// View or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Add a project
    Add {
        /// Project name
        name: String,
    },

    /// List all projects
    List,
}
