//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod notify;

/// Huddle CLI - track support cases and huddle session notes
#[derive(Parser, Debug)]
#[command(name = "huddle", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.huddle/huddle.db)
    #[arg(long, global = true, env = "HUDDLE_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Case management
    Case {
        #[command(subcommand)]
        command: CaseCommands,
    },

    /// Huddle session management
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Product/service area vocabulary
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Label vocabulary
    Label {
        #[command(subcommand)]
        command: LabelCommands,
    },

    /// Clear all data: cases, products, and labels
    Clear {
        /// Skip confirmation and clear
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Case Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum CaseCommands {
    /// Add a new case (all fields optional; empty values accepted)
    Add(CaseAddArgs),

    /// List cases as a filterable, sortable table
    List(CaseListArgs),

    /// Show one case with its huddle sessions
    Show {
        /// Case index (1-based, as shown by `case list`)
        index: usize,
    },

    /// Delete a case and all of its sessions
    Delete {
        /// Case index (1-based)
        index: usize,
    },

    /// Replace all cases with rows imported from a CSV file
    Import {
        /// CSV file to import
        file: PathBuf,
    },

    /// Export all cases to CSV (stdout unless a file is given)
    Export {
        /// Destination file
        file: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct CaseAddArgs {
    /// Case number
    #[arg(long)]
    pub case_number: Option<String>,

    /// Customer name
    #[arg(long)]
    pub customer: Option<String>,

    /// Support engineer
    #[arg(long)]
    pub support_engineer: Option<String>,

    /// Date opened (YYYY-MM-DD)
    #[arg(long)]
    pub date_opened: Option<String>,

    /// Product/service area (see `huddle product list`)
    #[arg(long)]
    pub product_area: Option<String>,

    /// Issue type (Bug, Feature Request, Support, Other)
    #[arg(long)]
    pub issue_type: Option<String>,

    /// Label (see `huddle label list`)
    #[arg(long)]
    pub labels: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct CaseListArgs {
    /// Keep only cases whose fields contain this text (case-insensitive)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Sort column (case-number, customer, support-engineer, date-opened,
    /// product-service-area, issue-type, labels, session-count, total-duration)
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Sort order
    #[arg(short, long, value_enum, default_value_t)]
    pub order: Order,
}

/// Sort order for `case list`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

// ============================================================================
// Session Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Add a blank session (status Open, today's date) to a case
    Add {
        /// Case index (1-based)
        case: usize,
    },

    /// Show a case's sessions
    Show {
        /// Case index (1-based)
        case: usize,
    },

    /// Edit a session's fields
    Edit(SessionEditArgs),

    /// Delete a session from its case
    Delete {
        /// Case index (1-based)
        case: usize,

        /// Session index within the case (1-based)
        index: usize,
    },

    /// Run the session stopwatch live; press Enter to stop and save
    Track {
        /// Case index (1-based)
        case: usize,

        /// Session index within the case (1-based)
        index: usize,
    },
}

#[derive(Args, Debug)]
pub struct SessionEditArgs {
    /// Case index (1-based)
    pub case: usize,

    /// Session index within the case (1-based)
    pub index: usize,

    /// Session date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Current status (Open, In Progress, Pending Customer,
    /// Pending Development, Pending QA, Resolved, Closed, Other)
    #[arg(long)]
    pub status: Option<String>,

    /// Case overview notes
    #[arg(long)]
    pub overview: Option<String>,

    /// Steps taken
    #[arg(long)]
    pub steps: Option<String>,

    /// Challenges encountered
    #[arg(long)]
    pub challenges: Option<String>,

    /// Planned next steps
    #[arg(long)]
    pub next_steps: Option<String>,

    /// Set the accumulated duration outright (seconds)
    #[arg(long)]
    pub duration: Option<u64>,
}

// ============================================================================
// Vocabulary Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Add a product/service area
    Add {
        /// Entry to add
        name: String,
    },

    /// List product/service areas
    List,
}

#[derive(Subcommand, Debug)]
pub enum LabelCommands {
    /// Add a label
    Add {
        /// Entry to add
        name: String,
    },

    /// List labels
    List,
}
