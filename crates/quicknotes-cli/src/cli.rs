use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use quicknotes_core::VERSION;

/// Quick Notes - short text notes kept in a local store
#[derive(Parser)]
#[command(name = "quicknotes")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the notes store file
    #[arg(short, long, global = true, env = "QUICKNOTES_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Config path override
    #[arg(long)]
    pub config_path: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Note content (read from stdin when omitted)
    #[arg(value_name = "CONTENT")]
    pub content: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Search term (case-insensitive substring)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New content (read from stdin when omitted)
    #[arg(value_name = "CONTENT")]
    pub content: Option<String>,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `clear` command
#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for commands that only switch between text and JSON
#[derive(Args)]
pub struct JsonArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config file and initialize the store
    Init(InitArgs),

    /// Add a new note
    Add(AddArgs),

    /// List notes, newest first
    List(ListArgs),

    /// Search notes by content
    Search(SearchArgs),

    /// Show a single note
    Show(ShowArgs),

    /// Replace a note's content
    Edit(EditArgs),

    /// Delete a note
    Delete(DeleteArgs),

    /// Delete every note
    Clear(ClearArgs),

    /// Show note count and storage usage
    Stats(JsonArgs),

    /// Show the stored error log
    Errors(JsonArgs),

    /// Prune error-log entries older than a week
    Cleanup,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}
