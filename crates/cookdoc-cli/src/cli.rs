use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cookdoc",
    about = "Cookdoc: reconcile chef-server and local cookbooks and check them for drift",
    version
)]
pub struct Cli {
    /// Path to the config file (default: .cookdoc.toml if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Local cookbook search root, highest precedence first (repeatable;
    /// replaces `cookbook_path` from the config file)
    #[arg(long = "cookbook-path", global = true)]
    pub cookbook_path: Vec<String>,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every consistency check over every cookbook
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the merged registry/local cookbook records without checking them
    Inventory {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
