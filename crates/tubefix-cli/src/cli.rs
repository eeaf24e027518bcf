use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tubefix")]
#[command(about = "Rename raw camera-file titles on your YouTube uploads", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk the uploads playlist and retitle raw uploads
    Run(RunArgs),

    /// Manage the stored OAuth token
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Preview generated titles for filenames (no network)
    Title {
        /// Filenames or titles to check
        #[arg(required = true)]
        filenames: Vec<String>,
    },

    /// Inspect the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// List what would change without updating anything
    #[arg(long)]
    pub dry_run: bool,

    /// Items per listing page, 1-50 (default from config: 50)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Pause after each successful update in milliseconds (default from config: 1000)
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Run the browser consent flow and store a fresh token
    Login,

    /// Show whether a stored token exists and when it expires
    Status,

    /// Delete the stored token
    Logout,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective configuration
    Show,
}
