use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    // Release builds carry their tag
    if let Some(tag) = option_env!("VAULTKNIFE_GIT_TAG") {
        return tag;
    }

    let commit = option_env!("VAULTKNIFE_GIT_COMMIT").unwrap_or("unknown");
    let branch = option_env!("VAULTKNIFE_GIT_BRANCH").unwrap_or("unknown");

    // Built once at startup for clap, which wants a 'static str
    let version = format!("v{}-{} ({})", BASE_VERSION, commit, branch);
    Box::leak(version.into_boxed_str())
}

#[derive(Parser)]
#[command(name = "vaultknife")]
#[command(about = "Blank-line cleanup and plugin installs for markdown vaults")]
#[command(version = get_version(), propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace doubled empty lines with a single one
    CollapseBlankLines {
        /// Document to edit in place, or '-' for stdin
        file: PathBuf,
        /// Print the result instead of writing it back
        #[arg(long)]
        stdout: bool,
    },

    /// Remove empty lines
    RemoveBlankLines {
        /// Document to edit in place, or '-' for stdin
        file: PathBuf,
        /// Print the result instead of writing it back
        #[arg(long)]
        stdout: bool,
    },

    /// Fetch a plugin release and install it into the vault
    Install {
        /// Repository URL (e.g., 'https://github.com/owner/repo' or 'owner/repo').
        /// Prompts for it when omitted.
        url: Option<String>,
        /// Release tag to install, or 'latest'
        #[arg(short, long, default_value = "latest")]
        tag: String,
        /// Vault directory (overrides the vault_path setting)
        #[arg(long)]
        vault: Option<PathBuf>,
        /// Download assets through the CORS relay
        #[arg(long)]
        relay: bool,
    },

    /// Manage vaultknife's configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show the current version
    Version,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a configuration setting
    Get {
        /// Key to get (if omitted, shows all settings)
        key: Option<String>,
    },
    /// Set a configuration setting
    Set {
        /// Key and value (e.g., 'vault-path=~/notes' or 'vault-path ~/notes')
        #[arg(trailing_var_arg = true, required = true)]
        args: Vec<String>,
    },
    /// Reset a configuration setting to its default
    Unset {
        /// Key to unset (e.g., 'cors-relay')
        key: String,
    },
    /// Show full configuration
    Show {
        /// Output format (json, yaml, plain)
        #[arg(long, default_value = "json")]
        format: String,
    },
}
