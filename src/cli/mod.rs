//! CLI module for Relay
//!
//! Provides command-line interface parsing and handling for the relay-console binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Relay Console - session and account tools for the campaign backend
///
/// Signs in against the console backend, keeps the issued tokens in a local
/// session file, and runs authenticated calls through the same gateway the
/// console front end uses.
#[derive(Parser, Debug)]
#[command(
    name = "relay-console",
    version,
    about = "Relay Console - session and account tools for the campaign backend",
    long_about = "Signs in against the console backend, keeps the issued tokens in a local\n\
                  session file, and runs authenticated calls through the gateway.\n\n\
                  Run without arguments to show the current session.",
    after_help = "EXAMPLES:\n    \
                  relay-console login -e alice@example.com   # Sign in (password from RELAY_PASSWORD)\n    \
                  relay-console status                       # Show who is signed in\n    \
                  relay-console users '{\"page\":1}'         # List users for the account\n    \
                  relay-console decode <token>               # Inspect a token's claims\n    \
                  relay-console --config my.toml status      # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "relay.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current session and token expiry
    Status,

    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "RELAY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the session, keeping preferences
    Logout,

    /// Create an account; the password is emailed
    Signup {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,
    },

    /// Email a new password
    ForgotPassword {
        /// Account email
        #[arg(short, long)]
        email: String,
    },

    /// List users for the signed-in account
    Users {
        /// JSON filter sent as the request body
        #[arg(default_value = "{}")]
        filter: String,
    },

    /// Decode a token's claims without verifying it
    Decode {
        /// Token to decode (defaults to the stored access token)
        token: Option<String>,
    },

    /// Show or change the display theme
    Theme {
        /// New theme; omit to show the current one
        #[arg(value_enum)]
        value: Option<ThemeArg>,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// Theme choices accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
    /// Switch to the other theme
    Toggle,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
