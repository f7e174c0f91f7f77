use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "homestead",
    version,
    about = "Favorites, property comparison and session state for the listings site",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Root URL of the listings backend API.
    #[arg(long, value_name = "URL", env = "HOMESTEAD_API_BASE_URL", global = true)]
    pub api_base_url: Option<String>,

    /// Upper bound on the startup session check, in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub session_timeout_secs: Option<u64>,

    /// Durable storage file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub storage_path: Option<PathBuf>,

    /// Keep state in memory for this run only.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Manage favorited properties.
    #[command(subcommand)]
    Favorites(ListCommand),

    /// Manage the property comparison list.
    #[command(subcommand)]
    Compare(ListCommand),

    /// Show the verified session.
    Session,

    /// Log in with email and password.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long, env = "HOMESTEAD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and log in.
    Register {
        /// Full name.
        #[arg(long)]
        name: String,
        /// Account email.
        #[arg(long)]
        email: String,
        /// Contact phone.
        #[arg(long)]
        phone: Option<String>,
        /// Account password.
        #[arg(long, env = "HOMESTEAD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the current session.
    Logout,
}

impl Command {
    /// Command name without arguments, safe to log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Favorites(_) => "favorites",
            Self::Compare(_) => "compare",
            Self::Session => "session",
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::Logout => "logout",
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum ListCommand {
    /// Add a property id.
    Add { id: String },
    /// Remove a property id.
    Remove { id: String },
    /// Add the id if absent, remove it otherwise.
    Toggle { id: String },
    /// Print every id.
    List,
    /// Remove every id.
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_command() {
        let args = CliArgs::parse_from(["homestead", "compare", "add", "p42"]);
        assert!(matches!(
            args.command,
            Command::Compare(ListCommand::Add { ref id }) if id == "p42"
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            CliArgs::parse_from(["homestead", "session", "--ephemeral", "--log-level", "debug"]);
        assert!(args.ephemeral);
        assert_eq!(args.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_command_is_required() {
        assert!(CliArgs::try_parse_from(["homestead"]).is_err());
    }
}
