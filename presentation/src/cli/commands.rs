//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tool server transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
    /// JSON-RPC over POST /mcp
    Http,
    /// Event stream at GET /sse, messages via POST /messages
    Sse,
}

/// CLI arguments for eventcrew
#[derive(Parser, Debug)]
#[command(name = "eventcrew")]
#[command(author, version, about = "Event-planning agent team with domain-scoped tools")]
#[command(long_about = r#"
eventcrew runs a team of LLM agents that plan events and fundraisers. Each
agent only sees the tools of its own domains (event_, fundraising_,
quality_, sheets_, ...). The same tools can be served to other clients over
JSON-RPC, or called directly.

Configuration files are loaded from (in priority order):
1. EVENTCREW_* environment variables
2. --config <path>       Explicit config file
3. ./eventcrew.toml      Project-level config
4. ~/.config/eventcrew/config.toml   Global config

Example:
  eventcrew run --task "Plan a charity gala for 120 guests"
  eventcrew serve --transport stdio
  eventcrew tools --domain 'sheets_*'
  eventcrew call fundraising_calculate_budget --args '{"venue_cost": 1000, "catering_cost": 500}'
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the agent team on a task
    Run {
        /// Task text (default: "MainTask" from the prompts file)
        #[arg(short, long)]
        task: Option<String>,

        /// Prompts file
        #[arg(long, value_name = "PATH")]
        prompts: Option<PathBuf>,

        /// Transcript file
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Stop after this many messages
        #[arg(long, value_name = "N")]
        max_messages: Option<usize>,

        /// Stop after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Also write every chat event as JSON lines to this file
        #[arg(long, value_name = "PATH")]
        event_log: Option<PathBuf>,
    },

    /// Serve the tools over JSON-RPC
    Serve {
        #[arg(long, value_enum)]
        transport: Option<Transport>,

        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// List tools, optionally filtered by domain patterns
    Tools {
        /// Domain pattern (`event_`, `sheets_*`, `db_query`); repeatable
        #[arg(short, long = "domain", value_name = "PATTERN")]
        domains: Vec<String>,
    },

    /// Call one tool and print its output
    Call {
        /// Tool name
        tool: String,

        /// Arguments as a JSON object
        #[arg(long, value_name = "JSON")]
        args: Option<String>,
    },
}
