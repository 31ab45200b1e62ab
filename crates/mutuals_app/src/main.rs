//! `mutuals`: compare who follows you with who you follow, and act on the
//! difference.
//!
//! ```bash
//! mutuals octocat --token "$GITHUB_TOKEN"
//! mutuals octocat --once
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod config;
mod platform;

use config::{AppConfig, LogTarget};
use platform::app::{run_app, RunOptions};

/// Compare followers and following and follow/unfollow the difference.
#[derive(Parser, Debug)]
#[command(name = "mutuals")]
#[command(version, about, long_about = None)]
struct Cli {
    /// User whose followers are checked
    user: Option<String>,

    /// Access token; required for follow/unfollow
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// RON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Where to write logs
    #[arg(long, value_enum)]
    log: Option<LogTarget>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the result of one check and exit
    #[arg(long, requires = "user")]
    once: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    if let Some(target) = cli.log {
        config.log.target = target;
    }
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }

    let level = config.log.level_filter()?;
    mutuals_logging::initialize(config.log.target.into(), level, &config.log.file);

    run_app(RunOptions {
        config,
        user: cli.user,
        token: cli.token,
        once: cli.once,
    })
}
