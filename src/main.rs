mod commands;
mod domain;
mod logging;
mod services;
#[cfg(test)]
mod test_support;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::defaults_cmd::defaults_command;
use crate::commands::estimate_cmd::estimate_command;
use crate::commands::report_cmd::report_command;
use crate::commands::serve_cmd::serve_command;
use crate::commands::session_cmd::session_command;
use crate::logging::init_logging;
use crate::services::app_config::AppConfig;
use clap::{CommandFactory, Parser};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:?}");
            return;
        }
    };

    match args.command {
        cmd @ Commands::Estimate { .. } => estimate_command(cmd, &config).await,
        cmd @ Commands::Defaults { .. } => defaults_command(cmd).await,
        cmd @ Commands::Session { .. } => session_command(cmd, &config).await,
        cmd @ Commands::Report { .. } => report_command(cmd, &config).await,
        cmd @ Commands::Serve { .. } => serve_command(cmd, &config).await,
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            clap_complete::generate(shell, &mut command, "roi-estimator", &mut std::io::stdout());
        }
    }
}
