use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use avatar_widget_lib::app::CliCommand;
use avatar_widget_lib::infrastructure::config::WidgetConfig;

fn print_cli_help() {
    println!("Avatar Widget CLI");
    println!();
    println!("Usage:");
    println!("  avatar-widget [--config <file.yaml>] upload <image>");
    println!("  avatar-widget [--config <file.yaml>] delete");
    println!("  avatar-widget [--config <file.yaml>] open <url>");
    println!();
    println!("Environment overrides:");
    println!("  AVATAR_WIDGET_BASE_URL, AVATAR_WIDGET_USER_ID,");
    println!("  AVATAR_WIDGET_DEFAULT_AVATAR, AVATAR_WIDGET_CURRENT_AVATAR,");
    println!("  AVATAR_WIDGET_LOG_DIR");
}

fn parse_cli_args(args: &[String]) -> Result<(Option<PathBuf>, CliCommand)> {
    match args {
        [flag, path, rest @ ..] if flag == "--config" => {
            let (_, command) = parse_cli_args(rest)?;
            Ok((Some(PathBuf::from(path)), command))
        }
        [command, path] if command == "upload" => {
            Ok((None, CliCommand::Upload(PathBuf::from(path))))
        }
        [command] if command == "delete" => Ok((None, CliCommand::Delete)),
        [command, url] if command == "open" => Ok((None, CliCommand::Open(url.clone()))),
        _ => Err(anyhow!("Unsupported command: {}", args.join(" "))),
    }
}

async fn run_cli_command(cli_args: &[String]) -> Result<bool> {
    let (config_path, command) = match parse_cli_args(cli_args) {
        Ok(parsed) => parsed,
        Err(error) => {
            print_cli_help();
            return Err(error);
        }
    };

    let config = WidgetConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    avatar_widget_lib::run(config, command)
        .await
        .context("Avatar widget command failed")
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args: Vec<String> = env::args().skip(1).collect();

    if cli_args.is_empty() || cli_args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_cli_help();
        return ExitCode::SUCCESS;
    }

    match run_cli_command(&cli_args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
