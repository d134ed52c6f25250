// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A tiny REPL on top of the line engine. Every line you submit is echoed back as
//! `handle command: <line>`. Press <kbd>Ctrl+C</kbd> or <kbd>Ctrl+D</kbd> to exit.

use std::io::{Write, stdout};

use clap::Parser;
use miette::IntoDiagnostic;
use r3bl_line_engine::{Command, LineEngine, TracingConfig};

use crate::clap_config::CLIArgs;

const MOMOKO_PROMPT: &str = "momoko> ";

// Note: The `tokio::main` macro internally calls `.expect("Failed building the Runtime")`
// when initializing the Tokio runtime. The lint must be suppressed here.
#[tokio::main]
#[allow(clippy::unwrap_in_result)]
async fn main() -> miette::Result<()> {
    let cli_args = CLIArgs::parse();

    if cli_args.global_options.enable_logging {
        TracingConfig::new_file(cli_args.global_options.log_file.clone()).install_global()?;
    }

    let Some(mut line_engine) = LineEngine::try_new_interactive(cli_args.prompt.as_str())
    else {
        tracing::debug!(message = "not an interactive terminal, exiting");
        return Ok(());
    };

    line_engine.open()?;
    let mut command_stream = line_engine.commands()?;

    while let Some(command) = command_stream.next_command().await {
        match command {
            Command::Input { input, ack } => {
                // Raw mode is on, so `\n` alone won't go back to the first column.
                let mut stdout = stdout();
                write!(stdout, "handle command: {input}\r\n").into_diagnostic()?;
                stdout.flush().into_diagnostic()?;
                ack.ack();
            }
            Command::Terminated(error) => {
                tracing::debug!(message = "session terminated", ?error);
                break;
            }
        }
    }

    line_engine.close()?;
    println!("exit");

    Ok(())
}

mod clap_config {
    use clap::{Args, Parser};

    use super::MOMOKO_PROMPT;

    /// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
    #[derive(Debug, Parser)]
    #[command(bin_name = "momoko")]
    #[command(about = "🍑 Type commands, and have them echoed back, one at a time")]
    #[command(version)]
    #[command(next_line_help = true)]
    #[command(arg_required_else_help(false))]
    pub struct CLIArgs {
        #[arg(
            long,
            short = 'p',
            default_value = MOMOKO_PROMPT,
            help = "The prompt to show at the start of every line"
        )]
        pub prompt: String,

        #[command(flatten)]
        pub global_options: GlobalOption,
    }

    #[derive(Debug, Args)]
    pub struct GlobalOption {
        #[arg(
            global = true,
            long,
            short = 'l',
            help = "Log app output to a file for debugging"
        )]
        pub enable_logging: bool,

        #[arg(
            global = true,
            long,
            requires = "enable_logging",
            help = "Path of the log file, defaults to `line_engine_log.txt`"
        )]
        pub log_file: Option<String>,
    }
}
