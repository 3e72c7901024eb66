use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use zcalc::calculator::{AngleMode, EvaluationOutcome};
use zcalc::clipboard::copy_to_clipboard;
use zcalc::config::Config;
use zcalc::history::History;
use zcalc::repl;
use zcalc::session::Session;

#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about = "A safe arithmetic expression calculator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Print results as JSON outcomes
    #[arg(long, global = true)]
    json: bool,

    /// Copy a successful result to the clipboard
    #[arg(long, global = true)]
    copy: bool,

    /// Path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Do not read or write history
    #[arg(long, global = true)]
    no_history: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate an arithmetic expression
    Eval {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expression: Vec<String>,
    },
    /// Apply a named function (sqrt, ln, sin, factorial, ...) to a value
    Apply {
        name: String,
        #[arg(allow_hyphen_values = true)]
        value: f64,
        /// Angle mode for trig functions (defaults to the configured mode)
        #[arg(long, value_name = "MODE")]
        angle: Option<AngleMode>,
    },
    /// Start an interactive session (the default)
    Repl,
    /// Show or clear the calculation history
    History {
        #[arg(long)]
        clear: bool,
    },
}

/// How single results are reported.
struct OutputOptions {
    json: bool,
    copy: bool,
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;
    let history = open_history(&config, cli.no_history);
    let mut session = Session::new(config, history);
    let options = OutputOptions {
        json: cli.json,
        copy: cli.copy,
    };

    match cli.command.unwrap_or(Command::Repl) {
        Command::Eval { expression } => {
            let input = expression.join(" ");
            let outcome = session.evaluate(&input);
            report(&session, &input, &outcome, &options)
        }
        Command::Apply { name, value, angle } => {
            let input = format!("{name}({value})");
            let outcome = session.apply(&name, value, angle);
            report(&session, &input, &outcome, &options)
        }
        Command::Repl => {
            repl::run(&mut session, io::stdin().lock(), io::stdout())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::History { clear } => {
            if clear {
                println!("{}", repl::clear_history(&mut session));
                session.save_history()?;
            } else {
                println!("{}", repl::format_history(&session));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_history(config: &Config, disabled: bool) -> Option<History> {
    if disabled || !config.history.enabled {
        debug!("history disabled");
        return None;
    }
    let path = History::default_path()?;
    Some(History::load_or_empty(path, config.history.max_entries))
}

fn report(
    session: &Session,
    input: &str,
    outcome: &EvaluationOutcome,
    options: &OutputOptions,
) -> Result<ExitCode> {
    if let Err(err) = session.save_history() {
        warn!("{err:#}");
    }

    let rendered = session.render(input, outcome);
    if options.json {
        println!("{}", serde_json::to_string(outcome)?);
    } else if let Some(message) = &rendered.error_message {
        eprintln!("{}: {message}", rendered.display_result);
    } else {
        println!("{}", rendered.display_result);
    }

    if options.copy && !rendered.is_error() {
        copy_to_clipboard(rendered.text_for_clipboard())?;
    }

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
