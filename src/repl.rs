//! Interactive line-oriented calculator session.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::warn;

use crate::calculator::{
    AngleMode, EvaluationOutcome, ScalarFunction, looks_like_expression, parse_function_call,
};
use crate::render::RenderedResult;
use crate::session::Session;

const PROMPT: &str = "> ";

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A calculation result (success or error).
    Result(RenderedResult),
    /// Informational text.
    Message(String),
    /// Nothing to print.
    Nothing,
    /// Leave the loop.
    Quit,
}

/// Handle a single line of input.
pub fn handle_line(session: &mut Session, line: &str) -> Reply {
    let line = line.trim();

    match line.to_ascii_lowercase().as_str() {
        "" => return Reply::Nothing,
        "quit" | "exit" | "q" => return Reply::Quit,
        "deg" | "degrees" => {
            session.set_angle_mode(AngleMode::Degrees);
            return Reply::Message(format!("angle mode: {}", session.angle_mode()));
        }
        "rad" | "radians" => {
            session.set_angle_mode(AngleMode::Radians);
            return Reply::Message(format!("angle mode: {}", session.angle_mode()));
        }
        "mode" => return Reply::Message(format!("angle mode: {}", session.angle_mode())),
        "history" => return Reply::Message(format_history(session)),
        "clear" => return Reply::Message(clear_history(session).to_string()),
        "help" => return Reply::Message(help_text()),
        _ => {}
    }

    if let Some(call) = parse_function_call(line) {
        let outcome = session.call(&call);
        return Reply::Result(session.render(line, &outcome));
    }

    if looks_like_expression(line) || !line.starts_with(|c: char| c.is_alphabetic()) {
        let outcome = session.evaluate(line);
        return Reply::Result(session.render(line, &outcome));
    }

    Reply::Message(format!("unknown command '{line}' (type 'help')"))
}

/// Run the loop until end of input or `quit`, then save history.
pub fn run(session: &mut Session, input: impl BufRead, mut output: impl Write) -> Result<()> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match handle_line(session, &line) {
            Reply::Quit => break,
            Reply::Nothing => {}
            Reply::Message(message) => writeln!(output, "{message}")?,
            Reply::Result(result) => writeln!(output, "{}", format_reply(&result))?,
        }
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }
    writeln!(output)?;

    if let Err(err) = session.save_history() {
        warn!("{err:#}");
    }
    Ok(())
}

/// Clear the session's history and describe what happened.
pub fn clear_history(session: &mut Session) -> &'static str {
    if session.clear_history() {
        "history cleared"
    } else {
        "history is disabled"
    }
}

/// `= 14` for results, `Error: <message>` for failures.
pub fn format_reply(result: &RenderedResult) -> String {
    match &result.error_message {
        Some(message) => format!("{}: {message}", result.display_result),
        None => format!("= {}", result.display_result),
    }
}

/// Numbered list of remembered calculations.
pub fn format_history(session: &Session) -> String {
    let Some(history) = session.history() else {
        return "history is disabled".to_string();
    };
    if history.is_empty() {
        return "history is empty".to_string();
    }
    history
        .entries()
        .enumerate()
        .map(|(i, entry)| {
            let outcome = EvaluationOutcome::Success { value: entry.value };
            let rendered = session.render(&entry.input, &outcome);
            format!("{:>3}  {} = {}", i + 1, entry.input, rendered.display_result)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn help_text() -> String {
    let functions: Vec<&str> = ScalarFunction::ALL.iter().map(|f| f.name()).collect();
    format!(
        "Enter an expression using + - * / % ^ and parentheses, e.g. (2+3)*4\n\
         Functions: {}  e.g. sqrt(16), sin 30 (a call takes the whole line)\n\
         Commands: deg, rad, mode, history, clear, help, quit",
        functions.join(", ")
    )
}
