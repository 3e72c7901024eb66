//! Calling-layer state around the pure calculator core.
//!
//! A session holds the current angle mode, display settings and the
//! optional history store. It canonicalises user input before it reaches
//! the core and records successful results afterwards.

use anyhow::Result;
use tracing::debug;

use crate::calculator::{
    AngleMode, EvaluationOutcome, FunctionCall, ScalarFunction, apply_function,
    canonicalize_glyphs, evaluate_expression_with, try_evaluate,
};
use crate::config::Config;
use crate::history::History;
use crate::render::RenderedResult;

pub struct Session {
    config: Config,
    angle_mode: AngleMode,
    history: Option<History>,
}

impl Session {
    pub fn new(config: Config, history: Option<History>) -> Self {
        let angle_mode = config.angle_mode;
        Self {
            config,
            angle_mode,
            history,
        }
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn set_angle_mode(&mut self, angle_mode: AngleMode) {
        debug!(%angle_mode, "angle mode changed");
        self.angle_mode = angle_mode;
    }

    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    /// Evaluate an expression as typed by the user.
    pub fn evaluate(&mut self, input: &str) -> EvaluationOutcome {
        let canonical = canonicalize_glyphs(input);
        let outcome = evaluate_expression_with(&canonical, &self.config.limits);
        self.record(input, &outcome);
        outcome
    }

    /// Apply a scalar function to a value, in the given or current angle mode.
    pub fn apply(
        &mut self,
        name: &str,
        value: f64,
        angle_mode: Option<AngleMode>,
    ) -> EvaluationOutcome {
        let angle_mode = angle_mode.unwrap_or(self.angle_mode);
        let outcome = apply_function(name, value, angle_mode);
        self.record(&format!("{name}({value})"), &outcome);
        outcome
    }

    /// Evaluate a function call whose argument is itself an expression.
    pub fn call(&mut self, call: &FunctionCall) -> EvaluationOutcome {
        let argument = canonicalize_glyphs(&call.argument);
        let result = call.name.parse::<ScalarFunction>().and_then(|function| {
            let value = try_evaluate(&argument, &self.config.limits)?;
            function.apply(value, self.angle_mode)
        });
        let outcome = EvaluationOutcome::from(result);
        debug!(function = %call.name, argument = %argument, ?outcome, "evaluated function call");
        self.record(&format!("{}({})", call.name, call.argument), &outcome);
        outcome
    }

    pub fn render(&self, input: &str, outcome: &EvaluationOutcome) -> RenderedResult {
        RenderedResult::from_outcome(input, outcome, self.config.display.thousands_separator)
    }

    /// Clear the history. Returns `false` when this session keeps none.
    pub fn clear_history(&mut self) -> bool {
        match self.history.as_mut() {
            Some(history) => {
                history.clear();
                true
            }
            None => false,
        }
    }

    /// Persist history, if this session keeps one.
    pub fn save_history(&self) -> Result<()> {
        match &self.history {
            Some(history) => history.save(),
            None => Ok(()),
        }
    }

    fn record(&mut self, input: &str, outcome: &EvaluationOutcome) {
        if let (Some(history), Some(value)) = (self.history.as_mut(), outcome.value()) {
            history.push(input, value);
        }
    }
}
