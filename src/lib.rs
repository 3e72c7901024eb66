//! A safe arithmetic expression calculator.
//!
//! The [`calculator`] module is the pure core: a tokenizer, a
//! precedence-climbing evaluator and a closed set of scalar functions.
//! The remaining modules are one calling layer around it: configuration,
//! history, rendering, clipboard and an interactive session.

pub mod calculator;
pub mod clipboard;
pub mod config;
pub mod history;
pub mod render;
pub mod repl;
pub mod session;
