//! # CLI Layer
//!
//! One possible client of the chainctl library. This is the only place that knows
//! about stdout, stderr and exit codes.
//!
//! - `setup`: clap definitions
//! - `commands`: dispatch and per-command handlers
//! - `input`: resolving the `create` config argument (inline JSON or a file)
//! - `print`: rendering results and messages

mod commands;
mod input;
mod print;
mod setup;

pub use commands::run;
