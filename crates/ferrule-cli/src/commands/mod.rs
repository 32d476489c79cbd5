//! Subcommand implementations for the ferrule CLI.

pub mod build;
pub mod check;
pub mod inspect;

mod input;
mod report;
