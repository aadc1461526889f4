//! CareFinder CLI library.
//!
//! Output formatting and terminal styling shared by the `carefinder-cli`
//! subcommands.

pub mod output;
pub mod terminal;
