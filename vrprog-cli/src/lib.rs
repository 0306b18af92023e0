//! Preprocessing commands of the `vrprog` binary, exposed as a library for testing.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod record;
