//! CLI subcommand implementations for the ReadSight binary.

pub mod analyze_cmd;
pub mod doctor;
pub mod output;
pub mod repl;
