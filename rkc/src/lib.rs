pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Commands, GlobalOptions, LogLevel};
pub use commands::build::{BuildArgs, build, run_build};
pub use config::Config;
pub use error::{BuildError, ChildFailure};
