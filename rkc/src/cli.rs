use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::build::BuildArgs;

const BUILD_DESCRIPTION: &str = "rkc build launches the Buildah command to build an OCI Image. \
Buildah must be installed for this command to work.";

#[derive(Parser, Debug)]
#[command(name = "rkc", version, about = "A container management CLI for rk8s")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an image using instructions in a Dockerfile
    #[command(long_about = BUILD_DESCRIPTION)]
    Build(BuildArgs),
}

/// Options accepted before or after any subcommand.
///
/// Values the user did not type stay `None` (or empty) so that they are never
/// forwarded to the builder with an invented default.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Log messages above specified level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Error)]
    pub log_level: LogLevel,

    /// Path to the root directory in which data, including images, is stored
    #[arg(long, global = true, value_name = "PATH")]
    pub root: Option<String>,

    /// Path to the 'run directory' where all state information is stored
    #[arg(long, global = true, value_name = "PATH")]
    pub runroot: Option<String>,

    /// Select which storage driver is used to manage storage of images and containers
    #[arg(long, global = true, value_name = "DRIVER")]
    pub storage_driver: Option<String>,

    /// Used to pass an option to the storage driver
    #[arg(long, global = true, value_name = "OPT")]
    pub storage_opt: Vec<String>,

    /// Name or path of the external image builder
    #[arg(long, global = true, env = "RKC_BUILDER", value_name = "NAME")]
    pub builder: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    #[default]
    Error,
    Fatal,
    Panic,
}

impl LogLevel {
    pub fn is_debug(self) -> bool {
        self == LogLevel::Debug
    }

    /// Directive for `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => "error",
        }
    }
}
