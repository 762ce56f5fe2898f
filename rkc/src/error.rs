use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{name} not found in PATH")]
    ExecutableNotFound {
        name: String,
        #[source]
        source: which::Error,
    },

    #[error("{} is not operational on this server", .path.display())]
    ExecutableNotOperational {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error running the {} build-using-dockerfile (bud) command", .path.display())]
    ChildProcessFailed {
        path: PathBuf,
        #[source]
        reason: ChildFailure,
    },
}

/// Why the real builder invocation did not succeed.
#[derive(Debug, Error)]
pub enum ChildFailure {
    #[error("failed to start the builder process")]
    Spawn(#[source] io::Error),

    #[error("builder {0}")]
    Status(ExitStatus),
}

impl BuildError {
    /// Exit code the CLI should terminate with for this error.
    ///
    /// A builder that ran and failed hands its own status back to the caller,
    /// every other failure maps to `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::ChildProcessFailed {
                reason: ChildFailure::Status(status),
                ..
            } => status_exit_code(*status),
            _ => 1,
        }
    }
}

fn status_exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
