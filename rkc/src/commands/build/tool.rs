use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::BuildError;

/// Finds the external builder and checks that it can be launched.
pub trait ToolLocator {
    fn locate(&self) -> Result<PathBuf, BuildError>;

    /// Launches `path` without arguments. Only a failure to start or wait for
    /// the process is an error, its exit status is not looked at.
    fn probe(&self, path: &Path) -> Result<(), BuildError>;
}

/// Runs a program to completion.
pub trait ProcessRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ExitStatus>;
}

/// Looks the builder up on `PATH`.
#[derive(Debug, Clone)]
pub struct PathLocator {
    name: String,
}

impl PathLocator {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ToolLocator for PathLocator {
    fn locate(&self) -> Result<PathBuf, BuildError> {
        which::which(&self.name).map_err(|source| BuildError::ExecutableNotFound {
            name: self.name.clone(),
            source,
        })
    }

    fn probe(&self, path: &Path) -> Result<(), BuildError> {
        tracing::trace!("probing {}", path.display());
        let output = Command::new(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| BuildError::ExecutableNotOperational {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::trace!("probe of {} exited with {}", path.display(), output.status);
        Ok(())
    }
}

/// Runs the child with stdin, stdout and stderr connected to our own.
#[derive(Debug, Clone, Copy, Default)]
pub struct InheritedStdio;

impl ProcessRunner for InheritedStdio {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ExitStatus> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
    }
}
