pub mod args;
pub mod tool;

use clap::Parser;

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::{BuildError, ChildFailure};

pub use args::bud_command_args;
pub use tool::{InheritedStdio, PathLocator, ProcessRunner, ToolLocator};

#[derive(Parser, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Path of the authentication file. Default is ${XDG_RUNTIME_DIR}/containers/auth.json
    #[arg(long, value_name = "PATH")]
    pub authfile: Option<String>,

    /// Argument to supply to the builder
    #[arg(long, value_name = "argument=value")]
    pub build_arg: Vec<String>,

    /// Use certificates at the specified path to access the registry
    #[arg(long, value_name = "PATH")]
    pub cert_dir: Option<String>,

    /// Credentials for accessing the registry
    #[arg(long, value_name = "[username[:password]]")]
    pub creds: Option<String>,

    /// Dockerfile or Containerfile
    #[arg(short, long, value_name = "pathname or URL")]
    pub file: Vec<String>,

    /// Format of the built image's manifest and metadata
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Pull the image, even if a version is present
    #[arg(long)]
    pub pull_always: bool,

    /// Refrain from announcing build instructions and image read/write progress
    #[arg(
        short,
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        overrides_with = "quiet"
    )]
    pub quiet: Option<bool>,

    /// Path to an alternate runtime
    #[arg(long, value_name = "PATH")]
    pub runtime: Option<String>,

    /// Add global flags for the container runtime
    #[arg(long, value_name = "FLAG")]
    pub runtime_flag: Vec<String>,

    /// Pathname of signature policy file (not usually used)
    #[arg(long, value_name = "PATHNAME")]
    pub signature_policy: Option<String>,

    /// Tag to apply to the built image
    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Require HTTPS and verify certificates when accessing the registry
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        overrides_with = "tls_verify"
    )]
    pub tls_verify: Option<bool>,

    #[arg(value_name = "CONTEXT-DIRECTORY | URL")]
    pub context: Vec<String>,
}

/// Locates and probes the builder, then runs `bud` with the translated options.
///
/// Nothing is spawned for the real build unless both checks pass.
pub fn run_build<L, R>(
    global: &GlobalOptions,
    build_args: &BuildArgs,
    locator: &L,
    runner: &R,
) -> Result<(), BuildError>
where
    L: ToolLocator + ?Sized,
    R: ProcessRunner + ?Sized,
{
    let builder = locator.locate()?;
    tracing::debug!("using builder {}", builder.display());
    locator.probe(&builder)?;

    let bud_args = bud_command_args(global, build_args);
    tracing::debug!("running {} {:?}", builder.display(), bud_args);

    let status = match runner.run(&builder, &bud_args) {
        Ok(status) => status,
        Err(err) => {
            return Err(BuildError::ChildProcessFailed {
                path: builder,
                reason: ChildFailure::Spawn(err),
            });
        }
    };
    if !status.success() {
        return Err(BuildError::ChildProcessFailed {
            path: builder,
            reason: ChildFailure::Status(status),
        });
    }

    tracing::info!("Successfully built image");
    Ok(())
}

/// Entry point of `rkc build`.
pub fn build(
    global: &GlobalOptions,
    build_args: &BuildArgs,
    config: &Config,
) -> Result<(), BuildError> {
    let builder = config.builder_name(global.builder.as_deref());
    run_build(global, build_args, &PathLocator::new(builder), &InheritedStdio)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::os::unix::process::ExitStatusExt;
    use std::path::{Path, PathBuf};
    use std::process::ExitStatus;

    use super::*;

    const BUILDAH: &str = "/usr/bin/buildah";

    #[derive(Default)]
    struct FakeLocator {
        missing: bool,
        broken: bool,
        probed: Cell<usize>,
    }

    impl ToolLocator for FakeLocator {
        fn locate(&self) -> Result<PathBuf, BuildError> {
            if self.missing {
                return Err(BuildError::ExecutableNotFound {
                    name: "buildah".to_string(),
                    source: which::Error::CannotFindBinaryPath,
                });
            }
            Ok(PathBuf::from(BUILDAH))
        }

        fn probe(&self, path: &Path) -> Result<(), BuildError> {
            self.probed.set(self.probed.get() + 1);
            if self.broken {
                return Err(BuildError::ExecutableNotOperational {
                    path: path.to_path_buf(),
                    source: io::Error::from(io::ErrorKind::PermissionDenied),
                });
            }
            Ok(())
        }
    }

    struct RecordingRunner {
        // raw wait status; `None` fails to spawn
        status: Option<i32>,
        calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
    }

    impl RecordingRunner {
        fn exiting(code: i32) -> Self {
            Self {
                status: Some(code << 8),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn unstartable() -> Self {
            Self {
                status: None,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, program: &Path, args: &[String]) -> io::Result<ExitStatus> {
            self.calls
                .borrow_mut()
                .push((program.to_path_buf(), args.to_vec()));
            match self.status {
                Some(raw) => Ok(ExitStatus::from_raw(raw)),
                None => Err(io::Error::from(io::ErrorKind::NotFound)),
            }
        }
    }

    fn tagged_build() -> (GlobalOptions, BuildArgs) {
        let global = GlobalOptions {
            root: Some("/var/lib/x".to_string()),
            ..Default::default()
        };
        let build_args = BuildArgs {
            tag: vec!["t1".to_string(), "t2".to_string()],
            quiet: Some(true),
            context: vec![".".to_string()],
            ..Default::default()
        };
        (global, build_args)
    }

    #[test]
    fn test_runs_builder_with_bud_args() {
        let (global, build_args) = tagged_build();
        let locator = FakeLocator::default();
        let runner = RecordingRunner::exiting(0);

        run_build(&global, &build_args, &locator, &runner).unwrap();

        assert_eq!(locator.probed.get(), 1);
        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PathBuf::from(BUILDAH));
        assert_eq!(
            calls[0].1,
            vec![
                "--root",
                "/var/lib/x",
                "bud",
                "--tag",
                "t1",
                "--tag",
                "t2",
                "--quiet=true",
                "."
            ]
        );
    }

    #[test]
    fn test_missing_builder() {
        let (global, build_args) = tagged_build();
        let locator = FakeLocator {
            missing: true,
            ..Default::default()
        };
        let runner = RecordingRunner::exiting(0);

        let err = run_build(&global, &build_args, &locator, &runner).unwrap_err();

        assert!(matches!(err, BuildError::ExecutableNotFound { .. }));
        assert_eq!(locator.probed.get(), 0);
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_builder_not_operational() {
        let (global, build_args) = tagged_build();
        let locator = FakeLocator {
            broken: true,
            ..Default::default()
        };
        let runner = RecordingRunner::exiting(0);

        let err = run_build(&global, &build_args, &locator, &runner).unwrap_err();

        assert!(matches!(err, BuildError::ExecutableNotOperational { .. }));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_builder_exit_status_is_kept() {
        let (global, build_args) = tagged_build();
        let locator = FakeLocator::default();
        let runner = RecordingRunner::exiting(1);

        let err = run_build(&global, &build_args, &locator, &runner).unwrap_err();

        match &err {
            BuildError::ChildProcessFailed {
                path,
                reason: ChildFailure::Status(status),
            } => {
                assert_eq!(path, &PathBuf::from(BUILDAH));
                assert_eq!(status.code(), Some(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code(), 1);
        assert_eq!(runner.calls.borrow().len(), 1);
    }

    #[test]
    fn test_builder_fails_to_start() {
        let (global, build_args) = tagged_build();
        let locator = FakeLocator::default();
        let runner = RecordingRunner::unstartable();

        let err = run_build(&global, &build_args, &locator, &runner).unwrap_err();

        assert!(matches!(
            err,
            BuildError::ChildProcessFailed {
                reason: ChildFailure::Spawn(_),
                ..
            }
        ));
        assert_ne!(err.exit_code(), 0);
    }
}
