use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, instrument, warn};

use super::config::LauncherConfig;
use super::directive::Directive;
use super::error::LaunchError;
use super::request::LaunchRequest;

/// How a request ultimately reached the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handled by an already-running instance over `--server`.
    Remote,
    /// A fresh instance was spawned.
    Spawned,
}

/// Process-invocation seam so delivery order is testable without an editor.
pub trait CommandRunner {
    /// Run to completion; `Ok(true)` means the process exited successfully.
    fn run(&self, program: &str, args: &[String]) -> io::Result<bool>;

    /// Start detached; success means the process came up.
    fn spawn(&self, program: &str, args: &[String]) -> io::Result<()>;
}

/// Invokes the editor binary via `std::process`.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<bool> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status.success())
    }

    fn spawn(&self, program: &str, args: &[String]) -> io::Result<()> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
    }
}

/// Builds a directive from a request and delivers it to Neovim, preferring a
/// running instance over spawning a new one.
///
/// Each call is independent and synchronous: at most two sequential process
/// invocations, no retries, no shared state.
pub struct Launcher<R = ProcessRunner> {
    config: LauncherConfig,
    runner: R,
}

impl Launcher {
    pub fn new(config: LauncherConfig) -> Self {
        Launcher {
            config,
            runner: ProcessRunner,
        }
    }

    /// Launcher wired to the instance the environment advertises.
    pub fn from_env() -> Self {
        Launcher::new(LauncherConfig::from_env())
    }
}

impl<R: CommandRunner> Launcher<R> {
    /// Launcher over a caller-supplied runner.
    pub fn with_runner(config: LauncherConfig, runner: R) -> Self {
        Launcher { config, runner }
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Boolean host boundary: failures are logged as warnings, never
    /// propagated. Hosts surface a false return as a non-fatal notice.
    pub fn launch(&self, request: &LaunchRequest) -> bool {
        match self.try_launch(request) {
            Ok(delivery) => {
                debug!(?delivery, "request delivered");
                true
            }
            Err(error) => {
                warn!(%error, "failed to open in Neovim");
                false
            }
        }
    }

    /// Deliver a request, remote-control first.
    ///
    /// A known instance that cannot be reached, or that reports failure,
    /// always falls through to a standalone spawn with equivalent arguments.
    /// Spawn failure is terminal for the call.
    #[instrument(skip(self), fields(program = %self.config.program))]
    pub fn try_launch(&self, request: &LaunchRequest) -> Result<Delivery, LaunchError> {
        let directive = Directive::build(request)?;

        if let Some(server) = &self.config.server {
            match self.runner.run(&self.config.program, &directive.remote_argv(server)) {
                Ok(true) => {
                    debug!(%server, args = %directive.args, "delivered to running instance");
                    return Ok(Delivery::Remote);
                }
                Ok(false) => {
                    warn!(%server, "running instance rejected the request, spawning a new one");
                }
                Err(error) => {
                    warn!(%server, %error, "could not reach the running instance, spawning a new one");
                }
            }
        }

        self.runner
            .spawn(&self.config.program, &directive.standalone_argv())
            .map_err(|source| LaunchError::SpawnFailed {
                program: self.config.program.clone(),
                source,
            })?;
        debug!(args = %directive.args, "spawned a fresh instance");
        Ok(Delivery::Spawned)
    }

    /// Open one file, jumping to `line:column`. Zero counts as unset.
    pub fn open_file_at_line(&self, path: impl Into<PathBuf>, line: u32, column: u32) -> bool {
        self.launch(&LaunchRequest::open_file_at(path, line, column))
    }

    /// Open several files as separate buffers, order-preserving.
    pub fn open_files<I, P>(&self, paths: I) -> bool
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.launch(&LaunchRequest::OpenFiles {
            paths: paths.into_iter().map(Into::into).collect(),
        })
    }

    /// Browse a directory with the editor's file explorer.
    pub fn open_directory(&self, path: impl Into<PathBuf>) -> bool {
        self.launch(&LaunchRequest::OpenDirectory { path: path.into() })
    }

    /// Whether a directory-browse target exists. Hosts check this before
    /// offering the browse operation.
    pub fn directory_exists(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref().is_dir()
    }

    /// Write all modified buffers of the running instance.
    pub fn save_all(&self) -> bool {
        self.launch(&LaunchRequest::SaveAll)
    }
}
