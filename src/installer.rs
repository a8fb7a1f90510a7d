//! External install command
//!
//! The installer is opaque: it runs with the caller's terminal attached and
//! only its termination status is inspected.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// How the installer process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Exited with a status code
    Exited(i32),
    /// Killed by a signal (Unix only)
    Signaled(i32),
}

impl Termination {
    /// Whether the installer reported success
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited(0))
    }
}

impl From<ExitStatus> for Termination {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::Signaled(signal);
            }
        }

        Self::Exited(-1)
    }
}

/// Human-readable name of a signal number
pub fn signal_name(signal: i32) -> String {
    #[cfg(unix)]
    {
        let name = match signal {
            libc::SIGHUP => Some("SIGHUP"),
            libc::SIGINT => Some("SIGINT"),
            libc::SIGQUIT => Some("SIGQUIT"),
            libc::SIGABRT => Some("SIGABRT"),
            libc::SIGKILL => Some("SIGKILL"),
            libc::SIGSEGV => Some("SIGSEGV"),
            libc::SIGPIPE => Some("SIGPIPE"),
            libc::SIGTERM => Some("SIGTERM"),
            _ => None,
        };
        if let Some(name) = name {
            return name.to_string();
        }
    }

    format!("signal {}", signal)
}

/// Something that performs the dependency install
#[async_trait]
pub trait Installer: Send + Sync {
    /// Run the install to completion
    ///
    /// An `Err` means the process could not be started at all.
    async fn install(&self) -> std::io::Result<Termination>;

    /// Command line shown in logs and errors
    fn describe(&self) -> String;
}

/// Runs a command line through the platform shell
#[derive(Debug, Clone)]
pub struct ShellInstaller {
    command: String,
    working_dir: PathBuf,
}

impl ShellInstaller {
    /// Create an installer for `command`, run in `working_dir`
    pub fn new(command: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            working_dir: working_dir.into(),
        }
    }

    #[cfg(unix)]
    fn shell_command(&self) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(&self.command);
        cmd
    }

    #[cfg(windows)]
    fn shell_command(&self) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(&self.command);
        cmd
    }
}

#[async_trait]
impl Installer for ShellInstaller {
    async fn install(&self) -> std::io::Result<Termination> {
        debug!(
            "Executing interactively in {}: {}",
            self.working_dir.display(),
            self.command
        );

        let status = self
            .shell_command()
            .current_dir(&self.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        Ok(status.into())
    }

    fn describe(&self) -> String {
        self.command.clone()
    }
}
