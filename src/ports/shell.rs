//! Shell executor port for running external programs.

use crate::error::PortError;

/// The output of a program execution.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// The exit code of the process.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ShellOutput {
    /// Returns `true` when the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes external programs.
///
/// Arguments are passed as an argv list and never interpolated by a shell,
/// so issue titles and bodies reach the program verbatim.
pub trait ShellExecutor: Send + Sync {
    /// Runs `program` with `args` and returns its captured output.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned.
    fn run(&self, program: &str, args: &[String]) -> Result<ShellOutput, PortError>;
}
