use nix::unistd::Pid;

use crate::ast::CommandLine;
use crate::error::ExecError;

pub type ExecStatus = Result<ExecOutcome, ExecError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The command ran in the foreground and finished with this status.
    Code(i32),
    /// The command was detached and is still running.
    Background(Pid),
}

pub trait Executor {
    fn exec(&mut self, line: &CommandLine<'_>) -> ExecStatus;

    /// Collects finished background processes. Called once per prompt.
    fn reap(&mut self) {}
}
