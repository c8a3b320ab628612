use std::io::{self, Write};

use log::{debug, info, warn};
use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{fork, setsid, ForkResult, Pid};

use crate::ast::CommandLine;
use crate::config::Config;
use crate::error::ExecError;
use crate::executor::builtin::BuiltinManager;
use crate::executor::command::{self, Dispatch};
use crate::executor::executor::{ExecOutcome, ExecStatus, Executor};
use crate::executor::pipeline;
use crate::signals;

/// Runs every command line in a forked child.
///
/// Foreground lines are waited for; background lines get their own
/// session and are only collected later by [`Executor::reap`].
pub struct ForkExecutor {
    builtins: BuiltinManager,
    persistent_cd: bool,
}

impl ForkExecutor {
    pub fn new(config: &Config) -> Self {
        ForkExecutor {
            builtins: BuiltinManager::new(),
            persistent_cd: config.persistent_cd,
        }
    }

    fn runs_in_interpreter(&self, line: &CommandLine<'_>) -> bool {
        self.persistent_cd && line.is_plain() && line.left.name() == "cd"
    }
}

impl Executor for ForkExecutor {
    fn exec(&mut self, line: &CommandLine<'_>) -> ExecStatus {
        if self.runs_in_interpreter(line) {
            self.builtins.execute("cd", line.left.args(), &mut io::stdout())?;
            return Ok(ExecOutcome::Code(0));
        }

        // Anything still buffered would otherwise be written twice.
        io::stdout().flush()?;

        match unsafe { fork() }
            .inspect_err(|e| warn!("fork failed: {}", e))
            .map_err(ExecError::sys("fork"))?
        {
            ForkResult::Child => run_line(line, &self.builtins),
            ForkResult::Parent { child } if line.background => {
                info!("[{}] running in background: {}", child, line.left.name());
                Ok(ExecOutcome::Background(child))
            }
            ForkResult::Parent { child } => {
                let code = wait_for(child).map_err(ExecError::sys("waitpid"))?;
                debug!("[{}] exited with {}", child, code);
                Ok(ExecOutcome::Code(code))
            }
        }
    }

    fn reap(&mut self) {
        loop {
            match waitpid(None::<Pid>, Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::StillAlive) | Err(_) => break,
                Ok(status) => debug!("reaped background process: {:?}", status),
            }
        }
    }
}

fn run_line(line: &CommandLine<'_>, builtins: &BuiltinManager) -> ! {
    if let Err(e) = signals::reset_to_default() {
        command::die(ExecError::sys("sigaction")(e));
    }
    if line.background {
        if let Err(e) = setsid() {
            command::die(ExecError::sys("setsid")(e));
        }
    }

    match &line.right {
        None => command::run_stage(&line.left, builtins, Dispatch::Builtins),
        Some(right) => match pipeline::run(&line.left, right, builtins) {
            Ok(code) => command::exit_child(code),
            Err(e) => command::die(e),
        },
    }
}

/// Blocks until `pid` terminates and converts its status to a shell-style
/// exit code (128 + signal number for a signal death).
pub(crate) fn wait_for(pid: Pid) -> nix::Result<i32> {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(code),
            Ok(WaitStatus::Signaled(_, sig, _)) => return Ok(128 + sig as i32),
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(e),
        }
    }
}
