use std::os::fd::AsRawFd;

use log::debug;
use nix::unistd::{dup2, fork, pipe, ForkResult};

use crate::ast::SimpleCommand;
use crate::error::ExecError;
use crate::executor::builtin::BuiltinManager;
use crate::executor::command::{self, Dispatch};
use crate::executor::fork_executor::wait_for;

/// Runs `left | right` with both stages alive at the same time and waits
/// for both. Returns the consumer's exit status.
///
/// The caller is the forked child for the whole line; it supervises the
/// two stage processes and never runs a stage itself. The consumer is
/// resolved on `PATH` only, so `ls | cat` always reaches the system `cat`.
pub fn run(left: &SimpleCommand<'_>, right: &SimpleCommand<'_>, builtins: &BuiltinManager) -> Result<i32, ExecError> {
    let (read_end, write_end) = pipe().map_err(ExecError::sys("pipe"))?;

    let consumer = match unsafe { fork() }.map_err(ExecError::sys("fork"))? {
        ForkResult::Child => {
            let wired = dup2(read_end.as_raw_fd(), libc::STDIN_FILENO);
            drop(read_end);
            drop(write_end);
            if let Err(e) = wired {
                command::die(ExecError::sys("dup2")(e));
            }
            command::run_stage(right, builtins, Dispatch::ExternalOnly)
        }
        ForkResult::Parent { child } => child,
    };

    let producer = match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            let wired = dup2(write_end.as_raw_fd(), libc::STDOUT_FILENO);
            drop(read_end);
            drop(write_end);
            if let Err(e) = wired {
                command::die(ExecError::sys("dup2")(e));
            }
            command::run_stage(left, builtins, Dispatch::Builtins)
        }
        Ok(ForkResult::Parent { child }) => child,
        Err(e) => {
            // Closing our ends gives the consumer EOF so it can finish.
            drop(read_end);
            drop(write_end);
            wait_for(consumer).map_err(ExecError::sys("waitpid"))?;
            return Err(ExecError::sys("fork")(e));
        }
    };
    debug!("pipeline producer {} -> consumer {}", producer, consumer);

    // The consumer only sees EOF once every copy of the write end is closed.
    drop(read_end);
    drop(write_end);

    let producer_code = wait_for(producer).map_err(ExecError::sys("waitpid"))?;
    let consumer_code = wait_for(consumer).map_err(ExecError::sys("waitpid"))?;
    debug!("pipeline finished: producer {}, consumer {}", producer_code, consumer_code);
    Ok(consumer_code)
}
