use std::ffi::CString;
use std::io::{self, Write};
use std::os::unix::ffi::OsStringExt;

use log::debug;
use nix::unistd::execv;

use crate::ast::SimpleCommand;
use crate::error::ExecError;
use crate::executor::builtin::BuiltinManager;
use crate::executor::path_resolver::PathResolver;
use crate::executor::redirect;

/// Which table a stage is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Built-ins first, then `PATH`.
    Builtins,
    /// `PATH` only.
    ExternalOnly,
}

/// Runs one stage in the current process and exits with its status.
/// Only ever called in a forked child.
pub fn run_stage(cmd: &SimpleCommand<'_>, builtins: &BuiltinManager, dispatch: Dispatch) -> ! {
    match dispatch_stage(cmd, builtins, dispatch) {
        Ok(code) => exit_child(code),
        Err(e) => die(e),
    }
}

fn dispatch_stage(cmd: &SimpleCommand<'_>, builtins: &BuiltinManager, dispatch: Dispatch) -> Result<i32, ExecError> {
    redirect::apply(&cmd.redirects)?;

    if dispatch == Dispatch::Builtins && runs_as_builtin(cmd, builtins) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        builtins.execute(cmd.name(), cmd.args(), &mut out)?;
        out.flush()?;
        return Ok(0);
    }

    exec_external(&cmd.argv)
}

/// A built-in only handles its own arity. Other forms go to a program of
/// the same name when there is one (`ls -l`, or a bare `cat` reading
/// stdin); without one the built-in reports its usage.
fn runs_as_builtin(cmd: &SimpleCommand<'_>, builtins: &BuiltinManager) -> bool {
    match builtins.lookup(cmd.name()) {
        Some(builtin) => builtin.arity() == cmd.args().len() || PathResolver.resolve(cmd.name()).is_none(),
        None => false,
    }
}

/// Replaces the process image with the program named by `argv[0]`.
/// Returns only on failure.
fn exec_external(argv: &[&str]) -> Result<i32, ExecError> {
    let name = argv[0];
    let path = PathResolver
        .resolve(name)
        .ok_or_else(|| ExecError::CommandNotFound(name.to_string()))?;
    debug!("exec {} as {}", name, path.display());

    let path = CString::new(path.into_os_string().into_vec())?;
    let args = argv
        .iter()
        .map(|arg| CString::new(*arg))
        .collect::<Result<Vec<_>, _>>()?;

    match execv(&path, &args).map_err(|source| ExecError::Exec { name: name.to_string(), source })? {}
}

/// Reports `err` on stderr and exits with the matching status.
pub fn die(err: ExecError) -> ! {
    eprintln!("simplesh: {}", err);
    exit_child(err.exit_code())
}

pub fn exit_child(code: i32) -> ! {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
    std::process::exit(code)
}
