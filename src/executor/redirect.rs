use std::fs::{File, OpenOptions};
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;

use log::trace;
use nix::unistd::dup2;

use crate::ast::{Redirect, RedirectKind};
use crate::error::ExecError;

/// Rebinds stdin/stdout of the current process to the redirect targets,
/// in order. Must only run in a forked child.
///
/// The opened file is closed once it has been duplicated, so the program
/// that runs next sees nothing but fds 0, 1 and 2. On the first failure
/// nothing further is applied and the caller must not run the command.
pub fn apply(redirects: &[Redirect<'_>]) -> Result<(), ExecError> {
    for redirect in redirects {
        let (file, fd) = open_target(redirect)?;
        dup2(file.as_raw_fd(), fd).map_err(ExecError::sys("dup2"))?;
        trace!("{:?} {} bound to fd {}", redirect.kind, redirect.target, fd);
    }
    Ok(())
}

fn open_target(redirect: &Redirect<'_>) -> Result<(File, RawFd), ExecError> {
    let opened = match redirect.kind {
        RedirectKind::In => File::open(redirect.target).map(|f| (f, libc::STDIN_FILENO)),
        RedirectKind::Out => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o644)
            .open(redirect.target)
            .map(|f| (f, libc::STDOUT_FILENO)),
    };
    opened.map_err(|source| ExecError::Redirect { target: redirect.target.to_string(), source })
}
