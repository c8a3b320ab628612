use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

const INTERACTIVE: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];

extern "C" fn report_signal(signo: libc::c_int) {
    let msg: &[u8] = match signo {
        libc::SIGINT => b"\nSIGINT (Ctrl-C)\n",
        libc::SIGQUIT => b"\nSIGQUIT (Ctrl-\\)\n",
        _ => return,
    };
    // Only async-signal-safe calls in here.
    unsafe {
        libc::write(libc::STDOUT_FILENO, msg.as_ptr().cast(), msg.len());
    }
}

/// Makes Ctrl-C and Ctrl-\ print a note instead of killing the interpreter.
///
/// The foreground child shares the terminal's process group and gets the
/// signal from the kernel directly; nothing is forwarded from here.
pub fn install_interactive_handlers() -> nix::Result<()> {
    let action = SigAction::new(SigHandler::Handler(report_signal), SaFlags::SA_RESTART, SigSet::empty());
    for sig in INTERACTIVE {
        unsafe { signal::sigaction(sig, &action)? };
    }
    Ok(())
}

/// Puts the interactive signals back to their default dispositions.
/// Called in every forked child before it runs a command.
pub fn reset_to_default() -> nix::Result<()> {
    let action = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    for sig in INTERACTIVE {
        unsafe { signal::sigaction(sig, &action)? };
    }
    Ok(())
}
