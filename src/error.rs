use std::ffi::NulError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ExecError {
    CommandNotFound(String),
    Io(io::Error),
    /// A system call made by the interpreter itself, named by `op`.
    Sys { op: &'static str, source: nix::Error },
    Exec { name: String, source: nix::Error },
    Usage { name: &'static str, synopsis: &'static str },
    Redirect { target: String, source: io::Error },
    Builtin { name: &'static str, source: io::Error },
    NulByte(NulError),
    NoSuchBuiltin(String),
}

impl ExecError {
    /// Wraps a failed system call so the report names it.
    pub fn sys(op: &'static str) -> impl FnOnce(nix::Error) -> ExecError {
        move |source| ExecError::Sys { op, source }
    }

    /// Exit status a child reports when it dies with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecError::CommandNotFound(_) => 127,
            ExecError::Exec { .. } | ExecError::NulByte(_) => 126,
            ExecError::Usage { .. } => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::CommandNotFound(cmd) => write!(f, "{}: command not found", cmd),
            ExecError::Io(e) => write!(f, "IO error: {}", e),
            ExecError::Sys { op, source } => write!(f, "{}: {}", op, source.desc()),
            ExecError::Exec { name, source } => write!(f, "{}: {}", name, source.desc()),
            ExecError::Usage { name, synopsis } => write!(f, "{}: usage: {}", name, synopsis),
            ExecError::Redirect { target, source } => write!(f, "open {}: {}", target, source),
            ExecError::Builtin { name, source } => write!(f, "{}: {}", name, source),
            ExecError::NulByte(_) => write!(f, "argument contains a NUL byte"),
            ExecError::NoSuchBuiltin(name) => write!(f, "No such builtin command: {}", name),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Io(e) => Some(e),
            ExecError::Sys { source, .. } => Some(source),
            ExecError::Exec { source, .. } => Some(source),
            ExecError::Redirect { source, .. } => Some(source),
            ExecError::Builtin { source, .. } => Some(source),
            ExecError::NulByte(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ExecError {
    fn from(e: io::Error) -> Self {
        ExecError::Io(e)
    }
}

impl From<NulError> for ExecError {
    fn from(e: NulError) -> Self {
        ExecError::NulByte(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::errno::Errno;

    #[test]
    fn test_reports_name_the_operation() {
        let err = ExecError::Redirect {
            target: "missing.txt".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("open missing.txt: "));
        assert_eq!(err.exit_code(), 1);

        let err = ExecError::sys("pipe")(Errno::EMFILE);
        assert_eq!(err.to_string(), format!("pipe: {}", Errno::EMFILE.desc()));
        assert_eq!(err.exit_code(), 1);

        let err = ExecError::sys("fork")(Errno::EAGAIN);
        assert!(err.to_string().starts_with("fork: "));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExecError::CommandNotFound("nope".to_string()).exit_code(), 127);
        let err = ExecError::Exec { name: "x".to_string(), source: Errno::EACCES };
        assert_eq!(err.exit_code(), 126);
        assert_eq!(err.to_string(), format!("x: {}", Errno::EACCES.desc()));
    }
}
