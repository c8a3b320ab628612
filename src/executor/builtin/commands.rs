use std::env;
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};

use crate::error::ExecError;
use crate::executor::builtin::manager::BuiltinCommand;

fn failed(name: &'static str) -> impl FnOnce(io::Error) -> ExecError {
    move |source| ExecError::Builtin { name, source }
}

pub struct LsCommand;

impl BuiltinCommand for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }
    fn synopsis(&self) -> &'static str {
        "ls"
    }
    fn arity(&self) -> usize {
        0
    }
    fn run(&self, _args: &[&str], out: &mut dyn Write) -> Result<(), ExecError> {
        let entries = fs::read_dir(".").map_err(failed("ls"))?;
        // readdir(3) reports these two as well; read_dir skips them.
        writeln!(out, ".\n..")?;
        for entry in entries {
            let entry = entry.map_err(failed("ls"))?;
            writeln!(out, "{}", entry.file_name().to_string_lossy())?;
        }
        Ok(())
    }
}

pub struct PwdCommand;

impl BuiltinCommand for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }
    fn synopsis(&self) -> &'static str {
        "pwd"
    }
    fn arity(&self) -> usize {
        0
    }
    fn run(&self, _args: &[&str], out: &mut dyn Write) -> Result<(), ExecError> {
        let cwd = env::current_dir().map_err(failed("pwd"))?;
        writeln!(out, "{}", cwd.display())?;
        Ok(())
    }
}

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn synopsis(&self) -> &'static str {
        "cd <dir>"
    }
    fn arity(&self) -> usize {
        1
    }
    fn run(&self, args: &[&str], _out: &mut dyn Write) -> Result<(), ExecError> {
        env::set_current_dir(args[0]).map_err(failed("cd"))
    }
}

pub struct MkdirCommand;

impl BuiltinCommand for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }
    fn synopsis(&self) -> &'static str {
        "mkdir <dir>"
    }
    fn arity(&self) -> usize {
        1
    }
    fn run(&self, args: &[&str], _out: &mut dyn Write) -> Result<(), ExecError> {
        DirBuilder::new().mode(0o777).create(args[0]).map_err(failed("mkdir"))
    }
}

pub struct RmdirCommand;

impl BuiltinCommand for RmdirCommand {
    fn name(&self) -> &'static str {
        "rmdir"
    }
    fn synopsis(&self) -> &'static str {
        "rmdir <dir>"
    }
    fn arity(&self) -> usize {
        1
    }
    fn run(&self, args: &[&str], _out: &mut dyn Write) -> Result<(), ExecError> {
        fs::remove_dir(args[0]).map_err(failed("rmdir"))
    }
}

/// Hard link only.
pub struct LnCommand;

impl BuiltinCommand for LnCommand {
    fn name(&self) -> &'static str {
        "ln"
    }
    fn synopsis(&self) -> &'static str {
        "ln <target> <link>"
    }
    fn arity(&self) -> usize {
        2
    }
    fn run(&self, args: &[&str], _out: &mut dyn Write) -> Result<(), ExecError> {
        fs::hard_link(args[0], args[1]).map_err(failed("ln"))
    }
}

pub struct RmCommand;

impl BuiltinCommand for RmCommand {
    fn name(&self) -> &'static str {
        "rm"
    }
    fn synopsis(&self) -> &'static str {
        "rm <file>"
    }
    fn arity(&self) -> usize {
        1
    }
    fn run(&self, args: &[&str], _out: &mut dyn Write) -> Result<(), ExecError> {
        fs::remove_file(args[0]).map_err(failed("rm"))
    }
}

pub struct CpCommand;

impl BuiltinCommand for CpCommand {
    fn name(&self) -> &'static str {
        "cp"
    }
    fn synopsis(&self) -> &'static str {
        "cp <src> <dst>"
    }
    fn arity(&self) -> usize {
        2
    }
    fn run(&self, args: &[&str], _out: &mut dyn Write) -> Result<(), ExecError> {
        let mut src = File::open(args[0]).map_err(failed("cp"))?;
        let mut dst = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o666)
            .open(args[1])
            .map_err(failed("cp"))?;
        io::copy(&mut src, &mut dst).map_err(failed("cp"))?;
        Ok(())
    }
}

pub struct MvCommand;

impl BuiltinCommand for MvCommand {
    fn name(&self) -> &'static str {
        "mv"
    }
    fn synopsis(&self) -> &'static str {
        "mv <src> <dst>"
    }
    fn arity(&self) -> usize {
        2
    }
    fn run(&self, args: &[&str], _out: &mut dyn Write) -> Result<(), ExecError> {
        fs::rename(args[0], args[1]).map_err(failed("mv"))
    }
}

pub struct CatCommand;

impl BuiltinCommand for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }
    fn synopsis(&self) -> &'static str {
        "cat <file>"
    }
    fn arity(&self) -> usize {
        1
    }
    fn run(&self, args: &[&str], out: &mut dyn Write) -> Result<(), ExecError> {
        let mut file = File::open(args[0]).map_err(failed("cat"))?;
        io::copy(&mut file, out).map_err(failed("cat"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn path_str(p: &Path) -> &str {
        p.to_str().unwrap()
    }

    fn run(cmd: &dyn BuiltinCommand, args: &[&str]) -> Result<Vec<u8>, ExecError> {
        let mut out = Vec::new();
        cmd.run(args, &mut out).map(|_| out)
    }

    #[test]
    fn test_mkdir_and_rmdir() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("x");
        run(&MkdirCommand, &[path_str(&sub)]).unwrap();
        assert!(sub.is_dir());

        let err = run(&MkdirCommand, &[path_str(&sub)]).unwrap_err();
        assert!(matches!(err, ExecError::Builtin { name: "mkdir", .. }));

        run(&RmdirCommand, &[path_str(&sub)]).unwrap();
        assert!(!sub.exists());
    }

    #[test]
    fn test_cp_copies_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.bin");
        let dst = dir.path().join("dst.bin");
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();
        fs::write(&dst, b"stale contents that are longer than nothing").unwrap();

        run(&CpCommand, &[path_str(&src), path_str(&dst)]).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), data);
    }

    #[test]
    fn test_cp_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("dst");
        let err = run(&CpCommand, &[path_str(&dir.path().join("nope")), path_str(&dst)]).unwrap_err();
        assert!(err.to_string().starts_with("cp: "));
        assert!(!dst.exists());
    }

    #[test]
    fn test_ln_creates_hard_link() {
        use std::os::unix::fs::MetadataExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target");
        let link = dir.path().join("link");
        fs::write(&target, b"data").unwrap();

        run(&LnCommand, &[path_str(&target), path_str(&link)]).unwrap();
        let a = fs::metadata(&target).unwrap();
        let b = fs::metadata(&link).unwrap();
        assert_eq!(a.ino(), b.ino());
        assert_eq!(a.nlink(), 2);
    }

    #[test]
    fn test_rm_and_mv() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"moved").unwrap();

        run(&MvCommand, &[path_str(&a), path_str(&b)]).unwrap();
        assert!(!a.exists());
        assert_eq!(fs::read(&b).unwrap(), b"moved");

        run(&RmCommand, &[path_str(&b)]).unwrap();
        assert!(!b.exists());
        assert!(run(&RmCommand, &[path_str(&b)]).is_err());
    }

    #[test]
    fn test_cat_streams_large_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("big");
        let data = vec![b'z'; 64 * 1024 + 17];
        fs::write(&file, &data).unwrap();
        assert_eq!(run(&CatCommand, &[path_str(&file)]).unwrap(), data);
    }

    #[test]
    fn test_pwd_prints_current_dir() {
        let out = run(&PwdCommand, &[]).unwrap();
        let expected = format!("{}\n", env::current_dir().unwrap().display());
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
