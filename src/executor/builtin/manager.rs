use std::io::Write;

use crate::error::ExecError;
use crate::executor::builtin::commands::{
    CatCommand, CdCommand, CpCommand, LnCommand, LsCommand, MkdirCommand, MvCommand, PwdCommand, RmCommand,
    RmdirCommand,
};

pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn synopsis(&self) -> &'static str;
    /// Exact number of arguments `run` expects.
    fn arity(&self) -> usize;
    fn run(&self, args: &[&str], out: &mut dyn Write) -> Result<(), ExecError>;
}

/// The built-in table. Lookup order is registration order.
pub struct BuiltinManager {
    commands: Vec<Box<dyn BuiltinCommand>>,
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager { commands: Vec::new() };
        mgr.register(Box::new(LsCommand));
        mgr.register(Box::new(PwdCommand));
        mgr.register(Box::new(CdCommand));
        mgr.register(Box::new(MkdirCommand));
        mgr.register(Box::new(RmdirCommand));
        mgr.register(Box::new(LnCommand));
        mgr.register(Box::new(RmCommand));
        mgr.register(Box::new(CpCommand));
        mgr.register(Box::new(MvCommand));
        mgr.register(Box::new(CatCommand));
        mgr
    }

    pub fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.push(cmd);
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn BuiltinCommand> {
        self.commands.iter().find(|c| c.name() == name).map(|c| &**c)
    }

    /// Runs `name` after checking its argument count.
    pub fn execute(&self, name: &str, args: &[&str], out: &mut dyn Write) -> Result<(), ExecError> {
        let cmd = self.lookup(name).ok_or_else(|| ExecError::NoSuchBuiltin(name.to_string()))?;
        if args.len() != cmd.arity() {
            return Err(ExecError::Usage { name: cmd.name(), synopsis: cmd.synopsis() });
        }
        cmd.run(args, out)
    }
}
