mod command;
mod executor;
mod fork_executor;
mod path_resolver;
mod pipeline;
mod redirect;
pub mod builtin;

pub use builtin::{BuiltinCommand, BuiltinManager};
pub use executor::{ExecOutcome, ExecStatus, Executor};
pub use fork_executor::ForkExecutor;
pub use path_resolver::PathResolver;
