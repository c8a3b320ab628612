use std::io::{self, BufRead, ErrorKind, Write};

use log::{debug, error};

use crate::config::Config;
use crate::executor::{ExecOutcome, Executor};
use crate::parser::parse_line;
use crate::prompt::ShellPrompt;

pub const EXIT_COMMAND: &str = "exit";

/// The read-eval loop. Returns when the user types `exit` or input ends.
pub fn run<R, W, E>(config: &Config, input: R, output: W, executor: &mut E) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Executor + ?Sized,
{
    let mut prompt = ShellPrompt::new(&config.prompt, input, output);

    loop {
        executor.reap();
        prompt.show_prompt()?;

        let line = match prompt.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                eprintln!("simplesh: {}", e);
                continue;
            }
            Err(e) => {
                error!("reading input failed: {}", e);
                return Err(e);
            }
        };

        if line.trim() == EXIT_COMMAND {
            prompt.say(&config.farewell)?;
            break;
        }

        let parsed = match parse_line(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("simplesh: {}", e);
                continue;
            }
        };

        match executor.exec(&parsed) {
            Ok(ExecOutcome::Code(code)) => debug!("`{}` finished with {}", line, code),
            Ok(ExecOutcome::Background(pid)) => debug!("`{}` detached as {}", line, pid),
            Err(e) => eprintln!("simplesh: {}", e),
        }
    }

    Ok(())
}
