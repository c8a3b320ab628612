use std::io::{self, BufRead, Write};

/// Prints the prompt and reads one line at a time.
pub struct ShellPrompt<R, W> {
    prompt: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ShellPrompt<R, W> {
    pub fn new(prompt: &str, input: R, output: W) -> Self {
        ShellPrompt { prompt: prompt.to_string(), input, output }
    }

    pub fn show_prompt(&mut self) -> io::Result<()> {
        self.output.write_all(self.prompt.as_bytes())?;
        self.output.flush()
    }

    /// Next line without its trailing newline and whitespace, or `None`
    /// at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        let bytes_read = self.input.read_line(&mut buf)?;
        if bytes_read == 0 {
            // EOF (e.g., Ctrl-D)
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(buf.trim_end().to_string()))
    }

    pub fn say(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.output, "{}", msg)?;
        self.output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_lines_until_eof() {
        let mut out = Vec::new();
        let mut prompt = ShellPrompt::new("> ", Cursor::new("ls -l  \r\npwd"), &mut out);
        prompt.show_prompt().unwrap();
        assert_eq!(prompt.read_line().unwrap(), Some("ls -l".to_string()));
        assert_eq!(prompt.read_line().unwrap(), Some("pwd".to_string()));
        assert_eq!(prompt.read_line().unwrap(), None);
        drop(prompt);
        assert_eq!(out, b"> \n");
    }
}
