//! Console input and output.

use std::io::{self, BufRead, Write};

const LOGO: &str = r"    ____
 __/  |_\_
|  _     _``-.
'-(_)---(_)--'   _  _____ _  _  ___
  _ __  __ _ _ _| |/ /_ _| \| |/ __|
 | '_ \/ _` | '_| ' < | || .` | (_ |
 | .__/\__,_|_| |_|\_\___|_|\_|\___|
 |_|";

pub const COMMAND_PROMPT: &str = "Enter a command:";
pub const NAME_PROMPT: &str = "What is your name?";
pub const LOADING_MESSAGE: &str = "Trying to load data...";
pub const LOADED_MESSAGE: &str = "Load data sequence successful!";

/// Line-oriented console over any reader and writer.
pub struct Ui<R, W> {
    input: R,
    output: W,
}

impl Ui<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Ui<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Next line without its terminator, or `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn read_command(&mut self) -> io::Result<Option<String>> {
        self.print(COMMAND_PROMPT)?;
        self.read_line()
    }

    /// Logo, then ask for a name and greet.
    pub fn greet_user(&mut self) -> io::Result<()> {
        self.print(LOGO)?;
        self.print(NAME_PROMPT)?;
        let name = self.read_line()?.unwrap_or_default();
        let name = name.trim();
        if name.is_empty() {
            self.print("Welcome to parKING!")
        } else {
            self.print(&format!("Welcome to parKING, {name}!"))
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
