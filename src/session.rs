use std::io::{BufRead, Write};

use tracing::debug;

use crate::commands::App;
use crate::dispatch::{Registry, tokenize};
use crate::error::{NclipError, Result};

pub const DEFAULT_APP_NAME: &str = "nclip";

/// Drives the registry either once or as a read-eval loop.
///
/// Dispatch and tokenizer errors are printed to the app's output and never
/// end the session; only failures of the output or input streams do.
pub struct Session<W: Write> {
    registry: Registry<App<W>>,
    app: App<W>,
    prompt: String,
}

impl<W: Write> Session<W> {
    pub fn new(registry: Registry<App<W>>, app: App<W>) -> Self {
        Self {
            registry,
            app,
            prompt: prompt_for(DEFAULT_APP_NAME),
        }
    }

    pub fn with_app_name(mut self, app_name: &str) -> Self {
        self.prompt = prompt_for(app_name);
        self
    }

    pub fn app(&self) -> &App<W> {
        &self.app
    }

    pub fn into_app(self) -> App<W> {
        self.app
    }

    pub fn is_running(&self) -> bool {
        self.app.running
    }

    pub fn print_hint(&mut self) -> Result<()> {
        writeln!(
            self.app.out,
            "use the help command for a list of all commands"
        )?;
        Ok(())
    }

    /// Executes an already split argument vector.
    pub fn run_once(&mut self, argv: &[String]) -> Result<()> {
        match self.registry.exec(&mut self.app, argv) {
            Ok(()) => Ok(()),
            Err(err) => self.report(&err),
        }
    }

    /// Executes one line of interactive input. Blank lines are ignored.
    pub fn exec_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim_matches(['\r', '\n', ' ']);
        if line.is_empty() {
            return Ok(());
        }

        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let mut argv = vec![name.to_string()];
        if !rest.is_empty() {
            match tokenize(rest) {
                Ok(args) => argv.extend(args),
                Err(err) => return self.report(&err),
            }
        }

        self.run_once(&argv)
    }

    /// Prompts and executes lines until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        let mut line = String::new();
        while self.app.running {
            write!(self.app.out, "{}", self.prompt)?;
            self.app.out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("end of input");
                break;
            }
            self.exec_line(&line)?;
        }
        Ok(())
    }

    fn report(&mut self, err: &NclipError) -> Result<()> {
        debug!(error = %err, "command failed");
        writeln!(self.app.out, "{err}")?;
        Ok(())
    }
}

fn prompt_for(app_name: &str) -> String {
    format!("[{app_name}]$ ")
}
