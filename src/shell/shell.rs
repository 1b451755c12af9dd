use log::{debug, error, warn};
use nix::unistd::{fork, ForkResult};
use std::error::Error;
use std::io::Write;
use std::process;

use crate::shell::alias::AliasTable;
use crate::shell::builtins::{self, BuiltinAction};
use crate::shell::executor::{self, Executor};
use crate::shell::history::HistoryLog;
use crate::shell::parser::parser;
use crate::shell::readline::{ReadlineError, ReadlineManager};
use crate::shell::signals;
use crate::utils::config::Config;
use crate::utils::prompt;
use crate::utils::theme::Theme;

pub struct Shell<'a> {
    theme: Theme,
    readline: ReadlineManager<'a>,
    history: HistoryLog,
    executor: Executor,
}

impl<'a> Shell<'a> {
    pub fn new(config: &'a Config, theme: Theme) -> Self {
        Self {
            theme,
            readline: ReadlineManager::new(config),
            history: HistoryLog::new(),
            executor: Executor::new(AliasTable::with_defaults()),
        }
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        debug!("initializing oxsh...");
        signals::ignore_block_signals();
        self.readline.load_history()?;

        println!(
            "{}",
            (self.theme.success_style)(self.theme.welcome_message.clone())
        );
        debug!("oxsh ready...");

        self.run_loop()?;
        self.readline.save_history()?;

        debug!("leaving oxsh...");
        Ok(())
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn Error>> {
        loop {
            std::io::stdout().flush()?;
            let prompt = (self.theme.prompt_style)(prompt::command_prompt());

            match self.readline.readline(&prompt) {
                Ok(line) => {
                    if !self.handle_line(&line)? {
                        println!(
                            "{}",
                            (self.theme.success_style)(self.theme.farewell_message.clone())
                        );
                        break;
                    }
                }
                Err(err) => match err {
                    ReadlineError::Eof => {
                        warn!("EOF received, leaving oxsh...");
                        println!(
                            "\n{}",
                            (self.theme.success_style)(self.theme.farewell_message.clone())
                        );
                        break;
                    }
                    ReadlineError::Interrupted => {
                        warn!("interrupt received...");
                    }
                    err => {
                        error!("readline error: {}", err);
                        eprintln!("{}", (self.theme.error_style)(format!("error: {}", err)));
                    }
                },
            }
        }
        Ok(())
    }

    /// Returns false when the line asked the interpreter to stop.
    fn handle_line(&mut self, line: &str) -> Result<bool, Box<dyn Error>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(true);
        }

        // every accepted line is recorded, builtin invocations included
        self.history.push(line);
        self.readline.add_history(line.to_string())?;

        match builtins::dispatch(line, &self.history) {
            Some(Ok(BuiltinAction::Quit)) => return Ok(false),
            Some(Ok(BuiltinAction::Continue)) => return Ok(true),
            Some(Err(err)) => {
                error!("builtin failed: {}", err);
                eprintln!(
                    "{} {}",
                    (self.theme.error_style)(self.theme.error_symbol.clone()),
                    (self.theme.error_style)(err.to_string())
                );
                return Ok(true);
            }
            None => {}
        }

        self.spawn_line(line);
        Ok(true)
    }

    /// Every non-builtin line gets a process of its own: the child parses
    /// and realizes the tree, the interpreter only waits and reports. A
    /// failure inside the child abandons that line, never the interpreter.
    fn spawn_line(&self, line: &str) {
        debug!("running: {}", line);
        match unsafe { fork() } {
            Ok(ForkResult::Child) => {
                signals::restore_default_signals();
                let status = match parser::parse(line) {
                    Ok(tree) => match self.executor.run(tree) {
                        Ok(status) => status,
                        Err(err) => {
                            executor::report(&err.to_string());
                            1
                        }
                    },
                    Err(err) => {
                        executor::report(&err);
                        2
                    }
                };
                process::exit(status);
            }
            Ok(ForkResult::Parent { child }) => match executor::wait_for(child) {
                Ok(0) => debug!("line completed"),
                Ok(status) => {
                    warn!("line exited with status {}", status);
                    eprintln!(
                        "{} {}",
                        (self.theme.error_style)(self.theme.error_symbol.clone()),
                        (self.theme.error_style)(format!("exit status {}", status))
                    );
                }
                Err(err) => error!("wait failed: {}", err),
            },
            Err(err) => {
                error!("fork failed: {}", err);
                executor::report(&format!("fork failed: {}", err));
            }
        }
    }
}
