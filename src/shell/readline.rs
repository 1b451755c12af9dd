use crate::utils::config::Config;
use log::{debug, error, warn};
pub use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::Editor;
use rustyline::{CompletionType, Config as RLConfig};

pub struct ReadlineManager<'a> {
    config: &'a Config,
    editor: Editor<(), FileHistory>,
}

impl<'a> ReadlineManager<'a> {
    pub fn new(config: &'a Config) -> Self {
        let rl_config = RLConfig::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(config.get_edit_mode())
            .build();

        let editor = Editor::with_config(rl_config).unwrap_or_else(|err| {
            error!("unable to initialize readline: {}", err);
            panic!("unable to initialize readline");
        });
        Self { config, editor }
    }

    pub fn load_history(&mut self) -> Result<(), ReadlineError> {
        if let Err(err) = self.editor.load_history(&self.config.history_file) {
            warn!(
                "unable to load history: {} {}",
                self.config.history_file.display(),
                err
            );
        } else {
            debug!("history loaded");
        }
        Ok(())
    }

    pub fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        self.editor.readline(prompt)
    }

    pub fn add_history(&mut self, line: String) -> Result<bool, ReadlineError> {
        self.editor.add_history_entry(line)
    }

    pub fn save_history(&mut self) -> Result<(), ReadlineError> {
        if let Err(err) = self.editor.save_history(&self.config.history_file) {
            error!("unable to save history: {}", err);
        } else {
            debug!("history saved");
        }
        Ok(())
    }
}
