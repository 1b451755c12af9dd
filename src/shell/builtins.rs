use log::debug;
use std::env;
use std::io;

use super::history::HistoryLog;
use crate::utils::path;

pub enum BuiltinAction {
    /// Builtin ran; read the next line.
    Continue,
    /// `quit`/`exit`: the read loop prints the farewell and stops.
    Quit,
}

/// Intercepts commands that must run in the interpreter's own process,
/// before any parsing. `None` means the line goes through the parser.
///
/// `quit`, `exit` and `history` are recognized only as the whole trimmed
/// line; `cd` by its first word, with the rest of the line as the target.
pub fn dispatch(line: &str, history: &HistoryLog) -> Option<io::Result<BuiltinAction>> {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("cd") => Some(change_dir(line).map(|_| BuiltinAction::Continue)),
        Some("quit") | Some("exit") if words.next().is_none() => Some(Ok(BuiltinAction::Quit)),
        Some("history") if words.next().is_none() => {
            print_history(history);
            Some(Ok(BuiltinAction::Continue))
        }
        _ => None,
    }
}

fn change_dir(line: &str) -> io::Result<()> {
    let target = line[2..].trim();
    let path = if target.is_empty() {
        path::home_dir()
    } else {
        shellexpand::tilde(target).into_owned()
    };
    debug!("cd {}", path);
    env::set_current_dir(path)
}

fn print_history(history: &HistoryLog) {
    for (index, entry) in history.iter().enumerate().rev() {
        println!("\t{}\t{}", index, entry);
    }
}
