use std::env;

use crate::utils::path;

/// Renders the `[user@host cwd]> ` prompt. The home directory shows as `~`,
/// anything else is shortened to its last component.
pub fn command_prompt() -> String {
    let username = env::var("USER").unwrap_or_else(|_| String::from("user"));
    let hostname = short_hostname();
    let cwd = short_cwd(&path::current_dir(), &path::home_dir());
    format!("[{}@{} {}]> ", username, hostname, cwd)
}

fn short_hostname() -> String {
    let hostname = match nix::unistd::gethostname() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(_) => String::from("localhost"),
    };
    match hostname.split('.').next() {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => hostname,
    }
}

fn short_cwd(cwd: &str, home: &str) -> String {
    let home = home.trim_end_matches('/');
    if !home.is_empty() && cwd == home {
        String::from("~")
    } else if cwd != "/" {
        path::basename(cwd).into_owned()
    } else {
        String::from("/")
    }
}
