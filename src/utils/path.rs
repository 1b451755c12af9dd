use std::borrow::Cow;
use std::env;

use log::error;

pub fn basename(path: &str) -> Cow<'_, str> {
    let mut pieces = path.rsplit('/');
    match pieces.next() {
        Some(p) => p.into(),
        None => path.into(),
    }
}

pub fn current_dir() -> String {
    let current_dir = match env::current_dir() {
        Ok(x) => x,
        Err(e) => {
            error!("oxsh: env current_dir error: {}", e);
            return String::new();
        }
    };
    match current_dir.to_str() {
        Some(x) => x.to_string(),
        None => {
            error!("oxsh: current_dir is not valid utf-8");
            String::new()
        }
    }
}

pub fn home_dir() -> String {
    match env::var("HOME") {
        Ok(home) => home,
        Err(_) => String::from("/"),
    }
}
