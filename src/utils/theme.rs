use colored::Colorize;

pub struct Theme {
    pub prompt_style: Box<dyn Fn(String) -> String>,
    pub error_style: Box<dyn Fn(String) -> String>,
    pub success_style: Box<dyn Fn(String) -> String>,
    pub welcome_message: String,
    pub farewell_message: String,
    pub error_symbol: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            prompt_style: Box::new(|s| s.bright_cyan().to_string()),
            error_style: Box::new(|s| s.bright_red().to_string()),
            success_style: Box::new(|s| s.bright_green().to_string()),
            welcome_message: String::from("Welcome to oxsh. Pipes, redirection and a few builtins."),
            farewell_message: String::from("Bye from oxsh."),
            error_symbol: String::from("✗"),
        }
    }
}

pub fn load_theme(theme_name: &str) -> Theme {
    match theme_name {
        // plain keeps every byte unstyled, for dumb terminals and tests
        "plain" => Theme {
            prompt_style: Box::new(|s| s),
            error_style: Box::new(|s| s),
            success_style: Box::new(|s| s),
            error_symbol: String::from("!"),
            ..Theme::default()
        },
        _ => Theme::default(),
    }
}
