//! Terminal environment detection

use crate::output::Painter;

/// What the process is attached to
#[derive(Debug, Clone)]
pub struct Environment {
    pub stdin_isatty: bool,
    pub stdout_isatty: bool,
    pub stderr_isatty: bool,
    /// Number of colors the terminal supports; 0 disables color
    pub colors: u32,
    pub program_name: String,
}

impl Environment {
    pub fn init() -> Self {
        Self::default()
    }

    /// Prompts need a terminal on both ends
    pub fn is_interactive(&self) -> bool {
        self.stdin_isatty && self.stdout_isatty
    }

    pub fn painter(&self) -> Painter {
        Painter::new(self.colors > 0)
    }

    /// Plain environment for tests and piped output
    pub fn plain() -> Self {
        Self {
            stdin_isatty: false,
            stdout_isatty: false,
            stderr_isatty: false,
            colors: 0,
            program_name: "hrbridge".to_string(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            stdin_isatty: atty::is(atty::Stream::Stdin),
            stdout_isatty: atty::is(atty::Stream::Stdout),
            stderr_isatty: atty::is(atty::Stream::Stderr),
            colors: detect_color_support(),
            program_name: "hrbridge".to_string(),
        }
    }
}

fn detect_color_support() -> u32 {
    if !atty::is(atty::Stream::Stdout) {
        return 0;
    }

    if std::env::var_os("NO_COLOR").is_some() {
        return 0;
    }

    if let Ok(colorterm) = std::env::var("COLORTERM") {
        if colorterm == "truecolor" || colorterm == "24bit" {
            return 16_777_216;
        }
    }

    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return 0;
        }
    }

    256
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_environment() {
        let env = Environment::plain();
        assert!(!env.is_interactive());
        assert!(!env.painter().enabled());
    }
}
