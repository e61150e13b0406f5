use owo_colors::{OwoColorize, Style};
use std::sync::OnceLock;

/// What a piece of console text means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Good,
    Bad,
    Caution,
    Muted,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Tone::Heading => Style::new().cyan().bold(),
            Tone::Good => Style::new().green().bold(),
            Tone::Bad => Style::new().red().bold(),
            Tone::Caution => Style::new().yellow().bold(),
            Tone::Muted => Style::new().bright_black(),
        }
    }
}

/// Whether console text gets ANSI styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    colored: bool,
}

impl Theme {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Colored when stdout is a terminal and NO_COLOR / CLICOLOR allow it
    pub fn for_stdout() -> Self {
        Self::new(console::Term::stdout().is_term() && console::colors_enabled())
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if self.colored {
            text.style(tone.style()).to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn theme() -> Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    *THEME.get_or_init(Theme::for_stdout)
}
