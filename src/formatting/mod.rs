use crate::risk::CleanedCategory;
use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiMode {
    Auto,
    Always,
    Never,
}

impl EmojiMode {
    pub fn should_use_emoji(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_emoji_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub emoji: EmojiMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            emoji: EmojiMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, emoji: EmojiMode) -> Self {
        Self { color, emoji }
    }

    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Resolve `NO_COLOR`, `CLICOLOR` and `CLICOLOR_FORCE` through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        // Per no-color.org any value disables color
        if lookup("NO_COLOR").is_some() {
            config.color = ColorMode::Never;
        }

        if lookup("CLICOLOR").as_deref() == Some("0") {
            config.color = ColorMode::Never;
        }

        if lookup("CLICOLOR_FORCE").as_deref() == Some("1") {
            config.color = ColorMode::Always;
        }

        config
    }

    /// Create a plain output configuration (ASCII-only, no colors, no emoji)
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            emoji: EmojiMode::Never,
        }
    }
}

pub trait OutputFormatter {
    fn header(&self, text: &str) -> String;
    fn success(&self, text: &str) -> String;
    fn warning(&self, text: &str) -> String;
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    fn emoji(&self, emoji: &str, fallback: &str) -> String;
    fn category(&self, category: CleanedCategory) -> String;
}

pub struct ColoredFormatter {
    use_color: bool,
    use_emoji: bool,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        let use_color = config.color.should_use_color();
        if config.color != ColorMode::Auto {
            colored::control::set_override(use_color);
        }

        Self {
            use_color,
            use_emoji: config.emoji.should_use_emoji(),
        }
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.use_color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn header(&self, text: &str) -> String {
        self.paint(text, |t| t.blue().bold())
    }

    fn success(&self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    fn warning(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow())
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, |t| t.dimmed())
    }

    fn emoji(&self, emoji: &str, fallback: &str) -> String {
        if self.use_emoji {
            emoji.to_string()
        } else {
            fallback.to_string()
        }
    }

    fn category(&self, category: CleanedCategory) -> String {
        let label = category.label();
        match category {
            CleanedCategory::TrueReducer => self.paint(label, |t| t.green()),
            CleanedCategory::OffsetHeavy => self.paint(label, |t| t.yellow()),
            CleanedCategory::PotentialGreenwasher => self.paint(label, |t| t.red().bold()),
            CleanedCategory::Other => self.paint(label, |t| t.dimmed()),
        }
    }
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}

fn detect_emoji_support() -> bool {
    std::io::stdout().is_terminal() && locale_supports_emoji(|name| env::var(name).ok())
}

/// Emoji need a UTF-8 locale and a terminal that can draw wide glyphs.
fn locale_supports_emoji(lookup: impl Fn(&str) -> Option<String>) -> bool {
    if matches!(lookup("TERM").as_deref(), Some("dumb") | Some("linux")) {
        return false;
    }

    // First non-empty of LC_ALL, LC_CTYPE, LANG decides, as in setlocale(3)
    let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
        .into_iter()
        .filter_map(&lookup)
        .find(|value| !value.is_empty());

    match locale {
        Some(value) => {
            let value = value.to_ascii_lowercase();
            value.contains("utf-8") || value.contains("utf8")
        }
        None => cfg!(windows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_emoji_follow_locale_not_color() {
        assert!(locale_supports_emoji(vars(&[("LANG", "en_US.UTF-8")])));
        assert!(locale_supports_emoji(vars(&[
            ("LC_ALL", "C.utf8"),
            ("LANG", "C"),
            ("NO_COLOR", "1"),
        ])));
        assert!(!locale_supports_emoji(vars(&[("LC_ALL", "C"), ("LANG", "en_US.UTF-8")])));
        assert!(!locale_supports_emoji(vars(&[
            ("TERM", "linux"),
            ("LANG", "en_US.UTF-8"),
        ])));
    }

    #[test]
    fn test_empty_locale_variable_falls_through() {
        assert!(locale_supports_emoji(vars(&[
            ("LC_ALL", ""),
            ("LC_CTYPE", "de_DE.UTF-8"),
        ])));
    }

    #[test]
    fn test_no_color_disables_color() {
        let config = FormattingConfig::from_vars(vars(&[("NO_COLOR", "")]));
        assert_eq!(config.color, ColorMode::Never);
    }

    #[test]
    fn test_clicolor_zero_disables_and_force_wins() {
        let config = FormattingConfig::from_vars(vars(&[("CLICOLOR", "0")]));
        assert_eq!(config.color, ColorMode::Never);

        let config =
            FormattingConfig::from_vars(vars(&[("NO_COLOR", "1"), ("CLICOLOR_FORCE", "1")]));
        assert_eq!(config.color, ColorMode::Always);
    }

    #[test]
    fn test_plain_formatter_returns_text_unchanged() {
        let formatter = ColoredFormatter::new(FormattingConfig::plain());
        assert_eq!(formatter.header("Summary"), "Summary");
        assert_eq!(formatter.emoji("📊", "[STATS]"), "[STATS]");
        assert_eq!(formatter.category(CleanedCategory::OffsetHeavy), "Offset-Heavy");
    }
}
