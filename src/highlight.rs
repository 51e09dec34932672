use inksac::prelude::*;

use crate::core::tokenizer::COMMAND_SEPARATOR;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// Highlighter that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colour the verb of every sub-command, flags and separators.
    ///
    /// Whitespace is kept as typed so cursor positions stay valid.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let verb_style = Style::builder().foreground(Color::Cyan).bold().build();
        let flag_style = Style::builder().foreground(Color::Yellow).build();
        let separator_style = Style::builder().foreground(Color::Magenta).build();

        let mut output = String::with_capacity(input.len() * 2);
        let mut at_verb = true;
        let mut rest = input;

        while !rest.is_empty() {
            let ws_len = rest.len() - rest.trim_start().len();
            output.push_str(&rest[..ws_len]);
            rest = &rest[ws_len..];
            if rest.is_empty() {
                break;
            }

            if let Some(tail) = rest.strip_prefix(COMMAND_SEPARATOR) {
                output.push_str(&COMMAND_SEPARATOR.to_string().style(separator_style).to_string());
                at_verb = true;
                rest = tail;
                continue;
            }

            let end = rest
                .find(|c: char| c.is_whitespace() || c == COMMAND_SEPARATOR)
                .unwrap_or(rest.len());
            let word = &rest[..end];

            if at_verb {
                output.push_str(&word.style(verb_style).to_string());
                at_verb = false;
            } else if word.starts_with('-') {
                output.push_str(&word.style(flag_style).to_string());
            } else {
                output.push_str(word);
            }
            rest = &rest[end..];
        }

        output
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}
