use std::io::IsTerminal;

use owo_colors::OwoColorize;

/// Whether colored output should be used (TTY + not `NO_COLOR`), matching
/// the teacher CLI's convention.
pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

pub fn fmt_good(text: &str) -> String {
    if use_color() {
        format!("{}", text.green())
    } else {
        text.to_string()
    }
}

pub fn fmt_section(text: &str) -> String {
    if use_color() {
        format!("{}", text.cyan())
    } else {
        text.to_string()
    }
}

pub fn fmt_dim(text: &str) -> String {
    if use_color() {
        format!("{}", text.dimmed())
    } else {
        text.to_string()
    }
}
