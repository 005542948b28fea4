//! Colored message prefixes for the binary's stderr notes.

use owo_colors::OwoColorize;

pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if use_colors() {
        "note:".bright_black().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn info_prefix() -> String {
    if use_colors() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}
