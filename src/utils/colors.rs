/// ANSI color helper utilities for terminal output.
use ansi_term::Colour;
use chrono::Duration;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Delta color:
/// \>0 → red (short of target)
/// \<0 → green (ahead of target)
/// 0 → yellow
pub fn colour_for_delta(delta: Duration) -> Colour {
    if delta > Duration::zero() {
        Colour::Red
    } else if delta < Duration::zero() {
        Colour::Green
    } else {
        Colour::Yellow
    }
}

pub fn paint_delta(delta: Duration, text: &str) -> String {
    colour_for_delta(delta).paint(text).to_string()
}
