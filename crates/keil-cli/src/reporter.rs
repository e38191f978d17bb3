//! Console sink for engine messages

use colored::Colorize;
use keil_core::Reporter;

/// Prints each engine message on stdout behind a coloured marker.
///
/// Messages about failures get a red marker so they stand out in the shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, message: &str) {
        if message.contains("failed") {
            println!("{} {}", "!!".red().bold(), message);
        } else {
            println!("{} {}", "=>".blue().bold(), message);
        }
    }
}
