//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a progress line to stderr, overwriting the previous one.
pub fn progress(bytes_read: u64, percent: Option<f64>) {
    match percent {
        Some(percent) => eprint!("\r{} {:>5.1}% ({} bytes)", "↓".cyan(), percent, bytes_read),
        None => eprint!("\r{} {} bytes", "↓".cyan(), bytes_read),
    }
}
