//! Output formatting utilities
//!
//! Every printer writes to the given sink so that commands can be run
//! against a buffer as well as stdout.

use crate::error::Result;
use console::style;
use serde::Serialize;
use std::io::Write;

/// Output data as JSON
pub fn json_output<W: Write, T: Serialize>(out: &mut W, data: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, data)?;
    writeln!(out)?;
    Ok(())
}

/// Print a success message with green checkmark
pub fn print_success<W: Write>(out: &mut W, message: &str) -> Result<()> {
    writeln!(out, "{} {}", style("✓").green().bold(), message)?;
    Ok(())
}

/// Print a link/URL with label
pub fn print_link<W: Write>(out: &mut W, label: &str, url: &str) -> Result<()> {
    writeln!(out, "{} {}: {}", style("→").cyan(), label, style(url).dim())?;
    Ok(())
}

/// Print `key = value` lines with aligned keys
pub fn print_key_values<'a, W: Write>(
    out: &mut W,
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<()> {
    let pairs: Vec<_> = pairs.into_iter().collect();
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in pairs {
        writeln!(out, "{} = {}", style(format!("{key:<width$}")).bold(), value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_values_are_aligned() {
        let mut out = Vec::new();
        print_key_values(&mut out, [("production", "false"), ("auth.audience", "coffee")]).unwrap();

        let text = console::strip_ansi_codes(std::str::from_utf8(&out).unwrap()).to_string();
        assert_eq!(text, "production    = false\nauth.audience = coffee\n");
    }

    #[test]
    fn test_json_output_ends_with_newline() {
        let mut out = Vec::new();
        json_output(&mut out, &serde_json::json!({ "valid": true })).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"valid\": true\n}\n");
    }
}
