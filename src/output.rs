//! Printing and saving the generated README.

use crate::error::Result;
use clap::ValueEnum;
use colored::Colorize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// File written by `--save`, in the current directory
pub const README_FILENAME: &str = "README.md";

/// How the README is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Labelled block for reading in a terminal
    #[default]
    Preview,
    /// The markdown exactly as generated
    Raw,
}

/// Renders `content` for display
pub fn render(content: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Raw => format!("{}\n", content),
        OutputFormat::Preview => format!(
            "\n{}\n{}\n\n{}\n{}\n",
            "Generated README:".green().bold(),
            "=".repeat(40).green(),
            content.trim_end(),
            "=".repeat(40).green()
        ),
    }
}

/// Writes the rendered README to `out`
pub fn display<W: Write>(out: &mut W, content: &str, format: OutputFormat) -> Result<()> {
    out.write_all(render(content, format).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Writes `content` verbatim to `path`, replacing any existing file
pub fn save_readme(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
