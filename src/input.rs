//! Input collaborators for the interactive tool
//!
//! The pipeline itself only needs a file path; where that path comes from is
//! pluggable. The default implementation prompts on the console.

use crate::error::{Error, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Source of the input spreadsheet path
pub trait InputSource {
    /// Produce the path of the spreadsheet to process
    fn pick_file(&self) -> Result<PathBuf>;
}

/// Prompts for a path on the console
#[derive(Clone, Copy, Debug, Default)]
pub struct PromptInput;

impl InputSource for PromptInput {
    fn pick_file(&self) -> Result<PathBuf> {
        print!("Path to the tracking-number spreadsheet: ");
        std::io::stdout().flush().ok();
        let stdin = std::io::stdin();
        let mut locked = stdin.lock();
        read_path(&mut locked)
    }
}

/// Parse one line of input into an existing file path
///
/// Surrounding whitespace and quotes (as left by shell drag-and-drop) are
/// stripped. An empty line means the user selected nothing.
fn read_path(reader: &mut impl BufRead) -> Result<PathBuf> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let trimmed = line.trim().trim_matches(|c| c == '"' || c == '\'');

    if trimmed.is_empty() {
        return Err(Error::InputFile("no file selected".to_string()));
    }

    let path = PathBuf::from(trimmed);
    if !path.is_file() {
        return Err(Error::InputFile(format!(
            "'{}' does not exist or is not a file",
            path.display()
        )));
    }
    Ok(path)
}

/// Confirmation gate: print a prompt and block until the user presses Enter
pub fn wait_for_enter(prompt: &str) {
    print!("{prompt}");
    std::io::stdout().flush().ok();
    let mut line = String::new();
    std::io::stdin().read_line(&mut line).ok();
}
