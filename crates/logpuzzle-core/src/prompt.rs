//! Interactive decisions behind a trait so the pipeline can run unattended.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::PuzzleError;

/// Source of answers for the destination-directory questions.
pub trait ConfirmationProvider {
    /// Yes/no question. `true` means yes.
    fn confirm(&mut self, prompt: &str) -> Result<bool, PuzzleError>;

    /// Free-text question for a directory name.
    fn ask_name(&mut self, prompt: &str) -> Result<String, PuzzleError>;
}

/// Prompts on a writer and reads answers line by line.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self, prompt: &str) -> Result<String, PuzzleError> {
        write!(self.output, "{}", prompt)
            .and_then(|_| self.output.flush())
            .map_err(|e| PuzzleError::Prompt(e.to_string()))?;
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .map_err(|e| PuzzleError::Prompt(e.to_string()))?;
        if n == 0 {
            return Err(PuzzleError::Prompt("input closed".to_string()));
        }
        Ok(line.trim().to_string())
    }
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConfirmationProvider for TerminalPrompt<R, W> {
    fn confirm(&mut self, prompt: &str) -> Result<bool, PuzzleError> {
        loop {
            let answer = self.read_answer(&format!("{} (y/n): ", prompt))?;
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => {
                    let _ = writeln!(self.output, "Please answer y or n.");
                }
            }
        }
    }

    fn ask_name(&mut self, prompt: &str) -> Result<String, PuzzleError> {
        loop {
            let answer = self.read_answer(&format!("{}: ", prompt))?;
            if !answer.is_empty() {
                return Ok(answer);
            }
        }
    }
}

/// Replays queued answers; used in tests and non-interactive runs.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    confirms: VecDeque<bool>,
    names: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_confirm(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.names.push_back(name.to_string());
        self
    }

    /// Prompts seen so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl ConfirmationProvider for ScriptedPrompt {
    fn confirm(&mut self, prompt: &str) -> Result<bool, PuzzleError> {
        self.asked.push(prompt.to_string());
        self.confirms
            .pop_front()
            .ok_or_else(|| PuzzleError::Prompt(format!("no scripted answer for: {}", prompt)))
    }

    fn ask_name(&mut self, prompt: &str) -> Result<String, PuzzleError> {
        self.asked.push(prompt.to_string());
        self.names
            .pop_front()
            .ok_or_else(|| PuzzleError::Prompt(format!("no scripted name for: {}", prompt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn terminal_confirm_reasks_until_yes_or_no() {
        let mut out = Vec::new();
        let mut p = TerminalPrompt::new(Cursor::new("maybe\nYES\n"), &mut out);
        assert!(p.confirm("Purge?").unwrap());
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown.matches("Purge? (y/n): ").count(), 2);
        assert!(shown.contains("Please answer y or n."));
    }

    #[test]
    fn terminal_confirm_no() {
        let mut p = TerminalPrompt::new(Cursor::new("n\n"), Vec::new());
        assert!(!p.confirm("Purge?").unwrap());
    }

    #[test]
    fn terminal_eof_is_error() {
        let mut p = TerminalPrompt::new(Cursor::new(""), Vec::new());
        assert!(matches!(p.confirm("Purge?"), Err(PuzzleError::Prompt(_))));
    }

    #[test]
    fn terminal_name_skips_blank_lines() {
        let mut p = TerminalPrompt::new(Cursor::new("\n  \n pics \n"), Vec::new());
        assert_eq!(p.ask_name("New directory").unwrap(), "pics");
    }

    #[test]
    fn scripted_answers_in_order() {
        let mut p = ScriptedPrompt::new().with_confirm(false).with_name("other");
        assert!(!p.confirm("a").unwrap());
        assert_eq!(p.ask_name("b").unwrap(), "other");
        assert!(p.confirm("c").is_err());
        assert_eq!(p.asked(), &["a", "b", "c"]);
    }
}
