//! Query prompt front-ends.
//!
//! The outer loop only needs "read the next query string". Keeping that
//! behind a trait makes the line-edited interactive prompt and the plain
//! piped-input reader interchangeable.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "Input your Prometheus Query -> ";

/// Yields successive query strings; `None` means end of input.
pub trait QueryPrompt {
    fn next_query(&mut self) -> Result<Option<String>>;
}

/// Pick the front-end for this process: line editing with history when
/// stdin is a terminal, a plain reader when input is piped in.
pub fn from_stdin() -> Result<Box<dyn QueryPrompt>> {
    if io::stdin().is_terminal() {
        Ok(Box::new(EditorPrompt::new()?))
    } else {
        Ok(Box::new(LinePrompt::new(io::stdin().lock())))
    }
}

/// A literal `exit` ends input; everything else is a query.
fn accept(line: &str) -> Option<String> {
    let line = line.trim();
    if line == "exit" {
        None
    } else {
        Some(line.to_string())
    }
}

/// Interactive prompt with line editing and persistent history.
pub struct EditorPrompt {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl EditorPrompt {
    pub fn new() -> Result<Self> {
        Self::with_history(dirs::home_dir().map(|home| home.join(".promplot_history")))
    }

    fn with_history(history_path: Option<PathBuf>) -> Result<Self> {
        let mut editor = DefaultEditor::new().context("failed to initialize readline")?;
        if let Some(path) = &history_path {
            // Missing history is the normal first-run case.
            let _ = editor.load_history(path);
        }
        Ok(Self {
            editor,
            history_path,
        })
    }
}

impl QueryPrompt for EditorPrompt {
    fn next_query(&mut self) -> Result<Option<String>> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.trim());
                    }
                    return Ok(accept(&line));
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl-C drops the current line and prompts again.
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(err).context("readline failed"),
            }
        }
    }
}

impl Drop for EditorPrompt {
    fn drop(&mut self) {
        if let Some(path) = &self.history_path {
            let _ = self.editor.save_history(path);
        }
    }
}

/// Plain line reader over any input; used for piped stdin and in tests.
pub struct LinePrompt<R> {
    input: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> QueryPrompt for LinePrompt<R> {
    fn next_query(&mut self) -> Result<Option<String>> {
        print!("{PROMPT}");
        io::stdout().flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read query")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(accept(&line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_queries_until_exit() {
        let mut prompt = LinePrompt::new(Cursor::new("up\nrate(http_requests_total[1m])\nexit\nup\n"));
        assert_eq!(prompt.next_query().unwrap(), Some("up".to_string()));
        assert_eq!(
            prompt.next_query().unwrap(),
            Some("rate(http_requests_total[1m])".to_string())
        );
        assert_eq!(prompt.next_query().unwrap(), None);
    }

    #[test]
    fn eof_ends_input() {
        let mut prompt = LinePrompt::new(Cursor::new(""));
        assert_eq!(prompt.next_query().unwrap(), None);
    }

    #[test]
    fn queries_are_trimmed() {
        let mut prompt = LinePrompt::new(Cursor::new("  up  \n"));
        assert_eq!(prompt.next_query().unwrap(), Some("up".to_string()));
    }

    #[test]
    fn history_is_saved_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");

        let mut prompt = EditorPrompt::with_history(Some(path.clone())).unwrap();
        prompt.editor.add_history_entry("up").unwrap();
        drop(prompt);

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("up"));
    }

    #[test]
    fn exit_needs_the_whole_line() {
        let mut prompt = LinePrompt::new(Cursor::new("exit_code_total\n"));
        assert_eq!(
            prompt.next_query().unwrap(),
            Some("exit_code_total".to_string())
        );
    }
}
