//! Line-based question/answer prompting.
use crate::error::{ConfigGenError, GenResult};
use crate::value::{display_value, typed_reply};
use serde_yaml::Value;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// One question put to the user (or to a programmatic source).
#[derive(Debug, Clone, PartialEq)]
pub struct Question<'a> {
    pub field: &'a str,
    /// Help text plus any callback-supplied hint.
    pub text: String,
    pub default: Option<&'a Value>,
    pub choices: Option<&'a [String]>,
}

/// Interactive prompt capability.
pub trait Prompt {
    /// Print an informational line.
    fn notice(&mut self, message: &str) -> GenResult<()>;

    /// Ask whether a section should be configured at all.
    fn confirm_section(&mut self, section: &str) -> GenResult<bool>;

    /// Ask one question; an empty reply yields the default (possibly none).
    fn ask(&mut self, question: &Question<'_>) -> GenResult<Option<Value>>;

    /// Ask for a path, falling back to `default` on an empty reply.
    fn ask_path(&mut self, label: &str, default: &Path) -> GenResult<PathBuf>;
}

/// Prompt over any reader/writer pair; stdin/stdout in the CLI.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_reply(&mut self) -> GenResult<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConfigGenError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            )));
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn notice(&mut self, message: &str) -> GenResult<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn confirm_section(&mut self, section: &str) -> GenResult<bool> {
        write!(self.output, "Do you want to setup {section} [Y/n] : ")?;
        let reply = self.read_reply()?;
        Ok(!(reply.eq_ignore_ascii_case("n") || reply.eq_ignore_ascii_case("no")))
    }

    fn ask(&mut self, question: &Question<'_>) -> GenResult<Option<Value>> {
        loop {
            writeln!(self.output, "###################")?;
            write!(self.output, "{}", question.text)?;
            if let Some(choices) = question.choices {
                write!(self.output, " ({})", choices.join(", "))?;
            }
            if let Some(default) = question.default {
                write!(self.output, " [{}]", display_value(default))?;
            }
            write!(self.output, ": ")?;
            let reply = self.read_reply()?;
            if reply.is_empty() {
                return Ok(question.default.cloned());
            }
            match question.choices {
                Some(choices) if !choices.iter().any(|choice| choice == &reply) => {
                    writeln!(
                        self.output,
                        "Error: {reply:?} is not one of {}.",
                        choices.join(", ")
                    )?;
                }
                _ => return Ok(Some(typed_reply(reply, question.default))),
            }
        }
    }

    fn ask_path(&mut self, label: &str, default: &Path) -> GenResult<PathBuf> {
        write!(self.output, "{label} [{}] : ", default.display())?;
        let reply = self.read_reply()?;
        if reply.is_empty() {
            Ok(default.to_path_buf())
        } else {
            Ok(PathBuf::from(reply))
        }
    }
}
