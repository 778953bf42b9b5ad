//! Line-based prompt/answer plumbing over any reader and writer.

use std::io::{self, BufRead, ErrorKind, Write};

use verbs_core::answer::{allow_space_for_field, shape_input};

/// Terminal bell, rung when a space keystroke is refused.
pub const BELL: &str = "\x07";

/// Typed at any prompt to leave the drill.
pub const QUIT_WORDS: [&str; 2] = ["q", ":quit"];

/// What the user gave back at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    /// Quit word, end of input, or an interrupted read.
    Quit,
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    /// # Errors
    ///
    /// Propagates write failures.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Prompt for one verb form, refusing spaces unless `stored` needs them.
    ///
    /// # Errors
    ///
    /// Propagates read/write failures other than interruption. Invalid UTF-8
    /// is not a failure.
    pub fn ask_field(&mut self, prompt: &str, stored: &str) -> io::Result<Reply> {
        self.prompt_shaped(prompt, allow_space_for_field(stored))
    }

    fn prompt_shaped(&mut self, prompt: &str, allow_space: bool) -> io::Result<Reply> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        // Undecodable bytes become U+FFFD and simply score as wrong.
        let mut raw = Vec::new();
        match self.input.read_until(b'\n', &mut raw) {
            Ok(0) => return Ok(Reply::Quit),
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::Interrupted => return Ok(Reply::Quit),
            Err(err) => return Err(err),
        }
        let line = String::from_utf8_lossy(&raw);

        let shaped = shape_input(&line, allow_space);
        if shaped.blocked {
            write!(self.output, "{BELL}")?;
            self.output.flush()?;
        }

        if QUIT_WORDS.contains(&shaped.text.to_lowercase().as_str()) {
            return Ok(Reply::Quit);
        }
        Ok(Reply::Answer(shaped.text))
    }

    #[must_use]
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}
