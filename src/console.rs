//! Console output sinks for the harness.
//!
//! All user-facing output flows through the [`ConsoleSink`] trait so the run
//! loop and the reporting path never talk to stdout directly. The standard
//! sink colorizes with `termcolor` (ANSI escapes on POSIX, the console API on
//! Windows); the buffer sink captures plain text for the harness's own tests.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Color mode for a block of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Green, used for passing checks and the summary header.
    Passed,
    /// Red, used for failing checks and non-zero failure counts.
    Failed,
    /// Cyan, used for informational tip lines.
    Tip,
}

/// Sink for all harness output.
///
/// `emit` writes one line of text. `set_mode`/`reset` bracket colored
/// blocks; a sink that cannot color must still preserve message content.
pub trait ConsoleSink {
    fn set_mode(&mut self, mode: Mode);
    fn reset(&mut self);
    fn emit(&mut self, text: &str);
}

/// Writes colorized output to stdout.
pub struct StdoutConsole {
    stream: StandardStream,
}

impl StdoutConsole {
    pub fn new() -> Self {
        Self::with_choice(ColorChoice::Auto)
    }

    /// Build with an explicit color choice (`Never` gives the no-color
    /// fallback with identical message content).
    pub fn with_choice(choice: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stdout(choice),
        }
    }
}

impl Default for StdoutConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink for StdoutConsole {
    fn set_mode(&mut self, mode: Mode) {
        let mut spec = ColorSpec::new();
        match mode {
            Mode::Passed => spec.set_fg(Some(Color::Green)).set_bold(true),
            Mode::Failed => spec.set_fg(Some(Color::Red)).set_bold(true),
            Mode::Tip => spec.set_fg(Some(Color::Cyan)),
        };
        let _ = self.stream.set_color(&spec);
    }

    fn reset(&mut self) {
        let _ = self.stream.reset();
        let _ = self.stream.flush();
    }

    fn emit(&mut self, text: &str) {
        let _ = writeln!(self.stream, "{}", text);
    }
}

/// Captures output into a shared string buffer for testing or programmatic
/// inspection. Clones share the same buffer, so a test can keep one handle
/// while the harness owns the other.
#[derive(Clone, Default)]
pub struct BufferConsole {
    buffer: Rc<RefCell<String>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything emitted so far.
    pub fn contents(&self) -> String {
        self.buffer.borrow().clone()
    }
}

impl ConsoleSink for BufferConsole {
    fn set_mode(&mut self, _mode: Mode) {}

    fn reset(&mut self) {}

    fn emit(&mut self, text: &str) {
        let mut buffer = self.buffer.borrow_mut();
        buffer.push_str(text);
        buffer.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_clones_share_contents() {
        let handle = BufferConsole::new();
        let mut sink = handle.clone();
        sink.set_mode(Mode::Tip);
        sink.emit("first");
        sink.reset();
        sink.emit("second");
        assert_eq!(handle.contents(), "first\nsecond\n");
    }
}
