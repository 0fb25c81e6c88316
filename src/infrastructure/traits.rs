//! I/O boundary traits for testability
//!
//! Draw traversals emit their actions into a `DrawSink`, so services can be
//! tested with recording or failing sinks instead of stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::domain::DrawAction;

/// Destination for the actions produced by a draw traversal.
pub trait DrawSink {
    /// Emit a single action.
    fn emit(&mut self, action: &DrawAction) -> io::Result<()>;

    /// Flush buffered output. Called once after a traversal completes.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: DrawSink + ?Sized> DrawSink for &mut S {
    fn emit(&mut self, action: &DrawAction) -> io::Result<()> {
        (**self).emit(action)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<S: DrawSink + ?Sized> DrawSink for Box<S> {
    fn emit(&mut self, action: &DrawAction) -> io::Result<()> {
        (**self).emit(action)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Writes one line per action to any `Write` target.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<File> {
    /// Create (or truncate) `path` and write actions to it.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> DrawSink for WriterSink<W> {
    fn emit(&mut self, action: &DrawAction) -> io::Result<()> {
        writeln!(self.writer, "{}", action)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Keeps every emitted action in memory.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSink {
    pub actions: Vec<DrawAction>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            actions: Vec::with_capacity(n),
        }
    }

    /// Emitted actions rendered as text lines.
    pub fn lines(&self) -> Vec<String> {
        self.actions.iter().map(ToString::to_string).collect()
    }
}

impl DrawSink for RecordingSink {
    fn emit(&mut self, action: &DrawAction) -> io::Result<()> {
        self.actions.push(action.clone());
        Ok(())
    }
}

/// Counts actions without rendering them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingSink {
    pub circles: usize,
    pub squares: usize,
    pub composites: usize,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.circles + self.squares + self.composites
    }
}

impl DrawSink for CountingSink {
    fn emit(&mut self, action: &DrawAction) -> io::Result<()> {
        match action {
            DrawAction::Circle { .. } => self.circles += 1,
            DrawAction::Square { .. } => self.squares += 1,
            DrawAction::Composite { .. } => self.composites += 1,
        }
        Ok(())
    }
}
