//! The output sink interface consumed by the writer.
//!
//! A [`Sink`] is a character destination with a failure signal.  The writer
//! pushes codepoints sequentially and imposes no buffering discipline; a
//! failing `put_char` aborts the write immediately.

use std::io;
use thiserror::Error;

/// Failure raised by an output sink.
///
/// Kept separate from [`WriteError`](crate::WriteError) so that hosts can
/// implement `Sink` without depending on the writer's fault taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The destination is no longer accepting output.
    #[error("sink closed")]
    Closed,

    /// An underlying device error.
    #[error("i/o failure: {0}")]
    Io(String),
}

/// A character destination.
///
/// Implementations may buffer and flush at their own discretion; the writer
/// never seeks and never takes output back.
pub trait Sink {
    /// Push a single codepoint.
    fn put_char(&mut self, c: char) -> Result<(), SinkError>;

    /// Push every codepoint of `s`, in order.
    fn put_str(&mut self, s: &str) -> Result<(), SinkError> {
        for c in s.chars() {
            self.put_char(c)?;
        }
        Ok(())
    }
}

impl Sink for String {
    fn put_char(&mut self, c: char) -> Result<(), SinkError> {
        self.push(c);
        Ok(())
    }

    fn put_str(&mut self, s: &str) -> Result<(), SinkError> {
        self.push_str(s);
        Ok(())
    }
}

/// Adapts any [`io::Write`] into a [`Sink`], encoding output as UTF-8.
#[derive(Debug)]
pub struct IoSink<W: io::Write> {
    inner: W,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Sink for IoSink<W> {
    fn put_char(&mut self, c: char) -> Result<(), SinkError> {
        let mut buf = [0u8; 4];
        self.inner
            .write_all(c.encode_utf8(&mut buf).as_bytes())
            .map_err(|e| SinkError::Io(e.to_string()))
    }

    fn put_str(&mut self, s: &str) -> Result<(), SinkError> {
        self.inner
            .write_all(s.as_bytes())
            .map_err(|e| SinkError::Io(e.to_string()))
    }
}
