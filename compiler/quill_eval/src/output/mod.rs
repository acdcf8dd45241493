//! Output sinks.
//!
//! The environment writes through a `SharedOutput`. Sinks are swapped during
//! nested calls (see `Environment::redirect_output`); the discard sink swallows
//! everything a function writes while it is evaluated for its value.
//!
//! Enum dispatch keeps the write path free of vtables except for the
//! caller-supplied `Writer` variant.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use quill_model::errors::output_failed;
use quill_model::EvalError;

pub enum OutputSink {
    /// Writes straight to stdout.
    Stdout,
    /// Captures into memory.
    Buffer(Mutex<String>),
    /// Any caller-supplied writer.
    Writer(Mutex<Box<dyn Write + Send>>),
    /// Drops everything.
    Discard,
}

impl OutputSink {
    pub fn write_str(&self, text: &str) -> Result<(), EvalError> {
        match self {
            Self::Stdout => io::stdout()
                .lock()
                .write_all(text.as_bytes())
                .map_err(|e| output_failed(&e)),
            Self::Buffer(buf) => {
                buf.lock().push_str(text);
                Ok(())
            }
            Self::Writer(w) => w
                .lock()
                .write_all(text.as_bytes())
                .map_err(|e| output_failed(&e)),
            Self::Discard => Ok(()),
        }
    }

    pub fn flush(&self) -> Result<(), EvalError> {
        match self {
            Self::Stdout => io::stdout().flush().map_err(|e| output_failed(&e)),
            Self::Writer(w) => w.lock().flush().map_err(|e| output_failed(&e)),
            Self::Buffer(_) | Self::Discard => Ok(()),
        }
    }

    /// Captured text; empty for sinks that do not capture.
    pub fn contents(&self) -> String {
        match self {
            Self::Buffer(buf) => buf.lock().clone(),
            Self::Stdout | Self::Writer(_) | Self::Discard => String::new(),
        }
    }

    #[inline]
    pub fn is_discard(&self) -> bool {
        matches!(self, Self::Discard)
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "Stdout"),
            Self::Buffer(buf) => write!(f, "Buffer({} bytes)", buf.lock().len()),
            Self::Writer(_) => write!(f, "Writer"),
            Self::Discard => write!(f, "Discard"),
        }
    }
}

/// Shared handle to a sink.
pub type SharedOutput = Arc<OutputSink>;

pub fn stdout_sink() -> SharedOutput {
    Arc::new(OutputSink::Stdout)
}

pub fn buffer_sink() -> SharedOutput {
    Arc::new(OutputSink::Buffer(Mutex::new(String::new())))
}

pub fn writer_sink(writer: impl Write + Send + 'static) -> SharedOutput {
    Arc::new(OutputSink::Writer(Mutex::new(Box::new(writer))))
}

pub fn discard_sink() -> SharedOutput {
    Arc::new(OutputSink::Discard)
}
