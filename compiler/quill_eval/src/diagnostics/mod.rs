//! Call-stack tracking and error rendering.
//!
//! `CallStack` records one frame per active macro/function invocation and
//! enforces the configured depth limit. Snapshots become the `EvalBacktrace`
//! attached to errors; `render` turns a located error into a report with a
//! source excerpt.

use std::fmt::Write as _;
use std::sync::Arc;

use quill_ir::{Name, SourceFile, Span, StringInterner};
use quill_model::errors::recursion_limit_exceeded;
use quill_model::{BacktraceFrame, EvalBacktrace, EvalError};

/// A single frame in the live call stack.
#[derive(Clone, Debug)]
pub struct CallFrame {
    pub name: Name,
    /// Template and span of the call site.
    pub call_site: Option<(Arc<SourceFile>, Span)>,
}

#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame; the frame is not pushed when the limit is exceeded.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot, most recent call first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: interner.lookup(f.name).to_string(),
                call_site: f
                    .call_site
                    .as_ref()
                    .map(|(source, span)| position(source, *span)),
            })
            .collect();
        EvalBacktrace::new(frames)
    }
}

/// `file:line:col` of the start of `span`.
pub fn position(source: &SourceFile, span: Span) -> String {
    let (line, col) = source.line_col(span.start);
    format!("{}:{line}:{col}", source.name())
}

/// Human-readable report: message, source excerpt, call stack.
pub fn render(err: &EvalError) -> String {
    let mut out = format!("error: {}", err.message);
    if let Some(location) = &err.location {
        out.push('\n');
        out.push_str(&location.source.snippet(location.span));
    }
    if let Some(backtrace) = err.backtrace.as_ref().filter(|bt| !bt.is_empty()) {
        let _ = write!(out, "\n{}", backtrace.to_string().trim_end());
    }
    out
}
