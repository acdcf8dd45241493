//! Error types for template evaluation.
//!
//! `EvalErrorKind` carries the structured category; factory functions
//! (e.g. `not_callable()`) are the public way to build errors and populate
//! both `kind` and `message`.
//!
//! Errors are annotated once, by the innermost failing node, with a source
//! location and a snapshot of the callable call stack. Outer nodes leave an
//! already-located error untouched.

use std::fmt;
use std::sync::Arc;

use quill_ir::{SourceFile, Span};

use crate::Model;

/// Result of evaluation.
pub type EvalResult = Result<Model, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Dispatch
    NotCallable {
        expression: String,
        type_name: String,
    },
    ProcedureUsedAsExpression {
        name: String,
    },
    FunctionUsedAsDirective {
        name: String,
    },
    NotADirective {
        expression: String,
        type_name: String,
    },
    ArgumentMarshallingMismatch {
        method: String,
        expected: &'static str,
        got: &'static str,
    },
    CallableNotBound {
        name: String,
    },

    // Output
    OutputFailed {
        message: String,
    },
    UnexpectedHostFailure {
        message: String,
    },

    // Access
    UndefinedVariable {
        name: String,
    },
    UndefinedField {
        field: String,
        type_name: String,
    },
    NoValue {
        expression: String,
    },

    // Parameter binding
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    MissingArgument {
        callable: String,
        param: String,
    },
    UnknownArgument {
        callable: String,
        name: String,
    },
    StackOverflow {
        depth: usize,
    },

    // Operators
    TypeMismatch {
        expected: String,
        got: String,
    },
    BinaryTypeMismatch {
        op: &'static str,
        left: String,
        right: String,
    },
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow {
        operation: String,
    },

    /// Errors raised by host methods and anything without a dedicated kind.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCallable {
                expression,
                type_name,
            } => write!(
                f,
                "`{expression}` is not callable: it evaluated to a {type_name}"
            ),
            Self::ProcedureUsedAsExpression { name } => write!(
                f,
                "macro `{name}` cannot be used in an expression; invoke it as a directive with <@{name} .../>"
            ),
            Self::FunctionUsedAsDirective { name } => write!(
                f,
                "function `{name}` cannot be invoked as a directive; call it in an expression"
            ),
            Self::NotADirective {
                expression,
                type_name,
            } => write!(
                f,
                "`{expression}` is not a macro: it evaluated to a {type_name}"
            ),
            Self::ArgumentMarshallingMismatch {
                method,
                expected,
                got,
            } => write!(
                f,
                "host method `{method}` takes {expected} as arguments but was given {got}"
            ),
            Self::CallableNotBound { name } => write!(
                f,
                "`{name}` was invoked before being bound to a namespace"
            ),
            Self::OutputFailed { message } => write!(f, "failed to write output: {message}"),
            Self::UnexpectedHostFailure { message } => {
                write!(f, "unexpected failure while calling a function: {message}")
            }
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::UndefinedField { field, type_name } => {
                write!(f, "no field `{field}` on {type_name}")
            }
            Self::NoValue { expression } => {
                write!(f, "`{expression}` has no value to write")
            }
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "`{name}` expects at most {expected} {arg_word}, got {got}")
            }
            Self::MissingArgument { callable, param } => {
                write!(f, "`{callable}` is missing a value for parameter `{param}`")
            }
            Self::UnknownArgument { callable, name } => {
                write!(f, "`{callable}` has no parameter named `{name}`")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::BinaryTypeMismatch { op, left, right } => {
                write!(f, "operator `{op}` cannot be applied to {left} and {right}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Where an error happened: the defining template and the span of the
/// innermost failing node.
#[derive(Clone, Debug)]
pub struct ErrorLocation {
    pub source: Arc<SourceFile>,
    pub span: Span,
}

impl ErrorLocation {
    pub fn new(source: Arc<SourceFile>, span: Span) -> Self {
        ErrorLocation { source, span }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Macro or function name.
    pub name: String,
    /// `file:line:col` of the call site, when known.
    pub call_site: Option<String>,
}

/// Snapshot of the callable call stack at an error site, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "call stack:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(site) = &frame.call_site {
                write!(f, " called at {site}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-built errors.
    pub message: String,
    /// Innermost failing node, set once.
    pub location: Option<ErrorLocation>,
    /// Call stack at the error site, captured together with `location`.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    ///
    /// Host methods use this to report their own failures.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            location: None,
            backtrace: None,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            location: None,
            backtrace: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: ErrorLocation) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    #[inline]
    pub fn is_located(&self) -> bool {
        self.location.is_some()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Dispatch Errors

/// Call target evaluated to something without a callable capability.
#[cold]
pub fn not_callable(expression: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        expression: expression.to_string(),
        type_name: type_name.to_string(),
    })
}

/// A macro was called where a value is required.
#[cold]
pub fn procedure_used_as_expression(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ProcedureUsedAsExpression {
        name: name.to_string(),
    })
}

/// A function was invoked with `<@f/>`.
#[cold]
pub fn function_used_as_directive(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FunctionUsedAsDirective {
        name: name.to_string(),
    })
}

/// Directive target is not a user-defined callable.
#[cold]
pub fn not_a_directive(expression: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotADirective {
        expression: expression.to_string(),
        type_name: type_name.to_string(),
    })
}

/// Host method invoked with the wrong argument representation.
#[cold]
pub fn argument_marshalling_mismatch(
    method: &str,
    expected: &'static str,
    got: &'static str,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentMarshallingMismatch {
        method: method.to_string(),
        expected,
        got,
    })
}

/// An unbound definition reached the invocation path.
#[cold]
pub fn callable_not_bound(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallableNotBound {
        name: name.to_string(),
    })
}

// Output Errors

/// Writing to the current output sink failed.
#[cold]
pub fn output_failed(err: &std::io::Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OutputFailed {
        message: err.to_string(),
    })
}

/// An output fault surfaced while the sink was the in-memory discard sink.
#[cold]
pub fn unexpected_host_failure(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnexpectedHostFailure {
        message: message.to_string(),
    })
}

// Access Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_field(field: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedField {
        field: field.to_string(),
        type_name: type_name.to_string(),
    })
}

/// Interpolating an expression that produced no value.
#[cold]
pub fn no_value(expression: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoValue {
        expression: expression.to_string(),
    })
}

// Parameter Binding Errors

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn missing_argument(callable: &str, param: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArgument {
        callable: callable.to_string(),
        param: param.to_string(),
    })
}

#[cold]
pub fn unknown_argument(callable: &str, name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownArgument {
        callable: callable.to_string(),
        name: name.to_string(),
    })
}

/// Call depth exceeded the configured limit.
#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

// Operator Errors

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn binary_type_mismatch(op: &'static str, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}
