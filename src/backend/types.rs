//! Core value and error types for the CPS evaluator.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use super::cont::Cont;
use super::prims::Primitive;

/// Evaluated argument list. Operand lists are almost always short, so the
/// common case stays on the stack.
pub type Args = SmallVec<[i64; 8]>;

/// Final result of driving an evaluation: unit, or the failure that aborted
/// it. Failures travel back through this channel; values only ever travel
/// forward through consumers.
pub type EvalResult = Result<(), EvalError>;

/// A continuation as the evaluator instantiates it.
pub type EvalCont<'a, A> = Cont<'a, A, EvalResult>;

/// The result of evaluating an expression: a number, or an operator that
/// can be applied to numbers.
#[derive(Clone)]
pub enum Value {
    /// A signed machine integer
    Number(i64),
    /// A built-in operator
    Callable(Arc<dyn Primitive>),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({})", n),
            Value::Callable(op) => write!(f, "Callable({})", op.name()),
        }
    }
}

/// Everything that can abort an evaluation.
///
/// Each condition is a distinct variant so tests can observe which
/// precondition was violated. None of these are recovered inside the
/// evaluator; the driving loop decides whether to continue with the next
/// input.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A literal's digit string failed to parse as a machine integer
    MalformedLiteral { text: String, reason: String },

    /// A symbol with no entry in the primitive table
    UnboundSymbol(String),

    /// The head of a call evaluated to a number instead of an operator
    NotCallable(i64),

    /// A call with no elements at all, so nothing to apply
    EmptyCall,

    /// A primitive applied to zero operands
    EmptyArguments(&'static str),

    /// An operator appeared where a number was required
    ExpectedNumber(String),

    /// Addition overflowed the machine integer width
    Overflow(i64, i64),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::MalformedLiteral { text, reason } => {
                write!(f, "Malformed literal '{}': {}", text, reason)
            }
            EvalError::UnboundSymbol(name) => write!(f, "Unbound symbol: {}", name),
            EvalError::NotCallable(n) => write!(f, "Cannot apply {}: not an operator", n),
            EvalError::EmptyCall => write!(f, "Empty call: expected an operator"),
            EvalError::EmptyArguments(op) => {
                write!(f, "'{}' requires at least 1 argument, got 0", op)
            }
            EvalError::ExpectedNumber(op) => {
                write!(f, "Expected a number, found operator '{}'", op)
            }
            EvalError::Overflow(lhs, rhs) => write!(f, "Integer overflow: {} + {}", lhs, rhs),
        }
    }
}

impl std::error::Error for EvalError {}

/// A continuation that aborts with `err` instead of invoking its consumer.
pub fn fail<'a, A: 'a>(err: EvalError) -> EvalCont<'a, A> {
    Cont::new(move |_consumer| Err(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            EvalError::UnboundSymbol("*".to_string()).to_string(),
            "Unbound symbol: *"
        );
        assert_eq!(
            EvalError::NotCallable(1).to_string(),
            "Cannot apply 1: not an operator"
        );
        assert_eq!(
            EvalError::EmptyArguments("+").to_string(),
            "'+' requires at least 1 argument, got 0"
        );
        assert_eq!(
            EvalError::Overflow(i64::MAX, 1).to_string(),
            format!("Integer overflow: {} + 1", i64::MAX)
        );
    }

    #[test]
    fn test_fail_returns_error_without_consumer_call() {
        let result = fail::<i64>(EvalError::EmptyCall).run(|_| {
            panic!("consumer must not run");
        });
        assert_eq!(result, Err(EvalError::EmptyCall));
    }
}
