//! contcalc - Continuation-Passing S-expression Calculator
//!
//! This library evaluates a parenthesized-list arithmetic language with a
//! continuation-passing interpreter. The control-flow discipline is the
//! point: every evaluation step is a [`Cont`] value that hands its result
//! to an explicit consumer, and the interpreter is built by composing those
//! values with [`Cont::and_then`]. Nothing is ever returned through an
//! ordinary return channel; the caller supplies the final consumer.
//!
//! # Architecture
//!
//! The pipeline consists of two stages:
//!
//! 1. **Lexical Analysis & S-expression Parsing** (`sexpr` module)
//!    - Tokenizes input text into parens, digit literals, and symbols
//!    - Parses tokens into [`Expr`] trees
//!    - Handles `;` line comments
//!
//! 2. **Backend Evaluation** (`backend` module)
//!    - Interprets an [`Expr`] as three sequenced steps: operator position,
//!      operands left to right, apply
//!    - Binds operator names through an immutable [`PrimitiveTable`]
//!    - Surfaces every precondition violation as a named [`EvalError`]
//!
//! # Example
//!
//! ```rust
//! use contcalc::{evaluate, parse_program, PrimitiveTable};
//!
//! let exprs = parse_program("(+ 1 (+ 2 3))").unwrap();
//! let table = PrimitiveTable::with_standard_ops();
//!
//! let mut result = None;
//! evaluate(&exprs[0], &table, |n| result = Some(n)).unwrap();
//! assert_eq!(result, Some(6));
//! ```

pub mod backend;
pub mod sexpr;

pub use backend::{
    eval_args, eval_expr, evaluate, Args, Cont, Consumer, EvalCont, EvalError, EvalResult,
    Primitive, PrimitiveTable, SumOp, Value,
};
pub use sexpr::{parse_program, Expr, Lexer, Parser, Token};

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_source(input: &str) -> Result<i64, EvalError> {
        let exprs = parse_program(input).unwrap();
        let table = PrimitiveTable::with_standard_ops();
        let mut out = None;
        evaluate(&exprs[0], &table, |n| out = Some(n))
            .map(|()| out.expect("consumer was not invoked"))
    }

    #[test]
    fn test_parse_simple() {
        let result = parse_program("(+ 1 2)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_and_evaluate_arithmetic() {
        assert_eq!(eval_source("(+ 10 20)").unwrap(), 30);
    }

    #[test]
    fn test_evaluate_nested() {
        assert_eq!(eval_source("(+ (+ 1 2) 3)").unwrap(), 6);
    }

    #[test]
    fn test_invalid_syntax() {
        let result = parse_program("(+ 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_operand_sum_is_an_error() {
        assert_eq!(eval_source("(+)"), Err(EvalError::EmptyArguments("+")));
    }
}
