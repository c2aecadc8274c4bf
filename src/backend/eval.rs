//! The continuation-passing expression evaluator.
//!
//! Two mutually recursive evaluators drive everything:
//!
//! - [`eval_expr`] interprets one expression into a [`Value`]
//! - [`eval_args`] interprets an operand list into numbers, in source order
//!
//! Neither ever returns a value directly; results flow forward through the
//! consumers installed by [`Cont::and_then`]. A call is three sequenced
//! steps: evaluate the operator position, evaluate each operand left to
//! right, apply. Because later steps nest inside earlier steps' consumers,
//! the sequencing itself guarantees the left-to-right order.
//!
//! Evaluation is synchronous and single-threaded: every continuation
//! invokes its consumer exactly once before returning control, and nothing
//! outlives one [`evaluate`] call.

use tracing::{debug, trace};

use crate::sexpr::Expr;

use super::cont::Cont;
use super::prims::PrimitiveTable;
use super::types::{fail, Args, EvalCont, EvalError, EvalResult, Value};

/// Evaluate one expression to a continuation-wrapped [`Value`].
pub fn eval_expr<'a>(expr: &'a Expr, prims: &'a PrimitiveTable) -> EvalCont<'a, Value> {
    trace!(target: "contcalc::eval::eval_expr", %expr);
    match expr {
        Expr::Call(items) => match items.split_first() {
            None => fail(EvalError::EmptyCall),
            Some((head, tail)) => eval_expr(head, prims).and_then(move |callee| match callee {
                Value::Callable(op) => eval_args(tail, prims).and_then(move |args| {
                    op.apply(args)
                        .and_then(|result| Cont::pure(Value::Number(result)))
                }),
                Value::Number(n) => fail(EvalError::NotCallable(n)),
            }),
        },
        Expr::Symbol(name) => match prims.get(name) {
            Some(op) => Cont::pure(Value::Callable(op)),
            None => fail(EvalError::UnboundSymbol(name.clone())),
        },
        Expr::Literal(text) => match text.parse::<i64>() {
            Ok(n) => Cont::pure(Value::Number(n)),
            Err(err) => fail(EvalError::MalformedLiteral {
                text: text.clone(),
                reason: err.to_string(),
            }),
        },
    }
}

/// Evaluate an operand list to a continuation-wrapped argument vector.
///
/// The result has exactly the operands' length and order: the head is
/// evaluated to a number, the tail recursively, and the two are joined in
/// the head's consumer.
pub fn eval_args<'a>(exprs: &'a [Expr], prims: &'a PrimitiveTable) -> EvalCont<'a, Args> {
    match exprs.split_first() {
        None => Cont::pure(Args::new()),
        Some((head, tail)) => eval_expr(head, prims).and_then(move |value| match value {
            Value::Number(n) => eval_args(tail, prims).and_then(move |rest| {
                let mut args = Args::with_capacity(rest.len() + 1);
                args.push(n);
                args.extend_from_slice(&rest);
                Cont::pure(args)
            }),
            Value::Callable(op) => fail(EvalError::ExpectedNumber(op.name().to_string())),
        }),
    }
}

/// Evaluate a whole expression and hand the final number to `consumer`.
///
/// The consumer is invoked exactly once on success; on failure it is never
/// invoked and the aborting condition comes back as the error.
pub fn evaluate<'a, F>(expr: &'a Expr, prims: &'a PrimitiveTable, consumer: F) -> EvalResult
where
    F: FnOnce(i64) + 'a,
{
    debug!(target: "contcalc::eval::evaluate", %expr);
    eval_expr(expr, prims).run(move |value| match value {
        Value::Number(n) => {
            consumer(n);
            Ok(())
        }
        Value::Callable(op) => Err(EvalError::ExpectedNumber(op.name().to_string())),
    })
}
