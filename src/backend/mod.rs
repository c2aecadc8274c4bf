//! CPS evaluation core.
//!
//! The pieces, leaves first:
//!
//! 1. **Continuation value** (`cont`) - the sequencing abstraction every
//!    evaluation step is expressed in
//! 2. **Primitive table** (`prims`) - built-in operators as callables from
//!    numbers to continuation-wrapped numbers
//! 3. **Evaluator** (`eval`) - the two mutually recursive interpreters and
//!    the single boundary operation, [`evaluate`]

pub mod cont;
pub mod eval;
pub mod prims;
pub mod types;

pub use cont::{Cont, Consumer};
pub use eval::{eval_args, eval_expr, evaluate};
pub use prims::{Primitive, PrimitiveTable, SumOp};
pub use types::{Args, EvalCont, EvalError, EvalResult, Value};
