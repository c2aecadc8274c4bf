//! Built-in operators and the table that binds names to them.
//!
//! A primitive is a callable from an ordered list of evaluated numbers to a
//! continuation-wrapped number. The table is built once, before evaluation
//! starts, and never mutated afterwards; the evaluator receives it by
//! reference and holds no hidden operator state of its own.

use std::collections::HashMap;
use std::sync::Arc;

use super::cont::Cont;
use super::types::{fail, Args, EvalCont, EvalError};

/// A built-in operator.
///
/// `apply` receives the operands already evaluated, in source order, and
/// hands its result forward through a continuation. A primitive that cannot
/// proceed aborts through the continuation's result channel instead.
pub trait Primitive: Send + Sync {
    /// The operator name this primitive is bound to (e.g. "+")
    fn name(&self) -> &str;

    /// Apply to an ordered list of evaluated operands.
    fn apply<'a>(&self, args: Args) -> EvalCont<'a, i64>;
}

/// Registry of primitives, keyed by operator name
#[derive(Clone)]
pub struct PrimitiveTable {
    operations: HashMap<String, Arc<dyn Primitive>>,
}

impl PrimitiveTable {
    /// Create a new empty table
    pub fn new() -> Self {
        PrimitiveTable {
            operations: HashMap::new(),
        }
    }

    /// Create a table with the standard operators (currently just `+`)
    pub fn with_standard_ops() -> Self {
        let mut table = Self::new();
        table.register(Arc::new(SumOp));
        table
    }

    /// Register a primitive under its own name
    pub fn register(&mut self, op: Arc<dyn Primitive>) {
        self.operations.insert(op.name().to_string(), op);
    }

    /// Look up a primitive by operator name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Primitive>> {
        self.operations.get(name).cloned()
    }
}

impl Default for PrimitiveTable {
    fn default() -> Self {
        Self::with_standard_ops()
    }
}

/// Variadic addition: `(+ a b c ...)`
///
/// Left fold over at least one operand. Zero operands has no defined
/// reduction and aborts; so does a sum that leaves the machine integer
/// width.
pub struct SumOp;

impl Primitive for SumOp {
    fn name(&self) -> &str {
        "+"
    }

    fn apply<'a>(&self, args: Args) -> EvalCont<'a, i64> {
        match args.split_first() {
            None => fail(EvalError::EmptyArguments("+")),
            Some((&first, rest)) => {
                let mut total = first;
                for &x in rest {
                    match total.checked_add(x) {
                        Some(sum) => total = sum,
                        None => return fail(EvalError::Overflow(total, x)),
                    }
                }
                Cont::pure(total)
            }
        }
    }
}
