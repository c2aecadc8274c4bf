//! The continuation value: a computation that hands its result forward.
//!
//! A [`Cont`] wraps exactly one capability: given a consumer for an `A`,
//! produce the fixed final result `R` by eventually invoking that consumer.
//! Values only ever travel forward through consumer calls, never backward
//! through returns; the evaluator is built entirely out of this type.
//!
//! `Cont` itself is a pure sequencing mechanism. It performs no I/O and has
//! no failure channel of its own; a wrapped computation that cannot proceed
//! returns its `R` without invoking the consumer, and `R` carries whatever
//! failure information the caller chose (the evaluator uses
//! `Result<(), EvalError>`).

/// A consumer for an intermediate result: the rest of the computation.
pub type Consumer<'a, A, R> = Box<dyn FnOnce(A) -> R + 'a>;

/// A computation that produces an `A` by passing it to a consumer.
///
/// Each `Cont` exclusively owns its wrapped computation and is consumed
/// exactly once; `FnOnce` throughout makes the type system enforce that.
///
/// ```
/// use contcalc::Cont;
///
/// let mut out = 0;
/// Cont::pure(21)
///     .and_then(|x: i64| Cont::pure(x * 2))
///     .run(|v| {
///         out = v;
///     });
/// assert_eq!(out, 42);
/// ```
pub struct Cont<'a, A, R> {
    run: Box<dyn FnOnce(Consumer<'a, A, R>) -> R + 'a>,
}

impl<'a, A: 'a, R: 'a> Cont<'a, A, R> {
    /// Wrap a computation given as "produce `R` from a consumer of `A`".
    pub fn new<F>(run: F) -> Self
    where
        F: FnOnce(Consumer<'a, A, R>) -> R + 'a,
    {
        Cont { run: Box::new(run) }
    }

    /// The trivial continuation: invoke the consumer with `value`, no
    /// further work.
    pub fn pure(value: A) -> Self {
        Cont::new(move |consumer| consumer(value))
    }

    /// Sequence this computation with a continuation-producing step.
    ///
    /// The returned `Cont` runs `self` with an inline consumer that feeds
    /// the intermediate value to `f` and runs the produced continuation
    /// with the final consumer. The second step's consumer chain is
    /// installed only once the first step invokes its own consumer, which
    /// is what pins evaluation order.
    pub fn and_then<B, F>(self, f: F) -> Cont<'a, B, R>
    where
        B: 'a,
        F: FnOnce(A) -> Cont<'a, B, R> + 'a,
    {
        Cont::new(move |consumer: Consumer<'a, B, R>| {
            (self.run)(Box::new(move |value: A| (f(value).run)(consumer)))
        })
    }

    /// Drive the computation to completion with a final consumer.
    pub fn run<F>(self, consumer: F) -> R
    where
        F: FnOnce(A) -> R + 'a,
    {
        (self.run)(Box::new(consumer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// A step that records its name before handing `value` forward.
    fn step<'a>(
        log: &'a RefCell<Vec<&'static str>>,
        name: &'static str,
        value: i64,
    ) -> Cont<'a, i64, ()> {
        Cont::new(move |consumer| {
            log.borrow_mut().push(name);
            consumer(value)
        })
    }

    #[test]
    fn test_pure_delivers_value() {
        let out = Cell::new(0);
        Cont::pure(7).run(|v: i64| out.set(v));
        assert_eq!(out.get(), 7);
    }

    #[test]
    fn test_and_then_threads_value() {
        let out = Cell::new(0);
        Cont::pure(20)
            .and_then(|x: i64| Cont::pure(x + 1))
            .and_then(|x| Cont::pure(x * 2))
            .run(|v| out.set(v));
        assert_eq!(out.get(), 42);
    }

    #[test]
    fn test_consumer_invoked_exactly_once() {
        let calls = Cell::new(0u32);
        Cont::pure(1).and_then(|x: i64| Cont::pure(x)).run(|_| {
            calls.set(calls.get() + 1);
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_steps_run_in_sequencing_order() {
        let log_cell = RefCell::new(Vec::new());
        let log = &log_cell;
        let out = Cell::new(0);
        step(log, "a", 1)
            .and_then(move |x| step(log, "b", x + 1).and_then(move |y| step(log, "c", x + y)))
            .run(|v| out.set(v));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(out.get(), 3);
    }

    #[test]
    fn test_bind_associativity() {
        // (a then b) then c
        let left_cell = RefCell::new(Vec::new());
        let left_log = &left_cell;
        let left_out = Cell::new(0);
        step(left_log, "a", 1)
            .and_then(move |x| step(left_log, "b", x + 10))
            .and_then(move |x| step(left_log, "c", x + 100))
            .run(|v| left_out.set(v));

        // a then (b then c)
        let right_cell = RefCell::new(Vec::new());
        let right_log = &right_cell;
        let right_out = Cell::new(0);
        step(right_log, "a", 1)
            .and_then(move |x| {
                step(right_log, "b", x + 10).and_then(move |y| step(right_log, "c", y + 100))
            })
            .run(|v| right_out.set(v));

        assert_eq!(*left_log.borrow(), *right_log.borrow());
        assert_eq!(left_out.get(), right_out.get());
        assert_eq!(left_out.get(), 111);
    }

    #[test]
    fn test_left_identity() {
        let direct = Cell::new(0);
        let bound = Cell::new(0);
        let double = |x: i64| Cont::pure(x * 2);

        double(21).run(|v| direct.set(v));
        Cont::pure(21).and_then(double).run(|v| bound.set(v));

        assert_eq!(direct.get(), bound.get());
    }

    #[test]
    fn test_right_identity() {
        let log = RefCell::new(Vec::new());
        let out = Cell::new(0);
        step(&log, "a", 5).and_then(Cont::pure).run(|v| out.set(v));
        assert_eq!(out.get(), 5);
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn test_failing_step_skips_rest_of_chain() {
        // With R = Result, a step that returns without invoking its
        // consumer aborts the whole chain; later steps never run.
        let log = RefCell::new(Vec::new());
        let failing: Cont<i64, Result<(), &str>> = Cont::new(|_consumer| Err("boom"));

        let result = failing
            .and_then(|x| {
                log.borrow_mut().push("after");
                Cont::pure(x)
            })
            .run(|_| Ok(()));

        assert_eq!(result, Err("boom"));
        assert!(log.borrow().is_empty());
    }
}
