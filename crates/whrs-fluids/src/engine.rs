//! Property engine trait.

use crate::error::FluidResult;
use crate::query::PropertyQuery;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for thermophysical property backends.
///
/// Implementations must be thread-safe (Send + Sync) so separate evaluators
/// can share one backend. `compute` is a pure function of the query: the
/// cache relies on that to memoize results indefinitely.
pub trait PropertyEngine: Send + Sync {
    /// Get the engine name (for debugging/logging).
    fn name(&self) -> &str;

    /// Resolve a property query.
    ///
    /// Fails when the requested state is outside the fluid's valid envelope.
    fn compute(&self, query: &PropertyQuery) -> FluidResult<f64>;
}

impl<E: PropertyEngine + ?Sized> PropertyEngine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compute(&self, query: &PropertyQuery) -> FluidResult<f64> {
        (**self).compute(query)
    }
}

/// Engine wrapper that counts backend invocations.
///
/// Used to verify memoization and to report backend load.
pub struct CountingEngine<E> {
    inner: E,
    calls: AtomicUsize,
}

impl<E: PropertyEngine> CountingEngine<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of queries forwarded to the wrapped engine so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: PropertyEngine> PropertyEngine for CountingEngine<E> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn compute(&self, query: &PropertyQuery) -> FluidResult<f64> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.compute(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FluidError;
    use crate::query::PropKey;

    struct Constant(f64);

    impl PropertyEngine for Constant {
        fn name(&self) -> &str {
            "constant"
        }

        fn compute(&self, query: &PropertyQuery) -> FluidResult<f64> {
            if query.fluid() == "Unobtainium" {
                return Err(FluidError::Backend {
                    query: query.to_string(),
                    message: "unknown fluid".into(),
                });
            }
            Ok(self.0)
        }
    }

    #[test]
    fn counts_every_forwarded_call() {
        let engine = CountingEngine::new(Constant(4.2));
        let q = PropertyQuery::trivial(PropKey::Tcrit, "Water");
        assert_eq!(engine.compute(&q).unwrap(), 4.2);
        assert_eq!(engine.compute(&q).unwrap(), 4.2);
        assert_eq!(engine.calls(), 2);
        assert_eq!(engine.name(), "constant");
    }

    #[test]
    fn failures_are_counted_and_passed_through() {
        let engine = CountingEngine::new(Constant(1.0));
        let q = PropertyQuery::trivial(PropKey::Tcrit, "Unobtainium");
        assert!(matches!(engine.compute(&q), Err(FluidError::Backend { .. })));
        assert_eq!(engine.calls(), 1);
    }

    #[test]
    fn boxed_engine_delegates() {
        let engine: Box<dyn PropertyEngine> = Box::new(Constant(2.0));
        let q = PropertyQuery::trivial(PropKey::Tcrit, "Water");
        assert_eq!(engine.compute(&q).unwrap(), 2.0);
    }
}
