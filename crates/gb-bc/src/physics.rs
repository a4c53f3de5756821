//! State shared by physics objects: scales, observers and kernel constants.

use std::sync::Arc;

use gb_core::{Normalizer, PointId, Real};

use crate::field::ParameterField;

/// Time at which a boundary value was evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvalTime {
    /// Total value at `t`.
    At(Real),
    /// Increment from `t0` to `t1`.
    Increment { t0: Real, t1: Real },
}

/// Snapshot passed to observers after an evaluation.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsUpdate<'a> {
    pub time: EvalTime,
    pub points: &'a [PointId],
    pub values: &'a ParameterField,
}

/// Receives evaluated boundary values (output writers, monitors).
pub trait PhysicsObserver: Send + Sync {
    fn update(&self, update: &PhysicsUpdate<'_>);
}

type KernelConstantsHook = Box<dyn Fn(&mut Vec<Real>, Real) + Send + Sync>;

/// Normalizer, observer registry and kernel constants.
pub struct Physics {
    normalizer: Normalizer,
    observers: Vec<Arc<dyn PhysicsObserver>>,
    kernel_constants: Vec<Real>,
    kernel_constants_hook: Option<KernelConstantsHook>,
}

impl Default for Physics {
    fn default() -> Self {
        Self::new(Normalizer::default())
    }
}

impl core::fmt::Debug for Physics {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Physics")
            .field("normalizer", &self.normalizer)
            .field("observers", &self.observers.len())
            .field("kernel_constants", &self.kernel_constants)
            .finish()
    }
}

impl Physics {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            observers: Vec::new(),
            kernel_constants: Vec::new(),
            kernel_constants_hook: None,
        }
    }

    pub fn set_normalizer(&mut self, normalizer: &Normalizer) {
        self.normalizer = *normalizer;
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Register an observer. Registering the same observer twice is a no-op.
    pub fn register_observer(&mut self, observer: Arc<dyn PhysicsObserver>) {
        if !self.observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            self.observers.push(observer);
        }
    }

    /// Remove an observer by identity. Returns whether it was registered.
    pub fn remove_observer(&mut self, observer: &Arc<dyn PhysicsObserver>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !Arc::ptr_eq(o, observer));
        self.observers.len() != before
    }

    pub fn observers(&self) -> &[Arc<dyn PhysicsObserver>] {
        &self.observers
    }

    pub fn notify_observers(&self, update: &PhysicsUpdate<'_>) {
        for observer in &self.observers {
            observer.update(update);
        }
    }

    /// Install the function that refreshes kernel constants for a time step.
    pub fn set_kernel_constants_hook<F>(&mut self, hook: F)
    where
        F: Fn(&mut Vec<Real>, Real) + Send + Sync + 'static,
    {
        self.kernel_constants_hook = Some(Box::new(hook));
    }

    /// Constants for pointwise kernels at time step `dt`.
    ///
    /// Without a hook the constants stay empty.
    pub fn kernel_constants(&mut self, dt: Real) -> &[Real] {
        if let Some(hook) = &self.kernel_constants_hook {
            hook(&mut self.kernel_constants, dt);
        }
        &self.kernel_constants
    }
}
