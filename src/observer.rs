//! Step observer trait for monitoring physics simulation progress.

/// Trait for observing physics simulation steps.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after the broad phase with the number of candidate pairs.
    fn on_broad_phase(&mut self, _candidates: usize) {}

    /// Called after narrow phase and resolution with the number of
    /// contacts actually resolved.
    fn on_contacts_resolved(&mut self, _contacts: usize) {}

    /// Called after the constraint solver pass.
    fn on_constraints_solved(&mut self) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
