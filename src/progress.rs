//! Cooperative progress reporting and cancellation.
//!
//! Long stages report `(current, total)` inside nested scopes. A sink may also
//! request cancellation; the correlator polls it once per scanline and aborts
//! with [`DiffMatchError::Cancelled`](crate::DiffMatchError::Cancelled).

/// Progress sink with nested scopes.
pub trait Progress {
    /// Opens a nested scope.
    fn push(&mut self);
    /// Closes the innermost scope.
    fn pop(&mut self);
    /// Reports progress within the innermost scope.
    fn report(&mut self, current: usize, total: usize);
    /// Returns true when the run should stop at the next scanline boundary.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Progress sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn push(&mut self) {}
    fn pop(&mut self) {}
    fn report(&mut self, _current: usize, _total: usize) {}
}

/// Scope guard: pushes on creation and pops when dropped.
pub struct ProgressScope<'p> {
    inner: &'p mut dyn Progress,
}

impl<'p> ProgressScope<'p> {
    /// Enters a nested scope on `inner`.
    pub fn enter(inner: &'p mut dyn Progress) -> Self {
        inner.push();
        Self { inner }
    }
}

impl Progress for ProgressScope<'_> {
    fn push(&mut self) {
        self.inner.push();
    }

    fn pop(&mut self) {
        self.inner.pop();
    }

    fn report(&mut self, current: usize, total: usize) {
        self.inner.report(current, total);
    }

    fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }
}

impl Drop for ProgressScope<'_> {
    fn drop(&mut self) {
        self.inner.pop();
    }
}
