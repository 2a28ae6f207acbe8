//! Executors that render a batch of cards.
//!
//! Every participant's card is an independent job that owns its canvas, so
//! the batch only needs a way to map jobs to results. [`ExecutorImpl`] picks
//! between running them on the calling thread and spreading them over
//! rayon's pool (feature: `rayon`, on by default).

#[cfg(feature = "rayon")]
mod rayon_executor;

#[cfg(feature = "rayon")]
pub use rayon_executor::RayonExecutor;

pub use cardfit_traits::{Executor, SyncExecutor};

/// The executor a card generator runs its jobs on.
///
/// `Executor` has generic methods and is not object safe, so the generator
/// stores this enum instead of a `dyn Executor`.
#[derive(Clone, Debug)]
pub enum ExecutorImpl {
    Sync(SyncExecutor),
    #[cfg(feature = "rayon")]
    Rayon(RayonExecutor),
}

impl ExecutorImpl {
    /// Renders cards one after another on the calling thread.
    pub fn sequential() -> Self {
        ExecutorImpl::Sync(SyncExecutor::new())
    }
}

impl Executor for ExecutorImpl {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        match self {
            ExecutorImpl::Sync(exec) => exec.execute_all(items, f),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.execute_all(items, f),
        }
    }

    fn parallelism(&self) -> usize {
        match self {
            ExecutorImpl::Sync(exec) => exec.parallelism(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.parallelism(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExecutorImpl::Sync(exec) => exec.name(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.name(),
        }
    }
}

impl Default for ExecutorImpl {
    #[cfg(feature = "rayon")]
    fn default() -> Self {
        ExecutorImpl::Rayon(RayonExecutor::new())
    }

    #[cfg(not(feature = "rayon"))]
    fn default() -> Self {
        Self::sequential()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_reports_a_single_worker() {
        let executor = ExecutorImpl::sequential();
        assert_eq!(executor.name(), "SyncExecutor");
        assert_eq!(executor.parallelism(), 1);
    }

    #[test]
    fn default_keeps_results_in_input_order() {
        let names = vec!["Ada", "Grace", "Linus", "Ken"];
        let lengths = ExecutorImpl::default().execute_all(names, |name| (name, name.len()));
        assert_eq!(lengths, vec![("Ada", 3), ("Grace", 5), ("Linus", 5), ("Ken", 3)]);
        assert!(ExecutorImpl::default().parallelism() >= 1);
    }
}
