//! Executor trait for fanning independent card jobs out over workers.

/// Runs a batch of independent jobs.
///
/// Results come back in input order, so a batch report can list cards in
/// the order participants were given.
pub trait Executor: Send + Sync {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static;

    /// Number of jobs that may run at the same time.
    fn parallelism(&self) -> usize;

    fn name(&self) -> &'static str;
}

/// Runs every job on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncExecutor;

impl SyncExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SyncExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        items.into_iter().map(f).collect()
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "SyncExecutor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_executor_preserves_order() {
        let results = SyncExecutor::new().execute_all(vec![3, 1, 2], |x| x * 10);
        assert_eq!(results, vec![30, 10, 20]);
    }

    #[test]
    fn sync_executor_runs_one_job_at_a_time() {
        assert_eq!(SyncExecutor::new().parallelism(), 1);
    }
}
