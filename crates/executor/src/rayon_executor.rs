//! Rayon-based parallel executor.
//!
//! Card renders are CPU-bound and share nothing mutable, so each job maps
//! straight onto rayon's work-stealing pool.

use cardfit_traits::Executor;
use rayon::prelude::*;

/// A parallel executor using rayon's global thread pool.
///
/// To configure the number of threads, build rayon's global pool before
/// creating the executor:
///
/// ```ignore
/// rayon::ThreadPoolBuilder::new().num_threads(4).build_global().unwrap();
/// let executor = RayonExecutor::new();
/// ```
#[derive(Debug, Clone)]
pub struct RayonExecutor {
    /// Cached thread count for reporting via `parallelism()`.
    num_threads: usize,
}

impl RayonExecutor {
    pub fn new() -> Self {
        Self {
            num_threads: rayon::current_num_threads(),
        }
    }
}

impl Default for RayonExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for RayonExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        items.into_par_iter().map(f).collect()
    }

    fn parallelism(&self) -> usize {
        self.num_threads
    }

    fn name(&self) -> &'static str {
        "RayonExecutor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn processes_every_item() {
        let executor = RayonExecutor::new();
        let mut results = executor.execute_all(vec![1, 2, 3, 4, 5], |x| x * 2);
        results.sort();
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn runs_each_job_exactly_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = counter.clone();
        let executor = RayonExecutor::new();
        executor.execute_all((0..64).collect(), move |_: i32| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(counter.load(Ordering::SeqCst), 64);
    }

    #[test]
    fn failed_jobs_stay_at_their_position() {
        let executor = RayonExecutor::new();
        let results: Vec<Result<i32, i32>> = executor.execute_all(vec![1, 2, 3, 4], |x| {
            if x % 2 == 0 { Err(x) } else { Ok(x) }
        });
        assert_eq!(results, vec![Ok(1), Err(2), Ok(3), Err(4)]);
        assert!(executor.parallelism() >= 1);
    }
}
