use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use crate::error::{MdtoolError, Result};

/// Runs futures on the tokio runtime with at most `max_concurrent` in flight
pub struct ParallelProcessor {
    semaphore: Arc<Semaphore>,
}

impl ParallelProcessor {
    /// Creates a new processor; a limit of 0 is treated as 1
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Runs all tasks and returns their results in the order the tasks were given
    pub async fn process<F, T>(&self, tasks: Vec<F>) -> Vec<Result<T>>
    where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let mut handles = Vec::with_capacity(tasks.len());

        for task in tasks {
            let semaphore = Arc::clone(&self.semaphore);
            handles.push(tokio::spawn(async move {
                match semaphore.acquire_owned().await {
                    Ok(_permit) => task.await,
                    Err(e) => Err(MdtoolError::Network(format!("worker pool closed: {}", e))),
                }
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(match handle.await {
                Ok(result) => result,
                Err(e) => Err(MdtoolError::Network(format!("fetch task failed: {}", e))),
            });
        }
        results
    }
}
