//! Scoped worker pool for per-item augmentation.
//!
//! Items of one `augment_*` call are independent once their random draws
//! have been taken, so applying the sampled geometry can be spread over a
//! fixed number of threads:
//!
//! - Task channel: main thread -> workers, bounded to `buffer_size` per worker
//! - Output channel: workers -> main thread, tagged with the item index
//!
//! Output order always equals input order. Threads are scoped to the call,
//! so borrowed augmenter state can be shared without `Arc`.

use super::thread::WORKER_ID;
use crate::error::{AugmentError, Result};
use crossbeam_channel::bounded;
use std::thread;
use tracing::trace;

#[derive(Debug, Clone, Copy)]
pub(crate) struct WorkerPool {
    num_workers: usize,
    buffer_size: usize,
}

impl WorkerPool {
    pub(crate) const DEFAULT_BUFFER_SIZE: usize = 2;

    /// `num_workers == 0` runs everything on the calling thread.
    pub(crate) fn new(num_workers: usize) -> Self {
        Self {
            num_workers,
            buffer_size: Self::DEFAULT_BUFFER_SIZE,
        }
    }

    /// Applies `f` to every item, in parallel when workers are configured.
    /// The first error (by arrival) is returned.
    pub(crate) fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R> + Sync,
    {
        let n_items = items.len();
        if self.num_workers == 0 || n_items <= 1 {
            return items.into_iter().map(f).collect();
        }

        let num_workers = self.num_workers.min(n_items);
        let (task_tx, task_rx) = bounded::<(usize, T)>(self.buffer_size * num_workers);
        let (output_tx, output_rx) = bounded::<(usize, Result<R>)>(n_items);
        let f = &f;
        trace!(num_workers, n_items, "fanning out batch");

        thread::scope(move |scope| -> Result<Vec<R>> {
            for worker_id in 0..num_workers {
                let task_rx = task_rx.clone();
                let output_tx = output_tx.clone();
                thread::Builder::new()
                    .name(format!("augment-worker-{worker_id}"))
                    .spawn_scoped(scope, move || {
                        WORKER_ID.with(|id| *id.borrow_mut() = worker_id);
                        for (idx, item) in task_rx {
                            if output_tx.send((idx, f(item))).is_err() {
                                break;
                            }
                        }
                    })
                    .map_err(|e| {
                        AugmentError::Worker(format!("failed to spawn worker thread {worker_id}: {e}"))
                    })?;
            }
            drop(task_rx);
            drop(output_tx);

            for task in items.into_iter().enumerate() {
                task_tx
                    .send(task)
                    .map_err(|_| AugmentError::Worker("all workers exited early".to_string()))?;
            }
            drop(task_tx);

            let mut slots: Vec<Option<R>> = (0..n_items).map(|_| None).collect();
            for (idx, result) in output_rx {
                slots[idx] = Some(result?);
            }
            slots
                .into_iter()
                .enumerate()
                .map(|(idx, slot)| {
                    slot.ok_or_else(|| AugmentError::Worker(format!("item {idx} was never processed")))
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::thread::current_worker_id;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[test]
    fn test_output_order_matches_input() {
        let pool = WorkerPool::new(4);
        let out = pool.map((0..100).collect(), |v: u32| Ok(v * 2)).unwrap();
        assert_eq!(out, (0..100).map(|v| v * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_sequential_when_no_workers() {
        let pool = WorkerPool::new(0);
        let names = pool
            .map(vec![1, 2], |_: i32| Ok(thread::current().name().map(str::to_string)))
            .unwrap();
        assert!(names.iter().all(|n| n.as_deref() != Some("augment-worker-0")));
    }

    #[test]
    fn test_workers_are_named_and_identified() {
        let pool = WorkerPool::new(3);
        let seen = Mutex::new(HashSet::new());
        pool.map((0..30).collect(), |_: i32| {
            let name = thread::current().name().unwrap_or_default().to_string();
            assert_eq!(name, format!("augment-worker-{}", current_worker_id()));
            seen.lock().unwrap().insert(current_worker_id());
            Ok(())
        })
        .unwrap();
        assert!(seen.lock().unwrap().iter().all(|&id| id < 3));
    }

    #[test]
    fn test_error_propagates() {
        let pool = WorkerPool::new(2);
        let err = pool
            .map((0..10).collect(), |v: i32| {
                if v == 7 {
                    Err(AugmentError::input("bad item"))
                } else {
                    Ok(v)
                }
            })
            .unwrap_err();
        assert_eq!(err, AugmentError::input("bad item"));
    }
}
