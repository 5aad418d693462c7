//! Thread-local storage for worker identification.

use std::cell::RefCell;

thread_local! {
    /// Id of the pool worker running on this thread (0 to num_workers-1).
    /// Threads outside the pool report 0.
    pub static WORKER_ID: RefCell<usize> = const { RefCell::new(0) };
}

pub fn current_worker_id() -> usize {
    WORKER_ID.with(|id| *id.borrow())
}
