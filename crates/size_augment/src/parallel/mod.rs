pub(crate) mod pool;
pub mod thread;

pub(crate) use pool::WorkerPool;
pub use thread::current_worker_id;
