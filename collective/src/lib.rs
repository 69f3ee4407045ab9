mod communicator;
mod error;
mod worker_set;

pub use communicator::{Communicator, world};
pub use error::{CollectiveErr, Result};
pub use worker_set::{LocalWorkerSet, WorkerSet};
