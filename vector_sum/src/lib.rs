pub mod alloc;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod generation;
pub mod launch;
pub mod layout;
pub mod report;
pub mod serial;
pub mod sum;

pub use config::SumConfig;
pub use coordinator::{Coordinator, DiagSink, ORIGIN};
pub use error::{Result, SumErr};
pub use launch::distributed_sum;
pub use layout::BlockLayout;
pub use serial::serial_sum;
pub use sum::{vector_sum, vector_sum_into};
