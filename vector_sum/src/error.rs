use std::{error::Error, fmt, io};

use collective::CollectiveErr;

use crate::generation::RandErr;

/// The vector sum module's result type.
pub type Result<T> = std::result::Result<T, SumErr>;

/// Failures of a serial or distributed vector sum.
#[derive(Debug)]
pub enum SumErr {
    Collective(CollectiveErr),
    Rand(RandErr),
    /// The worker set agreed to stop, every rank returns this same error.
    Aborted {
        step: &'static str,
        message: String,
    },
    Allocation(&'static str),
    Generation,
    InvalidConfig {
        var: &'static str,
        value: String,
    },
    WorkerPanicked {
        rank: usize,
    },
}

impl fmt::Display for SumErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SumErr::Collective(e) => write!(f, "collective error: {e}"),
            SumErr::Rand(e) => write!(f, "invalid distribution: {e}"),
            SumErr::Aborted { step, message } => write!(f, "In {step}, {message}"),
            SumErr::Allocation(message) => f.write_str(message),
            SumErr::Generation => f.write_str("can't generate input vector"),
            SumErr::InvalidConfig { var, value } => {
                write!(f, "invalid value for {var}: {value:?}")
            }
            SumErr::WorkerPanicked { rank } => write!(f, "worker {rank} panicked"),
        }
    }
}

impl Error for SumErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SumErr::Collective(e) => Some(e),
            SumErr::Rand(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CollectiveErr> for SumErr {
    fn from(value: CollectiveErr) -> Self {
        Self::Collective(value)
    }
}

impl From<RandErr> for SumErr {
    fn from(value: RandErr) -> Self {
        Self::Rand(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<SumErr> for io::Error {
    fn from(value: SumErr) -> Self {
        match value {
            SumErr::Collective(e) => e.into(),
            SumErr::Allocation(_) => io::Error::new(io::ErrorKind::OutOfMemory, value),
            other => io::Error::other(other),
        }
    }
}
