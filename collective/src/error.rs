use std::{error::Error, fmt, io};

/// The collective module's result type.
pub type Result<T> = std::result::Result<T, CollectiveErr>;

/// Failures of a collective operation over a worker set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectiveErr {
    InvalidOrigin {
        origin: usize,
        size: usize,
    },
    MissingBuffer {
        rank: usize,
        op: &'static str,
    },
    LayoutMismatch {
        op: &'static str,
        full: usize,
        block: usize,
        size: usize,
    },
    BlockSizeMismatch {
        peer: usize,
        got: usize,
        expected: usize,
    },
    UnexpectedMessage {
        peer: usize,
        op: &'static str,
        got: &'static str,
    },
    Disconnected {
        peer: usize,
    },
}

impl fmt::Display for CollectiveErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectiveErr::InvalidOrigin { origin, size } => {
                write!(f, "origin rank {origin} is outside a worker set of {size}")
            }
            CollectiveErr::MissingBuffer { rank, op } => {
                write!(f, "origin rank {rank} called {op} without a full-length buffer")
            }
            CollectiveErr::LayoutMismatch {
                op,
                full,
                block,
                size,
            } => write!(
                f,
                "{op} layout mismatch: full length {full} != block length {block} * {size} workers"
            ),
            CollectiveErr::BlockSizeMismatch {
                peer,
                got,
                expected,
            } => write!(
                f,
                "block from rank {peer} has length {got}, expected {expected}"
            ),
            CollectiveErr::UnexpectedMessage { peer, op, got } => {
                write!(f, "unexpected message from rank {peer} during {op}: got {got}")
            }
            CollectiveErr::Disconnected { peer } => write!(f, "rank {peer} disconnected"),
        }
    }
}

impl Error for CollectiveErr {}

/// Boundary conversion for binaries / I/O APIs.
impl From<CollectiveErr> for io::Error {
    fn from(value: CollectiveErr) -> Self {
        let kind = match value {
            CollectiveErr::Disconnected { .. } => io::ErrorKind::BrokenPipe,
            _ => io::ErrorKind::InvalidData,
        };

        io::Error::new(kind, value)
    }
}
