mod constant;
mod error;
mod queued;
mod random;
mod vec_gen;

pub use constant::ConstVecGen;
pub use error::{RandErr, Result};
pub use queued::QueuedVecGen;
pub use random::{RandVecGen, Tenths, seeded_rng};
pub use vec_gen::VecGen;
