use std::{
    io::{self, BufWriter, Write},
    process,
    sync::{Arc, Mutex},
};

use log::warn;
use vector_sum::{
    DiagSink, SumConfig, SumErr,
    alloc::HeapAlloc,
    distributed_sum,
    generation::{RandVecGen, seeded_rng},
    report,
};

fn fail(e: SumErr) -> ! {
    // The origin already reported the agreed failure.
    if !matches!(e, SumErr::Aborted { .. }) {
        eprintln!("{e}");
    }

    process::exit(-1);
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let config = SumConfig::from_env().unwrap_or_else(|e| fail(e));
    let vec_gen = RandVecGen::uniform(seeded_rng(config.seed()), 0., 1.)
        .unwrap_or_else(|e| fail(e.into()));
    let diag: DiagSink = Arc::new(Mutex::new(io::stderr()));

    let sum = distributed_sum(config.order(), config.workers(), vec_gen, |_| HeapAlloc, diag);

    let z = sum.await.unwrap_or_else(|e| {
        if !matches!(e, SumErr::Aborted { .. }) {
            warn!("worker set failed outside of a collective check");
        }
        fail(e)
    });

    let mut out = BufWriter::new(io::stdout().lock());
    report::write_vector(&mut out, "The sum is", &z)?;
    out.flush()
}
