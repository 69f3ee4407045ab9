use std::{io, process};

use log::info;
use vector_sum::{
    SumConfig, SumErr,
    alloc::HeapAlloc,
    generation::{RandVecGen, seeded_rng},
    report, serial_sum,
};

fn fail(e: SumErr) -> ! {
    eprintln!("{e}");
    process::exit(-1);
}

fn main() -> io::Result<()> {
    env_logger::init();

    let config = SumConfig::from_env().unwrap_or_else(|e| fail(e));
    let mut vec_gen = RandVecGen::tenths(seeded_rng(config.seed()));

    let z = serial_sum(config.order(), &mut vec_gen, &HeapAlloc).unwrap_or_else(|e| fail(e));

    info!("summed vectors of order {}", config.order());
    report::write_part(&mut io::stdout().lock(), "A part of the sum is", &z)
}
